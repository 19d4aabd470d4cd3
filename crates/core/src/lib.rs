//! Shared primitives for all Rust crates in the entry-point selector.

#![forbid(unsafe_code)]

/// Editor session identity used for log correlation.
pub mod session;

use thiserror::Error;

pub use session::EditorSessionId;

/// Result type used across entry-point selector crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Fully-qualified name has too few segments to describe an instance.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// An external loader rejected or failed a picker load.
    #[error("load failure: {0}")]
    LoadFailure(String),

    /// Action is not allowed in the current picker phase.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns true when the error came from a picker data load.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::LoadFailure(_))
    }
}
