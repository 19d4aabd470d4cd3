use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use entrypoint_core::AppError;
use entrypoint_domain::PickerMode;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_TREE_PATH: &str = "api/automate";
const DEFAULT_WORKFLOWS_PATH: &str = "api/configuration_script_payloads";

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_url: Url,
    pub api_token: Option<String>,
    pub tree_path: String,
    pub workflows_path: String,
    pub include_domain: bool,
    pub http_timeout: Duration,
    pub http_max_attempts: u8,
    pub http_retry_backoff_ms: u64,
}

impl CliConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("ENTRYPOINT_API_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("ENTRYPOINT_API_URL is required".to_owned()))?;
        let api_url = Url::parse(api_url.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid ENTRYPOINT_API_URL '{api_url}': {error}"))
        })?;

        let api_token = lookup("ENTRYPOINT_API_TOKEN").filter(|value| !value.trim().is_empty());
        let tree_path =
            lookup("ENTRYPOINT_TREE_PATH").unwrap_or_else(|| DEFAULT_TREE_PATH.to_owned());
        let workflows_path = lookup("ENTRYPOINT_WORKFLOWS_PATH")
            .unwrap_or_else(|| DEFAULT_WORKFLOWS_PATH.to_owned());
        let include_domain = lookup("ENTRYPOINT_INCLUDE_DOMAIN")
            .unwrap_or_else(|| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let http_timeout = Duration::from_secs(parse_or(
            &lookup,
            "ENTRYPOINT_HTTP_TIMEOUT_SECONDS",
            15_u64,
        )?);
        let http_max_attempts = parse_or(&lookup, "ENTRYPOINT_HTTP_MAX_ATTEMPTS", 3_u8)?;
        let http_retry_backoff_ms =
            parse_or(&lookup, "ENTRYPOINT_HTTP_RETRY_BACKOFF_MS", 250_u64)?;

        Ok(Self {
            api_url,
            api_token,
            tree_path,
            workflows_path,
            include_domain,
            http_timeout,
            http_max_attempts,
            http_retry_backoff_ms,
        })
    }
}

/// Runs one entry-point picker session over a saved dialog field.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "entrypoint-cli", version)]
pub struct CliArgs {
    /// Path to the dialog field JSON record
    pub field_path: PathBuf,

    /// Collection to pick the entry point from
    #[arg(value_enum)]
    pub mode: ModeArg,

    /// Identifier of the item to select once the picker is loaded
    pub select_id: Option<String>,
}

impl CliArgs {
    pub fn picker_mode(&self) -> PickerMode {
        self.mode.into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Automation tree instances
    Automate,
    /// Embedded workflows
    Workflow,
}

impl From<ModeArg> for PickerMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Automate => Self::Automate,
            ModeArg::Workflow => Self::Workflow,
        }
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
    }
}
