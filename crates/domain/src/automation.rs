use std::fmt::{Display, Formatter};
use std::str::FromStr;

use entrypoint_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Persisted automation choice stored on a dialog field record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationType {
    /// Entry point is an embedded automation instance.
    EmbeddedAutomate,
    /// Entry point is an embedded workflow.
    #[serde(alias = "embedded_workflows")]
    EmbeddedWorkflow,
}

impl AutomationType {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmbeddedAutomate => "embedded_automate",
            Self::EmbeddedWorkflow => "embedded_workflow",
        }
    }

    /// Returns the picker mode that edits this automation type.
    #[must_use]
    pub fn picker_mode(&self) -> PickerMode {
        match self {
            Self::EmbeddedAutomate => PickerMode::Automate,
            Self::EmbeddedWorkflow => PickerMode::Workflow,
        }
    }
}

impl FromStr for AutomationType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "embedded_automate" => Ok(Self::EmbeddedAutomate),
            "embedded_workflow" | "embedded_workflows" => Ok(Self::EmbeddedWorkflow),
            _ => Err(AppError::Validation(format!(
                "unknown automation type '{value}'"
            ))),
        }
    }
}

impl Display for AutomationType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Backing collection currently driving the entry-point picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerMode {
    /// Hierarchical automation tree.
    Automate,
    /// Flat workflow list.
    Workflow,
}

impl PickerMode {
    /// Returns stable mode value used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automate => "automate",
            Self::Workflow => "workflow",
        }
    }

    /// Returns the persisted automation type matching this mode.
    #[must_use]
    pub fn automation_type(&self) -> AutomationType {
        match self {
            Self::Automate => AutomationType::EmbeddedAutomate,
            Self::Workflow => AutomationType::EmbeddedWorkflow,
        }
    }
}

impl From<AutomationType> for PickerMode {
    fn from(value: AutomationType) -> Self {
        value.picker_mode()
    }
}

impl FromStr for PickerMode {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        match value {
            "automate" => Ok(Self::Automate),
            "workflow" => Ok(Self::Workflow),
            _ => Err(AppError::Validation(format!("unknown picker mode '{value}'"))),
        }
    }
}

impl Display for PickerMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
