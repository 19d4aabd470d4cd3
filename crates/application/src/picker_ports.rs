use async_trait::async_trait;
use entrypoint_core::AppResult;
use entrypoint_domain::{DialogField, TreeNode, WorkflowCollection, WorkflowRecordRaw};

/// Port for the automation tree shown in automate mode.
#[async_trait]
pub trait TreeLoader: Send + Sync {
    /// Loads tree nodes, expanded around the optional selection hint.
    async fn load(&self, hint_fqn: Option<&str>) -> AppResult<Vec<TreeNode>>;
}

/// Port for the workflow list shown in workflow mode.
#[async_trait]
pub trait WorkflowLoader: Send + Sync {
    /// Loads every available workflow, including ones without a payload.
    async fn load_available(&self) -> AppResult<WorkflowCollection>;

    /// Loads one workflow by identifier.
    async fn load_workflow(&self, id: &str) -> AppResult<WorkflowRecordRaw>;
}

/// Port for the dialog field validation routine.
pub trait FieldValidator: Send + Sync {
    /// Returns true when the whole field record may be saved.
    fn validate_field(&self, field: &DialogField) -> bool;
}
