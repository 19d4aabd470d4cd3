use async_trait::async_trait;
use entrypoint_application::{TreeLoader, WorkflowLoader};
use entrypoint_core::{AppError, AppResult};
use entrypoint_domain::{TreeNode, WorkflowCollection, WorkflowRecordRaw};
use tokio::sync::RwLock;

/// In-memory automation tree, used for demos and tests.
#[derive(Default)]
pub struct InMemoryTreeLoader {
    nodes: RwLock<Vec<TreeNode>>,
    failure: RwLock<Option<String>>,
}

impl InMemoryTreeLoader {
    /// Creates a loader serving `nodes`.
    #[must_use]
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self {
            nodes: RwLock::new(nodes),
            failure: RwLock::new(None),
        }
    }

    /// Replaces the served nodes.
    pub async fn replace_nodes(&self, nodes: Vec<TreeNode>) {
        *self.nodes.write().await = nodes;
    }

    /// Makes every following load fail with `message`, or succeed again with `None`.
    pub async fn set_failure(&self, message: Option<String>) {
        *self.failure.write().await = message;
    }
}

#[async_trait]
impl TreeLoader for InMemoryTreeLoader {
    async fn load(&self, _hint_fqn: Option<&str>) -> AppResult<Vec<TreeNode>> {
        if let Some(message) = self.failure.read().await.clone() {
            return Err(AppError::LoadFailure(message));
        }

        Ok(self.nodes.read().await.clone())
    }
}

/// In-memory workflow collection, used for demos and tests.
#[derive(Default)]
pub struct InMemoryWorkflowLoader {
    workflows: RwLock<Vec<WorkflowRecordRaw>>,
    failure: RwLock<Option<String>>,
}

impl InMemoryWorkflowLoader {
    /// Creates a loader serving `workflows`.
    #[must_use]
    pub fn new(workflows: Vec<WorkflowRecordRaw>) -> Self {
        Self {
            workflows: RwLock::new(workflows),
            failure: RwLock::new(None),
        }
    }

    /// Makes every following load fail with `message`, or succeed again with `None`.
    pub async fn set_failure(&self, message: Option<String>) {
        *self.failure.write().await = message;
    }
}

#[async_trait]
impl WorkflowLoader for InMemoryWorkflowLoader {
    async fn load_available(&self) -> AppResult<WorkflowCollection> {
        if let Some(message) = self.failure.read().await.clone() {
            return Err(AppError::LoadFailure(message));
        }

        Ok(WorkflowCollection {
            resources: self.workflows.read().await.clone(),
        })
    }

    async fn load_workflow(&self, id: &str) -> AppResult<WorkflowRecordRaw> {
        if let Some(message) = self.failure.read().await.clone() {
            return Err(AppError::LoadFailure(message));
        }

        self.workflows
            .read()
            .await
            .iter()
            .find(|workflow| workflow.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("workflow '{id}' not found")))
    }
}
