use async_trait::async_trait;
use entrypoint_application::TreeLoader;
use entrypoint_core::AppResult;
use entrypoint_domain::TreeNode;
use serde::Deserialize;
use tracing::debug;

use crate::HttpApiClient;

/// Tree endpoint payload: either a bare node list or a resource envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TreeResponse {
    Nodes(Vec<TreeNode>),
    Envelope { resources: Vec<TreeNode> },
}

impl TreeResponse {
    fn into_nodes(self) -> Vec<TreeNode> {
        match self {
            Self::Nodes(nodes) | Self::Envelope { resources: nodes } => nodes,
        }
    }
}

/// HTTP adapter loading the automation tree.
pub struct HttpAutomateTreeLoader {
    client: HttpApiClient,
    tree_path: String,
}

impl HttpAutomateTreeLoader {
    /// Creates a loader reading nodes from `tree_path` under the API root.
    #[must_use]
    pub fn new(client: HttpApiClient, tree_path: impl Into<String>) -> Self {
        Self {
            client,
            tree_path: tree_path.into(),
        }
    }
}

#[async_trait]
impl TreeLoader for HttpAutomateTreeLoader {
    async fn load(&self, hint_fqn: Option<&str>) -> AppResult<Vec<TreeNode>> {
        let query: Vec<(&str, &str)> = hint_fqn.map(|hint| ("fqname", hint)).into_iter().collect();
        let url = self.client.endpoint(&self.tree_path, &query)?;

        let nodes = self.client.get_json::<TreeResponse>(url).await?.into_nodes();
        debug!(node_count = nodes.len(), hint = ?hint_fqn, "automation tree loaded");

        Ok(nodes)
    }
}
