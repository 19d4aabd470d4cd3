use async_trait::async_trait;
use entrypoint_application::WorkflowLoader;
use entrypoint_core::AppResult;
use entrypoint_domain::{WorkflowCollection, WorkflowRecordRaw};
use tracing::debug;

use crate::HttpApiClient;

const WORKFLOW_ATTRIBUTES: &str = "id,name,payload";

/// HTTP adapter loading workflows from a REST collection.
pub struct HttpWorkflowLoader {
    client: HttpApiClient,
    collection_path: String,
}

impl HttpWorkflowLoader {
    /// Creates a loader reading the collection at `collection_path`.
    #[must_use]
    pub fn new(client: HttpApiClient, collection_path: impl Into<String>) -> Self {
        Self {
            client,
            collection_path: collection_path.into(),
        }
    }

    fn record_path(&self, id: &str) -> String {
        format!("{}/{id}", self.collection_path.trim_end_matches('/'))
    }
}

#[async_trait]
impl WorkflowLoader for HttpWorkflowLoader {
    async fn load_available(&self) -> AppResult<WorkflowCollection> {
        let url = self.client.endpoint(
            &self.collection_path,
            &[("expand", "resources"), ("attributes", WORKFLOW_ATTRIBUTES)],
        )?;

        let collection = self.client.get_json::<WorkflowCollection>(url).await?;
        debug!(
            workflow_count = collection.resources.len(),
            "workflow collection loaded"
        );

        Ok(collection)
    }

    async fn load_workflow(&self, id: &str) -> AppResult<WorkflowRecordRaw> {
        let url = self.client.endpoint(
            &self.record_path(id),
            &[("attributes", WORKFLOW_ATTRIBUTES)],
        )?;

        self.client.get_json::<WorkflowRecordRaw>(url).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::HttpWorkflowLoader;
    use crate::{HttpApiClient, HttpApiClientConfig};

    #[test]
    fn record_path_appends_identifier() {
        let base_url = Url::parse("https://miq.example.com/").unwrap_or_else(|_| unreachable!());
        let client = HttpApiClient::new(HttpApiClientConfig {
            base_url,
            auth_token: None,
            timeout: Duration::from_secs(5),
            max_attempts: 1,
            retry_backoff_ms: 50,
        })
        .unwrap_or_else(|_| unreachable!());
        let loader = HttpWorkflowLoader::new(client, "api/configuration_script_payloads/");

        assert_eq!(loader.record_path("12"), "api/configuration_script_payloads/12");
    }
}
