use std::time::Duration;

use entrypoint_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Connection settings for the automation REST API.
#[derive(Debug, Clone)]
pub struct HttpApiClientConfig {
    /// API root, e.g. `https://miq.example.com/`.
    pub base_url: Url,
    /// Token sent as `X-Auth-Token` when present.
    pub auth_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Attempts per request, including the first one.
    pub max_attempts: u8,
    /// Linear backoff step between attempts.
    pub retry_backoff_ms: u64,
}

/// Read-only JSON client shared by the HTTP picker loaders.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
    max_attempts: u8,
    retry_backoff_ms: u64,
}

impl HttpApiClient {
    /// Creates a client from connection settings.
    pub fn new(config: HttpApiClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
            auth_token: config.auth_token.filter(|token| !token.trim().is_empty()),
            max_attempts: config.max_attempts.max(1),
            retry_backoff_ms: config.retry_backoff_ms.max(50),
        })
    }

    /// Resolves `path` against the API root and appends `query` pairs.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Url> {
        endpoint_url(&self.base_url, path, query)
    }

    /// Fetches and decodes one JSON document, retrying transient failures.
    pub async fn get_json<T>(&self, url: Url) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let mut attempt = 0_u8;
        let mut last_error: Option<String> = None;

        while attempt < self.max_attempts {
            attempt = attempt.saturating_add(1);
            debug!(url = %url, attempt, "fetching picker data");

            let mut request = self
                .http_client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/json");
            if let Some(token) = &self.auth_token {
                request = request.header("X-Auth-Token", token.as_str());
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    return response.json::<T>().await.map_err(|error| {
                        AppError::LoadFailure(format!("unexpected response from {url}: {error}"))
                    });
                }
                Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
                    return Err(AppError::NotFound(format!("{url} returned 404")));
                }
                Ok(response)
                    if response.status().is_server_error()
                        || response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS =>
                {
                    last_error = Some(format!(
                        "transient HTTP status {} from {url}",
                        response.status()
                    ));
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
                    return Err(AppError::LoadFailure(format!(
                        "{url} failed with status {status}: {body}"
                    )));
                }
                Err(error) => {
                    last_error = Some(format!("transport error for {url}: {error}"));
                }
            }

            if attempt < self.max_attempts {
                let delay = self.retry_backoff_ms.saturating_mul(u64::from(attempt));
                warn!(
                    url = %url,
                    attempt,
                    delay_ms = delay,
                    error = last_error.as_deref().unwrap_or_default(),
                    "retrying picker data request"
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }

        Err(AppError::LoadFailure(last_error.unwrap_or_else(|| {
            format!("{url} exhausted retries")
        })))
    }
}

fn endpoint_url(base_url: &Url, path: &str, query: &[(&str, &str)]) -> AppResult<Url> {
    let mut base_url = base_url.clone();
    if !base_url.path().ends_with('/') {
        let path_with_slash = format!("{}/", base_url.path());
        base_url.set_path(&path_with_slash);
    }

    let mut url = base_url
        .join(path.trim_start_matches('/'))
        .map_err(|error| AppError::Validation(format!("invalid API path '{path}': {error}")))?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
