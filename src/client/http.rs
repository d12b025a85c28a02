//! Shared JSON-over-HTTP plumbing for the desk API wrappers

use crate::error::{QueueError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Thin JSON client bound to one API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            QueueError::ConfigurationError {
                message: format!("Failed to create HTTP client: {}", e),
            }
        })?;

        Ok(Self::with_client(client, base_url))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    ///
    /// Any non-2xx status becomes [`QueueError::ApiStatus`] tagged with
    /// `operation`.
    pub async fn post_json<B, R>(&self, operation: &str, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, operation, "Sending request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| QueueError::ApiTransport {
                operation: operation.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, operation, "Desk API returned error status");
            return Err(QueueError::ApiStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let decoded = response
            .json::<R>()
            .await
            .map_err(|e| QueueError::InvalidResponse {
                operation: operation.to_string(),
                message: e.to_string(),
            })?;
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let client = ApiClient::new("http://127.0.0.1:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Reserve a free port, then release it so nothing is listening
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client = ApiClient::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = client
            .post_json::<_, serde_json::Value>("ping", "/ping", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QueueError>(),
            Some(QueueError::ApiTransport { .. })
        ));
    }
}
