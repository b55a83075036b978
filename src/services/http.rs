//! Shared HTTP plumbing for the backend services.
//!
//! All services speak JSON over HTTP against a single backend base URL.
//! Non-2xx responses surface as [`ApiError::Api`] carrying the service's
//! `detail` message and the raw error body; transport-level failures surface
//! as [`ApiError::Transport`] and report status 0.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error type for backend service calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a non-2xx status.
    #[error("{message} (status: {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message from the service body, or a fallback.
        message: String,
        /// Structured error detail when the body parsed as JSON.
        detail: Option<serde_json::Value>,
    },

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Status code of the failure; 0 for transport-level failures.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Transport(_) => 0,
        }
    }

    /// The service-provided message, when the service answered at all.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            Self::Transport(_) => None,
        }
    }

    /// The service message, or the given fallback for transport failures.
    pub fn display_message(&self, fallback: &str) -> String {
        self.service_message().unwrap_or(fallback).to_string()
    }
}

/// Result type for backend service calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP client bound to a backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("actionflow/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, client })
    }

    /// Build a full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parse an error response body.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let detail: Option<serde_json::Value> = response.json().await.ok();

        let message = detail
            .as_ref()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or_else(|| format!("HTTP error {}", status));

        ApiError::Api { status, message, detail }
    }

    /// Decode a response, mapping non-2xx statuses to [`ApiError::Api`].
    async fn expect_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Check a response status, discarding any body.
    async fn expect_ok(response: reqwest::Response) -> ApiResult<()> {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }
        Ok(())
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::expect_json(response).await
    }

    /// Send a JSON body and decode a JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let response = self.client.request(method, self.url(path)).json(body).send().await?;
        Self::expect_json(response).await
    }

    /// Send a JSON body, expecting no meaningful response body.
    pub(crate) async fn send_json_ack(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<()> {
        let response = self.client.request(method, self.url(path)).json(body).send().await?;
        Self::expect_ok(response).await
    }

    /// DELETE a resource, expecting no response body.
    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::expect_ok(response).await
    }

    /// POST a multipart form and decode a JSON response.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<T> {
        let response = self.client.post(self.url(path)).multipart(form).send().await?;
        Self::expect_json(response).await
    }

    /// Backend health check.
    pub async fn health(&self) -> ApiResult<()> {
        let response = self.client.get(self.url("/health")).send().await?;
        Self::expect_ok(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status() {
        let err = ApiError::Api { status: 422, message: "Invalid input".to_string(), detail: None };
        assert_eq!(err.status(), 422);
        assert_eq!(err.service_message(), Some("Invalid input"));
    }

    #[test]
    fn test_api_error_display_message_fallback() {
        let err = ApiError::Api { status: 500, message: "boom".to_string(), detail: None };
        assert_eq!(err.display_message("Failed to extract action items"), "boom");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/api/settings"), "http://localhost:8000/api/settings");
    }
}
