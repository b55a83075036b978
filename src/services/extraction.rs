//! HTTP implementation of the extraction service.

use async_trait::async_trait;
use serde::Deserialize;

use super::http::{ApiClient, ApiResult};
use super::ExtractionService;
use crate::core::model::{ActionItem, UploadFile};

/// Extraction service backed by the `/api/actions` endpoints.
#[derive(Debug, Clone)]
pub struct HttpExtractionService {
    client: ApiClient,
}

/// Response envelope for both extraction endpoints.
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    action_items: Vec<ActionItem>,
}

impl HttpExtractionService {
    /// Create a service on top of the shared API client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExtractionService for HttpExtractionService {
    async fn extract_from_text(&self, content: &str) -> ApiResult<Vec<ActionItem>> {
        let body = serde_json::json!({
            "input_type": "text",
            "content": content,
        });
        let response: ExtractResponse =
            self.client.send_json(reqwest::Method::POST, "/api/actions/extract", &body).await?;
        Ok(response.action_items)
    }

    async fn extract_from_file(&self, file: &UploadFile) -> ApiResult<Vec<ActionItem>> {
        let part =
            reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response: ExtractResponse =
            self.client.post_multipart("/api/actions/extract-file", form).await?;
        Ok(response.action_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_response_shape() {
        let json = r#"{
            "action_items": [
                {"id": "a1", "title": "Ship it", "assignee": "Sarah Lee",
                 "due_date": "Friday", "selected": true, "overdue": false},
                {"id": "a2", "title": "Review docs", "assignee": null,
                 "due_date": "Monday", "selected": true, "overdue": true}
            ]
        }"#;
        let response: ExtractResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.action_items.len(), 2);
        assert_eq!(response.action_items[0].id, "a1");
        assert!(response.action_items[1].assignee.is_none());
    }
}
