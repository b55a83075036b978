//! HTTP implementation of the chat notification service.

use async_trait::async_trait;

use super::http::{ApiClient, ApiResult};
use super::NotificationService;

/// Notification service backed by the `/api/notifications` endpoints.
#[derive(Debug, Clone)]
pub struct HttpNotificationService {
    client: ApiClient,
}

impl HttpNotificationService {
    /// Create a service on top of the shared API client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationService for HttpNotificationService {
    async fn send(
        &self,
        assignee: &str,
        message: &str,
        ticket_key: Option<&str>,
    ) -> ApiResult<()> {
        let body = serde_json::json!({
            "assignee": assignee,
            "message": message,
            "ticket_key": ticket_key,
        });
        self.client.send_json_ack(reqwest::Method::POST, "/api/notifications/send", &body).await
    }

    async fn send_reminders(&self, assignees: &[String]) -> ApiResult<()> {
        let body = serde_json::json!({ "assignees": assignees });
        self.client
            .send_json_ack(reqwest::Method::POST, "/api/notifications/reminders", &body)
            .await
    }
}
