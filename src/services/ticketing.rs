//! HTTP implementation of the ticketing service.

use async_trait::async_trait;
use serde::Deserialize;

use super::http::{ApiClient, ApiResult};
use super::TicketingService;
use crate::core::model::{CreatedTicket, TicketConfig};

/// Ticketing service backed by the `/api/actions/tickets` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTicketingService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct TicketsResponse {
    tickets: Vec<CreatedTicket>,
}

impl HttpTicketingService {
    /// Create a service on top of the shared API client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TicketingService for HttpTicketingService {
    async fn create_tickets(
        &self,
        action_ids: &[String],
        config: &TicketConfig,
    ) -> ApiResult<Vec<CreatedTicket>> {
        let body = serde_json::json!({
            "action_ids": action_ids,
            "config": {
                "project": config.project,
                "issue_type": config.issue_type,
                "label": config.label,
            },
        });
        let response: TicketsResponse =
            self.client.send_json(reqwest::Method::POST, "/api/actions/tickets", &body).await?;
        Ok(response.tickets)
    }
}
