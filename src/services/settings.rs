//! HTTP implementation of the settings and team roster service.

use async_trait::async_trait;

use super::http::{ApiClient, ApiResult};
use super::SettingsService;
use crate::core::model::{
    IntegrationStatus, NewTeamMember, SettingsDocument, TeamMember, TeamMemberUpdate,
};

/// Settings service backed by the `/api/settings`, `/api/team` and
/// `/api/integrations` endpoints.
#[derive(Debug, Clone)]
pub struct HttpSettingsService {
    client: ApiClient,
}

impl HttpSettingsService {
    /// Create a service on top of the shared API client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn member_path(id: &str) -> String {
        format!("/api/team/{}", urlencoding::encode(id))
    }
}

#[async_trait]
impl SettingsService for HttpSettingsService {
    async fn get_settings(&self) -> ApiResult<SettingsDocument> {
        self.client.get_json("/api/settings").await
    }

    async fn update_settings(&self, document: &SettingsDocument) -> ApiResult<SettingsDocument> {
        self.client.send_json(reqwest::Method::PUT, "/api/settings", document).await
    }

    async fn team_members(&self) -> ApiResult<Vec<TeamMember>> {
        self.client.get_json("/api/team").await
    }

    async fn add_team_member(&self, member: &NewTeamMember) -> ApiResult<TeamMember> {
        self.client.send_json(reqwest::Method::POST, "/api/team", member).await
    }

    async fn update_team_member(
        &self,
        id: &str,
        update: &TeamMemberUpdate,
    ) -> ApiResult<TeamMember> {
        self.client.send_json(reqwest::Method::PATCH, &Self::member_path(id), update).await
    }

    async fn delete_team_member(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&Self::member_path(id)).await
    }

    async fn integration_status(&self) -> ApiResult<IntegrationStatus> {
        self.client.get_json("/api/integrations/status").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_path_encodes_id() {
        assert_eq!(HttpSettingsService::member_path("tm-1"), "/api/team/tm-1");
        assert_eq!(HttpSettingsService::member_path("a b"), "/api/team/a%20b");
    }

    #[test]
    fn test_team_member_update_skips_absent_fields() {
        let update = TeamMemberUpdate { name: Some("Raj Kumar".to_string()), initials: None };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Raj Kumar"}));
    }
}
