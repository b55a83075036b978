//! Backend service interfaces and their HTTP implementations.
//!
//! Stores depend on the traits defined here, not on the HTTP layer, so they
//! can be exercised with in-process fakes in tests. Production code wires up
//! the `Http*` implementations against a single [`ApiClient`].

use async_trait::async_trait;

use crate::core::model::{
    ActionItem, CreatedTicket, IntegrationStatus, NewTeamMember, SettingsDocument, TeamMember,
    TeamMemberUpdate, TicketConfig, UploadFile,
};

pub mod extraction;
pub mod http;
pub mod notify;
pub mod settings;
pub mod ticketing;

pub use extraction::HttpExtractionService;
pub use http::{ApiClient, ApiError, ApiResult};
pub use notify::HttpNotificationService;
pub use settings::HttpSettingsService;
pub use ticketing::HttpTicketingService;

/// Extracts candidate action items from meeting input.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Extract action items from raw meeting notes.
    async fn extract_from_text(&self, content: &str) -> ApiResult<Vec<ActionItem>>;

    /// Extract action items from an uploaded file.
    async fn extract_from_file(&self, file: &UploadFile) -> ApiResult<Vec<ActionItem>>;
}

/// Creates tracked tickets in the external issue tracker.
#[async_trait]
pub trait TicketingService: Send + Sync {
    /// Create one ticket per action id, returning them in request order.
    async fn create_tickets(
        &self,
        action_ids: &[String],
        config: &TicketConfig,
    ) -> ApiResult<Vec<CreatedTicket>>;
}

/// Sends chat notifications to assignees.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Send a single assignment notification. Fire-and-forget ack.
    async fn send(
        &self,
        assignee: &str,
        message: &str,
        ticket_key: Option<&str>,
    ) -> ApiResult<()>;

    /// Send reminder notifications to the given assignees.
    async fn send_reminders(&self, assignees: &[String]) -> ApiResult<()>;
}

/// Persists user settings and manages the team roster.
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Fetch the persisted settings document.
    async fn get_settings(&self) -> ApiResult<SettingsDocument>;

    /// Persist the full settings document, returning the stored version.
    async fn update_settings(&self, document: &SettingsDocument) -> ApiResult<SettingsDocument>;

    /// Fetch the team roster.
    async fn team_members(&self) -> ApiResult<Vec<TeamMember>>;

    /// Add a team member.
    async fn add_team_member(&self, member: &NewTeamMember) -> ApiResult<TeamMember>;

    /// Update a team member.
    async fn update_team_member(
        &self,
        id: &str,
        update: &TeamMemberUpdate,
    ) -> ApiResult<TeamMember>;

    /// Delete a team member.
    async fn delete_team_member(&self, id: &str) -> ApiResult<()>;

    /// Fetch the integration connection status.
    async fn integration_status(&self) -> ApiResult<IntegrationStatus>;
}
