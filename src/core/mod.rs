//! Core types and configuration for Actionflow.

pub mod config;
pub mod model;
pub mod util;

pub use config::{ClientConfig, ConfigError, ConfigResult, Timing};
pub use model::{
    ActionItem, ActionPatch, CreatedTicket, DefaultSettings, ExtractInput, InputKind,
    IntegrationStatus, NewTeamMember, NotificationSettings, ReminderSettings, SettingsDocument,
    TeamMember, TeamMemberUpdate, TicketConfig, UploadFile,
};
pub use util::{initials, unique_assignees};
