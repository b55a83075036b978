//! Domain types shared across stores and services.
//!
//! Field names mirror the backend's JSON payloads (snake_case), so most of
//! these types serialize directly onto the wire.

use serde::{Deserialize, Serialize};

/// A candidate action item extracted from meeting input.
///
/// `id` is unique within the current action list and stays stable for the
/// lifetime of the review step. List order is the extraction service's
/// response order and is preserved through edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Stable identifier from the extraction service.
    pub id: String,
    /// Free-text description, user-editable.
    pub title: String,
    /// Assigned team member's display name; `None` means unassigned.
    pub assignee: Option<String>,
    /// Display-formatted due date. No timezone arithmetic happens client-side.
    pub due_date: String,
    /// Whether the item is included in ticket creation. Defaults to true.
    pub selected: bool,
    /// Computed by the extraction service, display-only.
    pub overdue: bool,
}

/// Partial update for a single action item.
///
/// Only fields that are `Some` are applied. The assignee is doubly optional
/// so a caller can explicitly clear it (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct ActionPatch {
    /// New title.
    pub title: Option<String>,
    /// New assignee; `Some(None)` clears the assignment.
    pub assignee: Option<Option<String>>,
    /// New due date.
    pub due_date: Option<String>,
    /// New selection state.
    pub selected: Option<bool>,
}

impl ActionPatch {
    /// Apply this patch to an item, leaving unsupplied fields untouched.
    pub fn apply(self, item: &mut ActionItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(assignee) = self.assignee {
            item.assignee = assignee;
        }
        if let Some(due_date) = self.due_date {
            item.due_date = due_date;
        }
        if let Some(selected) = self.selected {
            item.selected = selected;
        }
    }
}

/// A ticket created in the external tracker for one action item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTicket {
    /// Tracker-generated key, format `{project}-{sequence}`.
    pub key: String,
    /// Copied from the source action item.
    pub assignee: Option<String>,
    /// Link to the created ticket, when the tracker provides one.
    pub url: Option<String>,
}

/// Ticket creation configuration sent to the tracker.
///
/// Only a non-empty project key is validated client-side; anything else is
/// the tracker's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Tracker project key.
    pub project: String,
    /// Issue type for created tickets.
    pub issue_type: String,
    /// Label applied to created tickets.
    pub label: String,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            project: "SANAS".to_string(),
            issue_type: "Task".to_string(),
            label: "meeting-action".to_string(),
        }
    }
}

/// A file supplied for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, forwarded to the extraction service.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Create an upload from a name and contents.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }
}

/// Kind of input captured for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Pasted meeting notes.
    Text,
    /// Uploaded file.
    File,
}

/// Input to the extraction step.
#[derive(Debug, Clone)]
pub enum ExtractInput {
    /// Raw meeting notes.
    Text {
        /// The pasted text.
        content: String,
    },
    /// An uploaded file.
    File {
        /// The file to extract from.
        file: UploadFile,
    },
}

impl ExtractInput {
    /// The kind of this input.
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Text { .. } => InputKind::Text,
            Self::File { .. } => InputKind::File,
        }
    }
}

/// Reminder scheduling preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Whether reminders are sent at all.
    pub enabled: bool,
    /// How often reminders go out.
    pub frequency: String,
    /// Day of week for weekly reminders.
    pub day: String,
    /// Local time of day, display format.
    pub time: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency: "Weekly".to_string(),
            day: "Monday".to_string(),
            time: "9:00 AM".to_string(),
        }
    }
}

/// Notification toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Notify assignees when a ticket is created.
    pub on_create: bool,
    /// Warn assignees about overdue items.
    pub overdue_warnings: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { on_create: true, overdue_warnings: true }
    }
}

/// Default values used to prefill ticket creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Default tracker project key.
    pub project: String,
    /// Default issue type.
    pub issue_type: String,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self { project: "SANAS".to_string(), issue_type: "Task".to_string() }
    }
}

/// The full persisted settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    /// Reminder scheduling.
    pub reminders: ReminderSettings,
    /// Notification toggles.
    pub notifications: NotificationSettings,
    /// Ticket creation defaults.
    pub defaults: DefaultSettings,
}

/// A member of the team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Backend-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short initials shown in avatars.
    pub initials: String,
}

/// Fields for creating a team member.
#[derive(Debug, Clone, Serialize)]
pub struct NewTeamMember {
    /// Display name.
    pub name: String,
    /// Short initials shown in avatars.
    pub initials: String,
}

impl NewTeamMember {
    /// Build a new member, deriving initials from the name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let initials = super::util::initials(&name);
        Self { name, initials }
    }
}

/// Partial update for a team member.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamMemberUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New initials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
}

/// Connection status of the external integrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationStatus {
    /// Whether the issue tracker connection is configured and live.
    pub tracker_connected: bool,
    /// Whether the chat workspace connection is configured and live.
    pub chat_connected: bool,
    /// Connected tracker project, if any.
    pub tracker_project: Option<String>,
    /// Connected chat workspace, if any.
    pub chat_workspace: Option<String>,
}
