//! # Actionflow
//!
//! Turn meeting notes into tracked action items and issue-tracker tickets.
//!
//! Actionflow is the client side of the workflow: it captures meeting input,
//! asks a backend service to extract candidate action items, lets the user
//! review and edit the list, then creates tickets for the selected items and
//! notifies assignees over chat.
//!
//! ## Architecture
//!
//! - [`store`] - the state containers: the workflow state machine, the
//!   single-slot notification center, and the auto-persisting settings store
//! - [`services`] - trait seams for the extraction, ticketing, notification
//!   and settings backends, plus their JSON-over-HTTP implementations
//! - [`core`] - domain types, shared helpers, and client configuration

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod core;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use core::{
    ActionItem, ActionPatch, ClientConfig, CreatedTicket, ExtractInput, InputKind,
    IntegrationStatus, NewTeamMember, SettingsDocument, TeamMember, TeamMemberUpdate, TicketConfig,
    Timing, UploadFile,
};
pub use services::{
    ApiClient, ApiError, ApiResult, ExtractionService, HttpExtractionService,
    HttpNotificationService, HttpSettingsService, HttpTicketingService, NotificationService,
    SettingsService, TicketingService,
};
pub use store::{NotificationCenter, SettingsStore, Step, WorkflowStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "actionflow";
