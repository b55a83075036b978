//! State containers for the client workflow.
//!
//! Three stores, composed by explicit dependency injection:
//!
//! - [`NotificationCenter`] - single-slot transient message with auto-hide
//! - [`WorkflowStore`] - the capture/review/ticketing state machine
//! - [`SettingsStore`] - preferences and roster with debounced auto-persist
//!
//! Every delayed side effect lives in an owned [`TimerSet`] (or a single
//! retained handle), so resets can cancel everything synchronously.

mod notifications;
mod settings;
mod timers;
mod workflow;

pub use notifications::{NotificationCenter, DEFAULT_ICON, FAILURE_ICON};
pub use settings::SettingsStore;
pub use timers::TimerSet;
pub use workflow::{Step, WorkflowState, WorkflowStore};
