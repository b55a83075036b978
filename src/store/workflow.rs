//! The action extraction and ticketing workflow state machine.
//!
//! Owns the three-step sequence: capture input, review extracted action
//! items, create tickets. Coordinates the extraction, ticketing and chat
//! notification services, and owns every timer it schedules so `reset` can
//! guarantee no side effect leaks across it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::notifications::{NotificationCenter, FAILURE_ICON};
use super::timers::TimerSet;
use crate::core::config::Timing;
use crate::core::model::{
    ActionItem, ActionPatch, CreatedTicket, ExtractInput, InputKind, TicketConfig, UploadFile,
};
use crate::core::util::unique_assignees;
use crate::services::{ApiResult, ExtractionService, NotificationService, TicketingService};

/// Workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Capturing meeting input.
    Capture,
    /// Extracting, then reviewing the action list.
    Review,
    /// Tickets created.
    Done,
}

impl Step {
    /// Step number as displayed in the UI (1-based).
    pub const fn number(self) -> u8 {
        match self {
            Self::Capture => 1,
            Self::Review => 2,
            Self::Done => 3,
        }
    }
}

/// Message sent to each assignee after ticket creation.
const ASSIGNMENT_MESSAGE: &str = "You have been assigned a new action item";

/// Fallback error shown when extraction fails without a service message.
const EXTRACT_FALLBACK: &str = "Failed to extract action items";

/// Fallback error shown when ticket creation fails without a service message.
const TICKETS_FALLBACK: &str = "Failed to create tickets";

/// Mutable workflow state, snapshot-cloneable for assertions and rendering.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    /// Current step.
    pub current_step: Step,
    /// Whether a service call is in flight.
    pub loading: bool,
    /// Last user-displayable error, if any.
    pub error: Option<String>,
    /// Raw pasted notes (retained across an extraction failure).
    pub meeting_text: String,
    /// Uploaded file (retained across an extraction failure).
    pub uploaded_file: Option<UploadFile>,
    /// Which kind of input was captured.
    pub input_type: Option<InputKind>,
    /// Extracted action items, in service response order.
    pub actions: Vec<ActionItem>,
    /// Tickets from the most recent creation, replaced on each call.
    pub created_tickets: Vec<CreatedTicket>,
    /// Ticket creation configuration.
    pub config: TicketConfig,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            current_step: Step::Capture,
            loading: false,
            error: None,
            meeting_text: String::new(),
            uploaded_file: None,
            input_type: None,
            actions: Vec::new(),
            created_tickets: Vec::new(),
            config: TicketConfig::default(),
        }
    }
}

/// The workflow store.
///
/// Construct one per application session and share it by reference; services
/// and the notification center are injected rather than reached through
/// globals.
pub struct WorkflowStore {
    state: Arc<Mutex<WorkflowState>>,
    // Bumped on reset so a late service response cannot repopulate state.
    generation: AtomicU64,
    timers: TimerSet,
    center: NotificationCenter,
    extraction: Arc<dyn ExtractionService>,
    ticketing: Arc<dyn TicketingService>,
    notifier: Arc<dyn NotificationService>,
    timing: Timing,
}

impl WorkflowStore {
    /// Create a store wired to the given services and notification center.
    pub fn new(
        extraction: Arc<dyn ExtractionService>,
        ticketing: Arc<dyn TicketingService>,
        notifier: Arc<dyn NotificationService>,
        center: NotificationCenter,
        timing: Timing,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(WorkflowState::default())),
            generation: AtomicU64::new(0),
            timers: TimerSet::new(),
            center,
            extraction,
            ticketing,
            notifier,
            timing,
        }
    }

    /// Extract action items from the given input.
    ///
    /// Blank text is rejected silently with no state change. On acceptance
    /// the step moves to [`Step::Review`] and `loading` turns on before the
    /// service call is issued; an extraction failure rolls the step back to
    /// [`Step::Capture`] while keeping the captured input for resubmission.
    pub async fn extract_actions(&self, input: ExtractInput) {
        if let ExtractInput::Text { content } = &input {
            if content.trim().is_empty() {
                return;
            }
        }

        {
            let mut state = self.state.lock();
            state.input_type = Some(input.kind());
            match &input {
                ExtractInput::Text { content } => state.meeting_text = content.clone(),
                ExtractInput::File { file } => state.uploaded_file = Some(file.clone()),
            }
            state.current_step = Step::Review;
            state.loading = true;
            state.error = None;
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let result = match &input {
            ExtractInput::Text { content } => self.extraction.extract_from_text(content).await,
            ExtractInput::File { file } => self.extraction.extract_from_file(file).await,
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            // Reset happened while the call was in flight; drop the response.
            return;
        }

        let mut state = self.state.lock();
        match result {
            Ok(items) => {
                state.actions = items;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to extract actions");
                state.error = Some(err.display_message(EXTRACT_FALLBACK));
                state.current_step = Step::Capture;
            }
        }
        state.loading = false;
    }

    /// Create tickets for the selected action items.
    ///
    /// A no-op when nothing is selected or the project key is empty. On
    /// success the step moves to [`Step::Done`] and assignee notifications
    /// are scheduled; on failure the store stays in [`Step::Review`].
    pub async fn create_tickets(&self) {
        let (selected, config) = {
            let mut state = self.state.lock();
            let selected: Vec<ActionItem> =
                state.actions.iter().filter(|a| a.selected).cloned().collect();
            if selected.is_empty() || state.config.project.trim().is_empty() {
                return;
            }
            state.loading = true;
            state.error = None;
            (selected, state.config.clone())
        };

        let action_ids: Vec<String> = selected.iter().map(|a| a.id.clone()).collect();

        let generation = self.generation.load(Ordering::SeqCst);
        let result = self.ticketing.create_tickets(&action_ids, &config).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }

        match result {
            Ok(tickets) => {
                {
                    let mut state = self.state.lock();
                    state.created_tickets = tickets;
                    state.current_step = Step::Done;
                    state.loading = false;
                }
                self.schedule_assignee_notifications(&selected);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to create tickets");
                let mut state = self.state.lock();
                state.error = Some(err.display_message(TICKETS_FALLBACK));
                state.loading = false;
            }
        }
    }

    /// Schedule one staggered chat notification per distinct assignee.
    fn schedule_assignee_notifications(&self, selected: &[ActionItem]) {
        let assignees = unique_assignees(selected);

        for (i, assignee) in assignees.into_iter().enumerate() {
            let delay = self.timing.stagger_delay() * u32::try_from(i).unwrap_or(u32::MAX);
            let state = Arc::clone(&self.state);
            let notifier = Arc::clone(&self.notifier);
            let center = self.center.clone();

            self.timers.schedule(delay, async move {
                let ticket_key = state
                    .lock()
                    .created_tickets
                    .iter()
                    .find(|t| t.assignee.as_deref() == Some(assignee.as_str()))
                    .map(|t| t.key.clone());

                match notifier.send(&assignee, ASSIGNMENT_MESSAGE, ticket_key.as_deref()).await {
                    Ok(()) => {
                        center.show(format!("Slack notification sent to {assignee}"), None);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, assignee = %assignee, "failed to notify");
                        center.show(format!("Failed to notify {assignee}"), Some(FAILURE_ICON));
                    }
                }
            });
        }
    }

    /// Send reminder notifications to the given assignees in one batch.
    ///
    /// A no-op for an empty list. Success is surfaced through the
    /// notification center; failures propagate to the caller.
    pub async fn send_reminders(&self, assignees: &[String]) -> ApiResult<()> {
        if assignees.is_empty() {
            return Ok(());
        }
        self.notifier.send_reminders(assignees).await?;
        self.center.show(format!("Reminders sent to {} assignees", assignees.len()), None);
        Ok(())
    }

    /// Flip `selected` on the item at `index`. Out-of-range is a no-op.
    pub fn toggle_action(&self, index: usize) {
        let mut state = self.state.lock();
        if let Some(item) = state.actions.get_mut(index) {
            item.selected = !item.selected;
        }
    }

    /// Select all items, or deselect all when every item is already selected.
    pub fn toggle_all_actions(&self) {
        let mut state = self.state.lock();
        let all_selected = state.actions.iter().all(|a| a.selected);
        for item in &mut state.actions {
            item.selected = !all_selected;
        }
    }

    /// Remove the item at `index`, preserving the order and ids of the rest.
    pub fn remove_action(&self, index: usize) {
        let mut state = self.state.lock();
        if index < state.actions.len() {
            state.actions.remove(index);
        }
    }

    /// Merge the supplied patch fields into the item at `index`.
    pub fn update_action(&self, index: usize, patch: ActionPatch) {
        let mut state = self.state.lock();
        if let Some(item) = state.actions.get_mut(index) {
            patch.apply(item);
        }
    }

    /// Return to [`Step::Capture`], cancelling every pending timer and
    /// clearing all workflow state. The ticket configuration survives.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.timers.cancel_all();

        let mut state = self.state.lock();
        state.current_step = Step::Capture;
        state.loading = false;
        state.error = None;
        state.meeting_text.clear();
        state.uploaded_file = None;
        state.input_type = None;
        state.actions.clear();
        state.created_tickets.clear();
    }

    /// Replace the ticket creation configuration.
    pub fn set_config(&self, config: TicketConfig) {
        self.state.lock().config = config;
    }

    /// Snapshot of the full workflow state.
    pub fn snapshot(&self) -> WorkflowState {
        self.state.lock().clone()
    }

    /// Current step.
    pub fn current_step(&self) -> Step {
        self.state.lock().current_step
    }

    /// Whether a service call is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Last user-displayable error.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// The current action list.
    pub fn actions(&self) -> Vec<ActionItem> {
        self.state.lock().actions.clone()
    }

    /// Tickets from the most recent creation.
    pub fn created_tickets(&self) -> Vec<CreatedTicket> {
        self.state.lock().created_tickets.clone()
    }

    /// Number of pending notification timers.
    pub fn pending_notifications(&self) -> usize {
        self.timers.pending()
    }

    /// Wait for all scheduled notification dispatches to finish.
    ///
    /// Used by callers (e.g. the CLI) that need the fan-out to complete
    /// before exiting.
    pub async fn wait_for_notifications(&self) {
        self.timers.wait_idle().await;
    }

    /// The notification center this store pushes transient messages to.
    pub fn notification_center(&self) -> &NotificationCenter {
        &self.center
    }
}
