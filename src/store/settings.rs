//! User settings and team roster, with debounced auto-persist.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

use crate::core::model::{
    IntegrationStatus, NewTeamMember, SettingsDocument, TeamMember, TeamMemberUpdate,
};
use crate::services::{ApiResult, SettingsService};

/// Fallback error shown when loading settings fails without a service message.
const LOAD_FALLBACK: &str = "Failed to load settings";

/// Fallback error shown when persisting settings fails without a service message.
const SAVE_FALLBACK: &str = "Failed to save settings";

#[derive(Debug, Default)]
struct SettingsState {
    document: SettingsDocument,
    team_members: Vec<TeamMember>,
    integration_status: Option<IntegrationStatus>,
    initialized: bool,
    error: Option<String>,
}

/// Settings store.
///
/// Edits go through [`SettingsStore::update`], which schedules a debounced
/// save: a burst of edits collapses into a single persisted write after the
/// burst settles. The `initialized` flag gates saving so the initial load
/// never triggers a persist. Team roster CRUD is immediate (not debounced)
/// and optimistic on success only; failures propagate to the caller.
pub struct SettingsStore {
    state: Arc<Mutex<SettingsState>>,
    service: Arc<dyn SettingsService>,
    save_timer: Mutex<Option<AbortHandle>>,
    debounce: Duration,
}

impl SettingsStore {
    /// Create a store backed by the given service.
    pub fn new(service: Arc<dyn SettingsService>, debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SettingsState::default())),
            service,
            save_timer: Mutex::new(None),
            debounce,
        }
    }

    /// Fetch persisted settings and mark the store initialized.
    ///
    /// On failure the store keeps defaults and stays uninitialized, so a
    /// later save cannot clobber the backend with values that were never
    /// loaded.
    pub async fn load_settings(&self) {
        match self.service.get_settings().await {
            Ok(document) => {
                let mut state = self.state.lock();
                state.document = document;
                state.initialized = true;
                state.error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load settings");
                self.state.lock().error = Some(err.display_message(LOAD_FALLBACK));
            }
        }
    }

    /// Apply an edit to the settings document and schedule a debounced save.
    pub fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut SettingsDocument),
    {
        {
            let mut state = self.state.lock();
            edit(&mut state.document);
        }
        self.schedule_save();
    }

    /// (Re)start the save debounce timer. No-op before the initial load.
    fn schedule_save(&self) {
        if !self.state.lock().initialized {
            return;
        }

        if let Some(pending) = self.save_timer.lock().take() {
            pending.abort();
        }

        let state = Arc::clone(&self.state);
        let service = Arc::clone(&self.service);
        let debounce = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            Self::persist(&state, &service).await;
        });
        *self.save_timer.lock() = Some(handle.abort_handle());
    }

    /// Persist the settings document immediately, cancelling any pending
    /// debounced save. No-op before the initial load.
    pub async fn save_settings(&self) {
        if !self.state.lock().initialized {
            return;
        }
        if let Some(pending) = self.save_timer.lock().take() {
            pending.abort();
        }
        Self::persist(&self.state, &self.service).await;
    }

    async fn persist(state: &Arc<Mutex<SettingsState>>, service: &Arc<dyn SettingsService>) {
        let document = {
            let state = state.lock();
            if !state.initialized {
                return;
            }
            state.document.clone()
        };

        match service.update_settings(&document).await {
            Ok(_) => {
                state.lock().error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save settings");
                state.lock().error = Some(err.display_message(SAVE_FALLBACK));
            }
        }
    }

    /// Fetch the team roster. Failures are logged and leave the prior roster.
    pub async fn load_team_members(&self) {
        match self.service.team_members().await {
            Ok(members) => self.state.lock().team_members = members,
            Err(err) => {
                tracing::error!(error = %err, "failed to load team members");
            }
        }
    }

    /// Fetch the integration connection status. Failures are logged and
    /// leave the prior snapshot.
    pub async fn load_integration_status(&self) {
        match self.service.integration_status().await {
            Ok(status) => self.state.lock().integration_status = Some(status),
            Err(err) => {
                tracing::error!(error = %err, "failed to load integration status");
            }
        }
    }

    /// Add a team member. The roster is updated on success only.
    pub async fn add_team_member(&self, member: NewTeamMember) -> ApiResult<TeamMember> {
        let created = self.service.add_team_member(&member).await?;
        self.state.lock().team_members.push(created.clone());
        Ok(created)
    }

    /// Update a team member. The roster is updated on success only.
    pub async fn update_team_member(
        &self,
        id: &str,
        update: TeamMemberUpdate,
    ) -> ApiResult<TeamMember> {
        let updated = self.service.update_team_member(id, &update).await?;
        let mut state = self.state.lock();
        if let Some(member) = state.team_members.iter_mut().find(|m| m.id == id) {
            *member = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a team member. The roster is updated on success only.
    pub async fn delete_team_member(&self, id: &str) -> ApiResult<()> {
        self.service.delete_team_member(id).await?;
        self.state.lock().team_members.retain(|m| m.id != id);
        Ok(())
    }

    /// Snapshot of the settings document.
    pub fn document(&self) -> SettingsDocument {
        self.state.lock().document.clone()
    }

    /// Snapshot of the team roster.
    pub fn team_members(&self) -> Vec<TeamMember> {
        self.state.lock().team_members.clone()
    }

    /// The most recently loaded integration status.
    pub fn integration_status(&self) -> Option<IntegrationStatus> {
        self.state.lock().integration_status.clone()
    }

    /// Whether the initial settings load has completed.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    /// Last store-level error, if any.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }
}
