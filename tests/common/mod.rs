//! In-process fake services for store tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use actionflow::core::model::{
    ActionItem, CreatedTicket, IntegrationStatus, NewTeamMember, SettingsDocument, TeamMember,
    TeamMemberUpdate, TicketConfig, UploadFile,
};
use actionflow::services::{
    ApiError, ApiResult, ExtractionService, NotificationService, SettingsService, TicketingService,
};
use actionflow::store::NotificationCenter;
use actionflow::{Timing, WorkflowStore};

/// Build an action item for tests.
pub fn item(id: &str, title: &str, assignee: Option<&str>, selected: bool) -> ActionItem {
    ActionItem {
        id: id.to_string(),
        title: title.to_string(),
        assignee: assignee.map(String::from),
        due_date: "Friday".to_string(),
        selected,
        overdue: false,
    }
}

fn api_error(status: u16, message: &str) -> ApiError {
    ApiError::Api { status, message: message.to_string(), detail: None }
}

/// Fake extraction service with a configurable outcome and response delay.
#[derive(Default)]
pub struct FakeExtraction {
    pub items: Mutex<Vec<ActionItem>>,
    pub fail_with: Mutex<Option<(u16, String)>>,
    pub delay: Mutex<Option<Duration>>,
    pub calls: AtomicUsize,
}

impl FakeExtraction {
    pub fn returning(items: Vec<ActionItem>) -> Arc<Self> {
        let fake = Self::default();
        *fake.items.lock() = items;
        Arc::new(fake)
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        let fake = Self::default();
        *fake.fail_with.lock() = Some((status, message.to_string()));
        Arc::new(fake)
    }

    async fn respond(&self) -> ApiResult<Vec<ActionItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some((status, message)) = self.fail_with.lock().clone() {
            return Err(api_error(status, &message));
        }
        Ok(self.items.lock().clone())
    }
}

#[async_trait]
impl ExtractionService for FakeExtraction {
    async fn extract_from_text(&self, _content: &str) -> ApiResult<Vec<ActionItem>> {
        self.respond().await
    }

    async fn extract_from_file(&self, _file: &UploadFile) -> ApiResult<Vec<ActionItem>> {
        self.respond().await
    }
}

/// Fake ticketing service generating `{project}-{456+i}` keys.
#[derive(Default)]
pub struct FakeTicketing {
    /// action id -> assignee copied onto the created ticket.
    pub assignees: Mutex<HashMap<String, Option<String>>>,
    pub fail_with: Mutex<Option<(u16, String)>>,
    pub delay: Mutex<Option<Duration>>,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<(Vec<String>, TicketConfig)>>,
}

impl FakeTicketing {
    pub fn for_items(items: &[ActionItem]) -> Arc<Self> {
        let fake = Self::default();
        *fake.assignees.lock() =
            items.iter().map(|i| (i.id.clone(), i.assignee.clone())).collect();
        Arc::new(fake)
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        let fake = Self::default();
        *fake.fail_with.lock() = Some((status, message.to_string()));
        Arc::new(fake)
    }
}

#[async_trait]
impl TicketingService for FakeTicketing {
    async fn create_tickets(
        &self,
        action_ids: &[String],
        config: &TicketConfig,
    ) -> ApiResult<Vec<CreatedTicket>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock() = Some((action_ids.to_vec(), config.clone()));

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some((status, message)) = self.fail_with.lock().clone() {
            return Err(api_error(status, &message));
        }

        let assignees = self.assignees.lock();
        Ok(action_ids
            .iter()
            .enumerate()
            .map(|(i, id)| CreatedTicket {
                key: format!("{}-{}", config.project, 456 + i),
                assignee: assignees.get(id).cloned().flatten(),
                url: None,
            })
            .collect())
    }
}

/// Fake chat notification service recording every send.
#[derive(Default)]
pub struct FakeNotifier {
    pub sent: Mutex<Vec<(String, String, Option<String>)>>,
    pub reminders: Mutex<Vec<Vec<String>>>,
    /// Assignees whose sends fail.
    pub fail_for: Mutex<Vec<String>>,
}

impl FakeNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent_assignees(&self) -> Vec<String> {
        self.sent.lock().iter().map(|(a, _, _)| a.clone()).collect()
    }
}

#[async_trait]
impl NotificationService for FakeNotifier {
    async fn send(
        &self,
        assignee: &str,
        message: &str,
        ticket_key: Option<&str>,
    ) -> ApiResult<()> {
        if self.fail_for.lock().iter().any(|a| a == assignee) {
            return Err(api_error(502, "chat gateway unavailable"));
        }
        self.sent.lock().push((
            assignee.to_string(),
            message.to_string(),
            ticket_key.map(String::from),
        ));
        Ok(())
    }

    async fn send_reminders(&self, assignees: &[String]) -> ApiResult<()> {
        self.reminders.lock().push(assignees.to_vec());
        Ok(())
    }
}

/// Fake settings service recording persisted writes.
#[derive(Default)]
pub struct FakeSettings {
    pub document: Mutex<SettingsDocument>,
    pub saved: Mutex<Vec<SettingsDocument>>,
    pub members: Mutex<Vec<TeamMember>>,
    pub status: Mutex<Option<IntegrationStatus>>,
    pub fail_get: Mutex<bool>,
    pub fail_update: Mutex<bool>,
    pub fail_team: Mutex<bool>,
    pub fail_status: Mutex<bool>,
    next_id: AtomicUsize,
}

impl FakeSettings {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl SettingsService for FakeSettings {
    async fn get_settings(&self) -> ApiResult<SettingsDocument> {
        if *self.fail_get.lock() {
            return Err(api_error(500, "settings backend down"));
        }
        Ok(self.document.lock().clone())
    }

    async fn update_settings(&self, document: &SettingsDocument) -> ApiResult<SettingsDocument> {
        if *self.fail_update.lock() {
            return Err(api_error(500, "write rejected"));
        }
        *self.document.lock() = document.clone();
        self.saved.lock().push(document.clone());
        Ok(document.clone())
    }

    async fn team_members(&self) -> ApiResult<Vec<TeamMember>> {
        if *self.fail_team.lock() {
            return Err(api_error(500, "team backend down"));
        }
        Ok(self.members.lock().clone())
    }

    async fn add_team_member(&self, member: &NewTeamMember) -> ApiResult<TeamMember> {
        if *self.fail_team.lock() {
            return Err(api_error(422, "duplicate member"));
        }
        let id = format!("tm-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created =
            TeamMember { id, name: member.name.clone(), initials: member.initials.clone() };
        self.members.lock().push(created.clone());
        Ok(created)
    }

    async fn update_team_member(
        &self,
        id: &str,
        update: &TeamMemberUpdate,
    ) -> ApiResult<TeamMember> {
        if *self.fail_team.lock() {
            return Err(api_error(404, "member not found"));
        }
        let mut members = self.members.lock();
        let member = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| api_error(404, "member not found"))?;
        if let Some(name) = &update.name {
            member.name = name.clone();
        }
        if let Some(initials) = &update.initials {
            member.initials = initials.clone();
        }
        Ok(member.clone())
    }

    async fn delete_team_member(&self, id: &str) -> ApiResult<()> {
        if *self.fail_team.lock() {
            return Err(api_error(404, "member not found"));
        }
        self.members.lock().retain(|m| m.id != id);
        Ok(())
    }

    async fn integration_status(&self) -> ApiResult<IntegrationStatus> {
        if *self.fail_status.lock() {
            return Err(api_error(500, "status backend down"));
        }
        self.status.lock().clone().ok_or_else(|| api_error(404, "no status"))
    }
}

/// Bundle of fakes wired into a workflow store with default timing.
pub struct WorkflowHarness {
    pub store: Arc<WorkflowStore>,
    pub extraction: Arc<FakeExtraction>,
    pub ticketing: Arc<FakeTicketing>,
    pub notifier: Arc<FakeNotifier>,
    pub center: NotificationCenter,
}

impl WorkflowHarness {
    pub fn new(extraction: Arc<FakeExtraction>, ticketing: Arc<FakeTicketing>) -> Self {
        let timing = Timing::default();
        let notifier = FakeNotifier::new();
        let center = NotificationCenter::new(timing.display_duration());
        let store = Arc::new(WorkflowStore::new(
            extraction.clone(),
            ticketing.clone(),
            notifier.clone(),
            center.clone(),
            timing,
        ));
        Self { store, extraction, ticketing, notifier, center }
    }
}
