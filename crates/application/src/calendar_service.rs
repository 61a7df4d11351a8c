use std::sync::Arc;

use chrono::{DateTime, Utc};
use salesline_core::AppResult;
use salesline_domain::{CalendarEvent, Lead, Permission, RecordId, ResourceAction, User};

use crate::{AccessScopeService, RecordRepository, RecordScope};

/// Input payload for creating or rescheduling a calendar event.
#[derive(Debug, Clone)]
pub struct CalendarEventInput {
    /// Event title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Start time.
    pub starts_at: DateTime<Utc>,
    /// End time.
    pub ends_at: DateTime<Utc>,
    /// Related lead, which must be visible to the actor.
    pub lead_id: Option<RecordId>,
}

/// Application service for calendar events.
#[derive(Clone)]
pub struct CalendarService {
    access: AccessScopeService,
    leads: RecordScope<Lead>,
    events: RecordScope<CalendarEvent>,
}

impl CalendarService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        access: AccessScopeService,
        lead_repository: Arc<dyn RecordRepository<Lead>>,
        event_repository: Arc<dyn RecordRepository<CalendarEvent>>,
    ) -> Self {
        Self {
            leads: RecordScope::new(access.clone(), lead_repository),
            events: RecordScope::new(access.clone(), event_repository),
            access,
        }
    }

    /// Lists visible events overlapping the optional window, by start time.
    pub async fn list_events(
        &self,
        actor: &User,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<CalendarEvent>> {
        let mut events: Vec<CalendarEvent> = self
            .events
            .list(actor)
            .await?
            .into_iter()
            .filter(|event| from.is_none_or(|from| event.ends_at() >= from))
            .filter(|event| to.is_none_or(|to| event.starts_at() <= to))
            .collect();
        events.sort_by_key(CalendarEvent::starts_at);
        Ok(events)
    }

    /// Loads one event.
    pub async fn get_event(&self, actor: &User, event_id: RecordId) -> AppResult<CalendarEvent> {
        self.events.get(actor, event_id).await
    }

    /// Creates an event owned by the actor.
    pub async fn create_event(
        &self,
        actor: &User,
        input: CalendarEventInput,
    ) -> AppResult<CalendarEvent> {
        self.access
            .require_permission(actor, Permission::CalendarManage)?;
        if let Some(lead_id) = input.lead_id {
            self.leads.get(actor, lead_id).await?;
        }

        let event = CalendarEvent::new(
            input.title,
            input.description,
            input.starts_at,
            input.ends_at,
            input.lead_id,
            actor.id().clone(),
        )?;
        self.events.insert(actor, event).await
    }

    /// Changes title, description and time window.
    pub async fn update_event(
        &self,
        actor: &User,
        event_id: RecordId,
        input: CalendarEventInput,
    ) -> AppResult<CalendarEvent> {
        let mut event = self
            .events
            .get_for(actor, event_id, ResourceAction::Edit)
            .await?;
        event.reschedule(input.title, input.description, input.starts_at, input.ends_at)?;
        self.events.save(event).await
    }

    /// Deletes an event.
    pub async fn delete_event(&self, actor: &User, event_id: RecordId) -> AppResult<()> {
        self.events.delete(actor, event_id).await?;
        Ok(())
    }
}
