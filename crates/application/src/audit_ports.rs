use async_trait::async_trait;
use chrono::{DateTime, Utc};
use salesline_core::AppResult;
use salesline_domain::{AuditAction, UserId};

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// User that performed the action.
    pub actor_id: UserId,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

impl AuditEvent {
    /// Builds an event for a CRM resource.
    #[must_use]
    pub fn new(
        actor_id: &UserId,
        action: AuditAction,
        resource_type: &str,
        resource_id: impl ToString,
        detail: Option<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.clone(),
            action,
            resource_type: resource_type.to_owned(),
            resource_id: resource_id.to_string(),
            detail,
        }
    }
}

/// Stored audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// Monotonic entry id.
    pub entry_id: i64,
    /// The recorded event.
    pub event: AuditEvent,
    /// When the event was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;

    /// Lists the most recent entries, newest first.
    async fn list_recent_events(&self, limit: usize) -> AppResult<Vec<AuditLogEntry>>;
}
