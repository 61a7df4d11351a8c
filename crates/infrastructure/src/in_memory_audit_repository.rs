use async_trait::async_trait;
use chrono::Utc;
use salesline_application::{AuditEvent, AuditLogEntry, AuditRepository};
use salesline_core::AppResult;
use tokio::sync::RwLock;

/// In-memory append-only audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let entry_id = entries.len() as i64 + 1;

        entries.push(AuditLogEntry {
            entry_id,
            event,
            recorded_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_recent_events(&self, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use salesline_application::{AuditEvent, AuditRepository};
    use salesline_core::AppResult;
    use salesline_domain::{AuditAction, UserId};

    use super::InMemoryAuditRepository;

    #[tokio::test]
    async fn recent_events_come_newest_first() -> AppResult<()> {
        let repository = InMemoryAuditRepository::new();
        let actor = UserId::parse("root")?;
        for (action, resource_id) in [
            (AuditAction::LeadCreated, "l1"),
            (AuditAction::LeadAssigned, "l1"),
            (AuditAction::LeadDeleted, "l1"),
        ] {
            repository
                .append_event(AuditEvent::new(&actor, action, "lead", resource_id, None))
                .await?;
        }

        let recent = repository.list_recent_events(2).await?;
        let actions: Vec<AuditAction> = recent.iter().map(|entry| entry.event.action).collect();
        assert_eq!(actions, vec![AuditAction::LeadDeleted, AuditAction::LeadAssigned]);
        assert_eq!(recent[0].entry_id, 3);
        Ok(())
    }
}
