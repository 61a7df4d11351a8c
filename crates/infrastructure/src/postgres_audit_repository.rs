use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use salesline_application::{AuditEvent, AuditLogEntry, AuditRepository};
use salesline_core::{AppError, AppResult};
use salesline_domain::{AuditAction, UserId};

/// PostgreSQL-backed append-only audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditRow {
    id: i64,
    actor_id: String,
    action: String,
    resource_type: String,
    resource_id: String,
    detail: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditRow> for AuditLogEntry {
    type Error = AppError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let invalid =
            |error: AppError| AppError::Internal(format!("audit entry {} is invalid: {error}", row.id));

        Ok(Self {
            entry_id: row.id,
            event: AuditEvent {
                actor_id: UserId::parse(row.actor_id).map_err(invalid)?,
                action: AuditAction::from_str(&row.action).map_err(invalid)?,
                resource_type: row.resource_type,
                resource_id: row.resource_id,
                detail: row.detail,
            },
            recorded_at: row.created_at,
        })
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                actor_id,
                action,
                resource_type,
                resource_id,
                detail
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.actor_id.as_str())
        .bind(event.action.as_str())
        .bind(event.resource_type)
        .bind(event.resource_id)
        .bind(event.detail)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }

    async fn list_recent_events(&self, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT id, actor_id, action, resource_type, resource_id, detail, created_at
            FROM audit_log_entries
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list audit entries: {error}")))?;

        rows.into_iter().map(AuditLogEntry::try_from).collect()
    }
}
