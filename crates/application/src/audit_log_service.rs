use std::sync::Arc;

use salesline_core::AppResult;
use salesline_domain::{Permission, User};

use crate::{AccessScopeService, AuditLogEntry, AuditRepository};

const MAX_AUDIT_PAGE: usize = 500;

/// Read access to the audit log.
#[derive(Clone)]
pub struct AuditLogService {
    access: AccessScopeService,
    audit_repository: Arc<dyn AuditRepository>,
}

impl AuditLogService {
    /// Creates the service.
    #[must_use]
    pub fn new(access: AccessScopeService, audit_repository: Arc<dyn AuditRepository>) -> Self {
        Self {
            access,
            audit_repository,
        }
    }

    /// Lists the most recent entries, capped at 500.
    pub async fn list_entries(&self, actor: &User, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        self.access.require_permission(actor, Permission::AuditView)?;
        self.audit_repository
            .list_recent_events(limit.clamp(1, MAX_AUDIT_PAGE))
            .await
    }
}
