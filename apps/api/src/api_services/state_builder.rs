use std::sync::Arc;

use salesline_application::{
    AccessScopeService, AnalyticsService, AuditLogService, CalendarService, LeadService,
    PipelineService, TargetService, UserService,
};
use salesline_domain::RolePermissionSet;
use salesline_infrastructure::Argon2PasswordHasher;

use crate::state::AppState;

mod repositories;

pub use repositories::RepositorySet;

pub fn build_app_state(
    repositories: RepositorySet,
    role_permissions: RolePermissionSet,
    bootstrap_token: String,
) -> AppState {
    let access = AccessScopeService::new(
        Arc::new(role_permissions),
        repositories.user_repository.clone(),
    );

    AppState {
        lead_service: LeadService::new(
            access.clone(),
            repositories.lead_repository.clone(),
            repositories.customer_repository.clone(),
            repositories.audit_repository.clone(),
        ),
        target_service: TargetService::new(
            access.clone(),
            repositories.target_repository.clone(),
            repositories.audit_repository.clone(),
        ),
        pipeline_service: PipelineService::new(
            access.clone(),
            repositories.lead_repository.clone(),
            repositories.revenue_repository.clone(),
            repositories.interaction_repository.clone(),
        ),
        calendar_service: CalendarService::new(
            access.clone(),
            repositories.lead_repository.clone(),
            repositories.calendar_repository.clone(),
        ),
        analytics_service: AnalyticsService::new(
            access.clone(),
            repositories.lead_repository.clone(),
            repositories.revenue_repository.clone(),
            repositories.target_repository.clone(),
        ),
        user_service: UserService::new(
            access.clone(),
            repositories.user_repository.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            repositories.audit_repository.clone(),
            repositories.ownership_repositories.clone(),
        ),
        audit_log_service: AuditLogService::new(access.clone(), repositories.audit_repository),
        access_service: access,
        bootstrap_token,
    }
}
