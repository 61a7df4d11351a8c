use salesline_application::{
    AccessScopeService, AnalyticsService, AuditLogService, CalendarService, LeadService,
    PipelineService, TargetService, UserService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessScopeService,
    pub lead_service: LeadService,
    pub target_service: TargetService,
    pub pipeline_service: PipelineService,
    pub calendar_service: CalendarService,
    pub analytics_service: AnalyticsService,
    pub user_service: UserService,
    pub audit_log_service: AuditLogService,
    pub bootstrap_token: String,
}
