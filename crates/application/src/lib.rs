//! Application services and ports.

#![forbid(unsafe_code)]

mod access_guard;
mod access_scope_service;
mod analytics_service;
mod audit_log_service;
mod audit_ports;
mod calendar_service;
mod lead_service;
mod pipeline_service;
mod record_ports;
mod record_scope;
mod target_service;
mod team_resolver;
mod user_ports;
mod user_service;

#[cfg(test)]
mod test_support;

pub use access_guard::AccessGuard;
pub use access_scope_service::{AccessScopeService, access_denied};
pub use analytics_service::{AnalyticsService, PipelineStageSummary, TargetProgress};
pub use audit_log_service::AuditLogService;
pub use audit_ports::{AuditEvent, AuditLogEntry, AuditRepository};
pub use calendar_service::{CalendarEventInput, CalendarService};
pub use lead_service::{CreateLeadInput, LeadService, UpdateCustomerInput, UpdateLeadInput};
pub use pipeline_service::{CreateInteractionInput, LogRevenueInput, PipelineService};
pub use record_ports::{RecordOwnershipRepository, RecordRepository};
pub use record_scope::RecordScope;
pub use target_service::{CreateTargetInput, TargetService};
pub use team_resolver::TeamResolver;
pub use user_ports::{PasswordHasher, UserCredentials, UserRepository};
pub use user_service::{BootstrapAdminInput, CreateUserInput, UserService};
