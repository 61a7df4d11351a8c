mod activity;
mod auth;
mod common;
mod leads;
mod reports;
mod users;

pub use activity::{
    CalendarEventRequest, CalendarEventResponse, CreateInteractionRequest, CreateTargetRequest,
    InteractionResponse, LogRevenueRequest, RevenueResponse, TargetResponse, UpdateTargetRequest,
};
pub use auth::{AuthBootstrapRequest, AuthLoginRequest};
pub use common::{HealthResponse, parse_date, parse_optional_record_id, parse_timestamp};
pub use leads::{
    AssignLeadRequest, CreateLeadRequest, CustomerResponse, LeadResponse, UpdateCustomerRequest,
    UpdateLeadRequest,
};
pub use reports::{AuditLogEntryResponse, PipelineStageResponse, TargetProgressResponse};
pub use users::{
    CreateUserRequest, ReassignManagerRequest, RolePermissionsResponse, SessionUserResponse,
    UserResponse,
};

#[cfg(test)]
mod tests {
    use super::{
        AssignLeadRequest, AuditLogEntryResponse, AuthBootstrapRequest, AuthLoginRequest,
        CalendarEventRequest, CalendarEventResponse, CreateInteractionRequest,
        CreateLeadRequest, CreateTargetRequest, CreateUserRequest, CustomerResponse,
        HealthResponse, InteractionResponse, LeadResponse, LogRevenueRequest,
        PipelineStageResponse, ReassignManagerRequest, RevenueResponse, RolePermissionsResponse,
        SessionUserResponse,
        TargetProgressResponse, TargetResponse, UpdateCustomerRequest, UpdateLeadRequest,
        UpdateTargetRequest, UserResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        AuthLoginRequest::export(&config)?;
        AuthBootstrapRequest::export(&config)?;
        CreateLeadRequest::export(&config)?;
        UpdateLeadRequest::export(&config)?;
        AssignLeadRequest::export(&config)?;
        UpdateCustomerRequest::export(&config)?;
        CreateTargetRequest::export(&config)?;
        UpdateTargetRequest::export(&config)?;
        LogRevenueRequest::export(&config)?;
        CreateInteractionRequest::export(&config)?;
        CalendarEventRequest::export(&config)?;
        CreateUserRequest::export(&config)?;
        ReassignManagerRequest::export(&config)?;
        LeadResponse::export(&config)?;
        CustomerResponse::export(&config)?;
        TargetResponse::export(&config)?;
        RevenueResponse::export(&config)?;
        InteractionResponse::export(&config)?;
        CalendarEventResponse::export(&config)?;
        UserResponse::export(&config)?;
        SessionUserResponse::export(&config)?;
        RolePermissionsResponse::export(&config)?;
        PipelineStageResponse::export(&config)?;
        TargetProgressResponse::export(&config)?;
        AuditLogEntryResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;

        Ok(())
    }
}
