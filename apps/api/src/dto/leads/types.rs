use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a lead.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/lead-response.ts"
)]
pub struct LeadResponse {
    pub id: String,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub estimated_value_cents: i64,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Incoming payload for lead creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-lead-request.ts"
)]
pub struct CreateLeadRequest {
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub estimated_value_cents: Option<i64>,
    pub assigned_to: Option<String>,
}

/// Incoming payload for lead updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-lead-request.ts"
)]
pub struct UpdateLeadRequest {
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub estimated_value_cents: Option<i64>,
    pub status: Option<String>,
}

/// Incoming payload for lead assignment. `null` returns the lead to the pool.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-lead-request.ts"
)]
pub struct AssignLeadRequest {
    pub assigned_to: Option<String>,
}

/// API representation of a customer.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/customer-response.ts"
)]
pub struct CustomerResponse {
    pub id: String,
    pub lead_id: Option<String>,
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub lifetime_value_cents: i64,
    pub assigned_to: Option<String>,
    pub created_by: Option<String>,
    pub created_at: String,
}

/// Incoming payload for customer updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-customer-request.ts"
)]
pub struct UpdateCustomerRequest {
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub lifetime_value_cents: Option<i64>,
}
