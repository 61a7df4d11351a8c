use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a monthly target.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/target-response.ts"
)]
pub struct TargetResponse {
    pub id: String,
    pub user_id: String,
    /// Calendar month, `YYYY-MM`.
    pub period: String,
    pub amount_cents: i64,
    pub created_by: String,
    pub created_at: String,
}

/// Incoming payload for target creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-target-request.ts"
)]
pub struct CreateTargetRequest {
    pub user_id: String,
    pub period: String,
    pub amount_cents: i64,
}

/// Incoming payload for target updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-target-request.ts"
)]
pub struct UpdateTargetRequest {
    pub amount_cents: i64,
}

/// API representation of a daily revenue entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/revenue-response.ts"
)]
pub struct RevenueResponse {
    pub id: String,
    pub user_id: String,
    pub revenue_date: String,
    pub amount_cents: i64,
    pub lead_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Incoming payload for logging revenue. `user_id` defaults to the caller.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/log-revenue-request.ts"
)]
pub struct LogRevenueRequest {
    pub user_id: Option<String>,
    pub revenue_date: String,
    pub amount_cents: i64,
    pub lead_id: Option<String>,
    pub notes: Option<String>,
}

/// API representation of a lead interaction.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/interaction-response.ts"
)]
pub struct InteractionResponse {
    pub id: String,
    pub lead_id: String,
    pub user_id: String,
    pub kind: String,
    pub notes: String,
    pub occurred_at: String,
}

/// Incoming payload for recording an interaction.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-interaction-request.ts"
)]
pub struct CreateInteractionRequest {
    pub lead_id: String,
    pub kind: String,
    pub notes: String,
    pub occurred_at: Option<String>,
}

/// API representation of a calendar event.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/calendar-event-response.ts"
)]
pub struct CalendarEventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    pub lead_id: Option<String>,
    pub created_by: String,
}

/// Incoming payload for creating or rescheduling a calendar event.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/calendar-event-request.ts"
)]
pub struct CalendarEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    pub lead_id: Option<String>,
}
