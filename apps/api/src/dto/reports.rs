use salesline_application::{AuditLogEntry, PipelineStageSummary, TargetProgress};
use serde::Serialize;
use ts_rs::TS;

/// Lead count and value of one pipeline stage.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/pipeline-stage-response.ts"
)]
pub struct PipelineStageResponse {
    pub status: String,
    pub lead_count: u64,
    pub total_value_cents: i64,
}

/// Revenue logged against a user's target for one month.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/target-progress-response.ts"
)]
pub struct TargetProgressResponse {
    pub user_id: String,
    pub target_cents: i64,
    pub achieved_cents: i64,
}

/// API representation of an audit log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-entry-response.ts"
)]
pub struct AuditLogEntryResponse {
    pub entry_id: i64,
    pub actor_id: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub detail: Option<String>,
    pub recorded_at: String,
}

impl From<PipelineStageSummary> for PipelineStageResponse {
    fn from(value: PipelineStageSummary) -> Self {
        Self {
            status: value.status.as_str().to_owned(),
            lead_count: value.lead_count,
            total_value_cents: value.total_value_cents,
        }
    }
}

impl From<TargetProgress> for TargetProgressResponse {
    fn from(value: TargetProgress) -> Self {
        Self {
            user_id: value.user_id.to_string(),
            target_cents: value.target_cents,
            achieved_cents: value.achieved_cents,
        }
    }
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            entry_id: value.entry_id,
            actor_id: value.event.actor_id.to_string(),
            action: value.event.action.as_str().to_owned(),
            resource_type: value.event.resource_type,
            resource_id: value.event.resource_id,
            detail: value.event.detail,
            recorded_at: value.recorded_at.to_rfc3339(),
        }
    }
}
