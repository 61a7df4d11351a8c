use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Query, State};
use chrono::Utc;
use salesline_domain::{TargetPeriod, User};
use serde::Deserialize;

use crate::dto::{PipelineStageResponse, TargetProgressResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// `YYYY-MM`; defaults to the current month.
#[derive(Debug, Deserialize)]
pub struct TargetProgressQuery {
    pub period: Option<String>,
}

pub async fn pipeline_summary_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<Vec<PipelineStageResponse>>> {
    let stages = state
        .analytics_service
        .pipeline_summary(&actor)
        .await?
        .into_iter()
        .map(PipelineStageResponse::from)
        .collect();

    Ok(Json(stages))
}

pub async fn target_progress_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Query(query): Query<TargetProgressQuery>,
) -> ApiResult<Json<Vec<TargetProgressResponse>>> {
    let period = match query.period.as_deref() {
        Some(period) => TargetPeriod::from_str(period)?,
        None => TargetPeriod::containing(Utc::now().date_naive()),
    };

    let progress = state
        .analytics_service
        .target_progress(&actor, period)
        .await?
        .into_iter()
        .map(TargetProgressResponse::from)
        .collect();

    Ok(Json(progress))
}
