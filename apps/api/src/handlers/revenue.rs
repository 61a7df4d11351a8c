use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use salesline_application::LogRevenueInput;
use salesline_domain::{RecordId, User};
use serde::Deserialize;

use crate::dto::{LogRevenueRequest, RevenueResponse, parse_date};
use crate::error::ApiResult;
use crate::state::AppState;

/// Inclusive `YYYY-MM-DD` bounds.
#[derive(Debug, Deserialize)]
pub struct RevenueListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn list_revenue_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Query(query): Query<RevenueListQuery>,
) -> ApiResult<Json<Vec<RevenueResponse>>> {
    let from = query.from.as_deref().map(parse_date).transpose()?;
    let to = query.to.as_deref().map(parse_date).transpose()?;

    let entries = state
        .pipeline_service
        .list_revenue(&actor, from, to)
        .await?
        .into_iter()
        .map(RevenueResponse::from)
        .collect();

    Ok(Json(entries))
}

pub async fn get_revenue_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(revenue_id): Path<String>,
) -> ApiResult<Json<RevenueResponse>> {
    let entry = state
        .pipeline_service
        .get_revenue(&actor, revenue_id.parse::<RecordId>()?)
        .await?;

    Ok(Json(RevenueResponse::from(entry)))
}

pub async fn log_revenue_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<LogRevenueRequest>,
) -> ApiResult<(StatusCode, Json<RevenueResponse>)> {
    let entry = state
        .pipeline_service
        .log_revenue(&actor, LogRevenueInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(RevenueResponse::from(entry))))
}

pub async fn delete_revenue_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(revenue_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .pipeline_service
        .delete_revenue(&actor, revenue_id.parse::<RecordId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
