use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use salesline_application::CreateTargetInput;
use salesline_domain::{RecordId, TargetPeriod, User};
use serde::Deserialize;

use crate::dto::{CreateTargetRequest, TargetResponse, UpdateTargetRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TargetListQuery {
    pub period: Option<String>,
}

pub async fn list_targets_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Query(query): Query<TargetListQuery>,
) -> ApiResult<Json<Vec<TargetResponse>>> {
    let period = query
        .period
        .as_deref()
        .map(TargetPeriod::from_str)
        .transpose()?;

    let targets = state
        .target_service
        .list_targets(&actor, period)
        .await?
        .into_iter()
        .map(TargetResponse::from)
        .collect();

    Ok(Json(targets))
}

pub async fn get_target_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(target_id): Path<String>,
) -> ApiResult<Json<TargetResponse>> {
    let target = state
        .target_service
        .get_target(&actor, target_id.parse::<RecordId>()?)
        .await?;

    Ok(Json(TargetResponse::from(target)))
}

pub async fn create_target_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CreateTargetRequest>,
) -> ApiResult<(StatusCode, Json<TargetResponse>)> {
    let target = state
        .target_service
        .create_target(&actor, CreateTargetInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(TargetResponse::from(target))))
}

pub async fn update_target_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(target_id): Path<String>,
    Json(payload): Json<UpdateTargetRequest>,
) -> ApiResult<Json<TargetResponse>> {
    let target = state
        .target_service
        .update_target(&actor, target_id.parse::<RecordId>()?, payload.amount_cents)
        .await?;

    Ok(Json(TargetResponse::from(target)))
}

pub async fn delete_target_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(target_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .target_service
        .delete_target(&actor, target_id.parse::<RecordId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
