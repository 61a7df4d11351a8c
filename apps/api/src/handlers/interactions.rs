use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use salesline_application::CreateInteractionInput;
use salesline_domain::{RecordId, User};
use serde::Deserialize;

use crate::dto::{CreateInteractionRequest, InteractionResponse, parse_optional_record_id};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InteractionListQuery {
    pub lead_id: Option<String>,
}

pub async fn list_interactions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Query(query): Query<InteractionListQuery>,
) -> ApiResult<Json<Vec<InteractionResponse>>> {
    let lead_id = parse_optional_record_id(query.lead_id)?;

    let interactions = state
        .pipeline_service
        .list_interactions(&actor, lead_id)
        .await?
        .into_iter()
        .map(InteractionResponse::from)
        .collect();

    Ok(Json(interactions))
}

pub async fn get_interaction_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(interaction_id): Path<String>,
) -> ApiResult<Json<InteractionResponse>> {
    let interaction = state
        .pipeline_service
        .get_interaction(&actor, interaction_id.parse::<RecordId>()?)
        .await?;

    Ok(Json(InteractionResponse::from(interaction)))
}

pub async fn create_interaction_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CreateInteractionRequest>,
) -> ApiResult<(StatusCode, Json<InteractionResponse>)> {
    let interaction = state
        .pipeline_service
        .create_interaction(&actor, CreateInteractionInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(InteractionResponse::from(interaction))))
}

pub async fn delete_interaction_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(interaction_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .pipeline_service
        .delete_interaction(&actor, interaction_id.parse::<RecordId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
