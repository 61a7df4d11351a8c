use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use salesline_application::{CreateLeadInput, UpdateLeadInput};
use salesline_domain::{LeadStatus, RecordId, User, UserId};
use serde::Deserialize;

use crate::dto::{AssignLeadRequest, CreateLeadRequest, CustomerResponse, LeadResponse, UpdateLeadRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeadListQuery {
    pub status: Option<String>,
}

pub async fn list_leads_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Query(query): Query<LeadListQuery>,
) -> ApiResult<Json<Vec<LeadResponse>>> {
    let status = query
        .status
        .as_deref()
        .map(LeadStatus::from_str)
        .transpose()?;

    let leads = state
        .lead_service
        .list_leads(&actor, status)
        .await?
        .into_iter()
        .map(LeadResponse::from)
        .collect();

    Ok(Json(leads))
}

pub async fn get_lead_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(lead_id): Path<String>,
) -> ApiResult<Json<LeadResponse>> {
    let lead = state
        .lead_service
        .get_lead(&actor, lead_id.parse::<RecordId>()?)
        .await?;

    Ok(Json(LeadResponse::from(lead)))
}

pub async fn create_lead_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CreateLeadRequest>,
) -> ApiResult<(StatusCode, Json<LeadResponse>)> {
    let lead = state
        .lead_service
        .create_lead(&actor, CreateLeadInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(LeadResponse::from(lead))))
}

pub async fn update_lead_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(lead_id): Path<String>,
    Json(payload): Json<UpdateLeadRequest>,
) -> ApiResult<Json<LeadResponse>> {
    let lead = state
        .lead_service
        .update_lead(
            &actor,
            lead_id.parse::<RecordId>()?,
            UpdateLeadInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(LeadResponse::from(lead)))
}

pub async fn assign_lead_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(lead_id): Path<String>,
    Json(payload): Json<AssignLeadRequest>,
) -> ApiResult<Json<LeadResponse>> {
    let assignee = payload.assigned_to.map(UserId::parse).transpose()?;
    let lead = state
        .lead_service
        .assign_lead(&actor, lead_id.parse::<RecordId>()?, assignee)
        .await?;

    Ok(Json(LeadResponse::from(lead)))
}

pub async fn delete_lead_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(lead_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .lead_service
        .delete_lead(&actor, lead_id.parse::<RecordId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn convert_lead_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(lead_id): Path<String>,
) -> ApiResult<(StatusCode, Json<CustomerResponse>)> {
    let customer = state
        .lead_service
        .convert_lead(&actor, lead_id.parse::<RecordId>()?)
        .await?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}
