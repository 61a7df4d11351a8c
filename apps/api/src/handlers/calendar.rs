use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use salesline_application::CalendarEventInput;
use salesline_domain::{RecordId, User};
use serde::Deserialize;

use crate::dto::{CalendarEventRequest, CalendarEventResponse, parse_timestamp};
use crate::error::ApiResult;
use crate::state::AppState;

/// RFC 3339 window; events overlapping it are returned.
#[derive(Debug, Deserialize)]
pub struct CalendarWindowQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

pub async fn list_events_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Query(query): Query<CalendarWindowQuery>,
) -> ApiResult<Json<Vec<CalendarEventResponse>>> {
    let from = query.from.as_deref().map(parse_timestamp).transpose()?;
    let to = query.to.as_deref().map(parse_timestamp).transpose()?;

    let events = state
        .calendar_service
        .list_events(&actor, from, to)
        .await?
        .into_iter()
        .map(CalendarEventResponse::from)
        .collect();

    Ok(Json(events))
}

pub async fn get_event_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<CalendarEventResponse>> {
    let event = state
        .calendar_service
        .get_event(&actor, event_id.parse::<RecordId>()?)
        .await?;

    Ok(Json(CalendarEventResponse::from(event)))
}

pub async fn create_event_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CalendarEventRequest>,
) -> ApiResult<(StatusCode, Json<CalendarEventResponse>)> {
    let event = state
        .calendar_service
        .create_event(&actor, CalendarEventInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(CalendarEventResponse::from(event))))
}

pub async fn update_event_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(event_id): Path<String>,
    Json(payload): Json<CalendarEventRequest>,
) -> ApiResult<Json<CalendarEventResponse>> {
    let event = state
        .calendar_service
        .update_event(
            &actor,
            event_id.parse::<RecordId>()?,
            CalendarEventInput::try_from(payload)?,
        )
        .await?;

    Ok(Json(CalendarEventResponse::from(event)))
}

pub async fn delete_event_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(event_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .calendar_service
        .delete_event(&actor, event_id.parse::<RecordId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
