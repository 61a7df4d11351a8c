use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use salesline_application::UpdateCustomerInput;
use salesline_domain::{RecordId, User};

use crate::dto::{CustomerResponse, UpdateCustomerRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_customers_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<Vec<CustomerResponse>>> {
    let customers = state
        .lead_service
        .list_customers(&actor)
        .await?
        .into_iter()
        .map(CustomerResponse::from)
        .collect();

    Ok(Json(customers))
}

pub async fn get_customer_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(customer_id): Path<String>,
) -> ApiResult<Json<CustomerResponse>> {
    let customer = state
        .lead_service
        .get_customer(&actor, customer_id.parse::<RecordId>()?)
        .await?;

    Ok(Json(CustomerResponse::from(customer)))
}

pub async fn update_customer_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(customer_id): Path<String>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> ApiResult<Json<CustomerResponse>> {
    let customer = state
        .lead_service
        .update_customer(
            &actor,
            customer_id.parse::<RecordId>()?,
            UpdateCustomerInput::from(payload),
        )
        .await?;

    Ok(Json(CustomerResponse::from(customer)))
}

pub async fn delete_customer_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(customer_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .lead_service
        .delete_customer(&actor, customer_id.parse::<RecordId>()?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
