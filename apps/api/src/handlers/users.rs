use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use salesline_application::CreateUserInput;
use salesline_domain::{Role, User, UserId};

use crate::dto::{
    CreateUserRequest, ReassignManagerRequest, RolePermissionsResponse, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(&actor)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .get_user(&actor, &UserId::parse(user_id)?)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(&actor, CreateUserInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn reassign_manager_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<String>,
    Json(payload): Json<ReassignManagerRequest>,
) -> ApiResult<Json<UserResponse>> {
    let manager_id = payload.manager_id.map(UserId::parse).transpose()?;
    let user = state
        .user_service
        .reassign_manager(&actor, &UserId::parse(user_id)?, manager_id)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .delete_user(&actor, &UserId::parse(user_id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn role_permissions_handler(
    State(state): State<AppState>,
) -> Json<Vec<RolePermissionsResponse>> {
    let table = state.access_service.permission_table();

    Json(
        Role::all()
            .iter()
            .map(|role| RolePermissionsResponse::new(*role, table.permissions_for(*role)))
            .collect(),
    )
}
