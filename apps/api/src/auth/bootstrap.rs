use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use salesline_application::BootstrapAdminInput;
use salesline_core::AppError;
use tower_sessions::Session;
use tracing::warn;

use crate::dto::{AuthBootstrapRequest, SessionUserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::session_helpers::establish_session;

/// POST /auth/bootstrap - Create the first super admin and sign them in.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AuthBootstrapRequest>,
) -> ApiResult<(StatusCode, Json<SessionUserResponse>)> {
    if payload.token != state.bootstrap_token {
        warn!("bootstrap attempted with an invalid token");
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let user = state
        .user_service
        .bootstrap_super_admin(BootstrapAdminInput {
            display_name: payload.display_name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    establish_session(&session, &user).await?;

    let permissions = state.user_service.effective_permissions(&user);
    Ok((
        StatusCode::CREATED,
        Json(SessionUserResponse::new(user, permissions)),
    ))
}
