use axum::Json;
use axum::extract::State;
use salesline_core::AppError;
use tower_sessions::Session;

use crate::dto::{AuthLoginRequest, SessionUserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::session_helpers::establish_session;

/// POST /auth/login - Authenticate with email and password.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<AuthLoginRequest>,
) -> ApiResult<Json<SessionUserResponse>> {
    // One message for unknown email and wrong password.
    let user = state
        .user_service
        .login(payload.email.as_str(), payload.password.as_str())
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid email or password".to_owned()))?;

    establish_session(&session, &user).await?;

    let permissions = state.user_service.effective_permissions(&user);
    Ok(Json(SessionUserResponse::new(user, permissions)))
}
