use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use salesline_core::{AppError, UserIdentity};
use tower_sessions::Session;

use crate::dto::SessionUserResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<UserIdentity>,
) -> ApiResult<Json<SessionUserResponse>> {
    let user = state.access_service.resolve_actor(&identity).await?;
    let permissions = state.user_service.effective_permissions(&user);

    Ok(Json(SessionUserResponse::new(user, permissions)))
}
