use axum::extract::{Extension, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use salesline_application::AccessGuard;
use salesline_core::{AppError, UserIdentity};
use tower_sessions::Session;

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

async fn session_identity(session: &Session) -> ApiResult<Option<UserIdentity>> {
    Ok(session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?)
}

/// Requires a session identity and exposes it to handlers.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session_identity(&session)
        .await?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Evaluates the route's [`AccessGuard`] and exposes the resolved actor to
/// handlers as `Extension<User>`.
pub async fn require_access(
    State(state): State<AppState>,
    Extension(guard): Extension<AccessGuard>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session_identity(&session).await?;
    let actor = state
        .access_service
        .authorize(identity.as_ref(), &guard)
        .await?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}
