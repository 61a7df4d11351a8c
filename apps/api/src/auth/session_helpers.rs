use salesline_core::{AppError, UserIdentity};
use salesline_domain::User;
use tower_sessions::Session;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

pub(super) fn identity_for(user: &User) -> UserIdentity {
    UserIdentity::new(
        user.id().as_str(),
        user.display_name().as_str(),
        Some(user.email().as_str().to_owned()),
    )
}

/// Starts an authenticated session for the user under a fresh session id.
pub(super) async fn establish_session(session: &Session, user: &User) -> Result<(), AppError> {
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, identity_for(user))
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use salesline_core::AppError;
    use salesline_domain::{EmailAddress, Role, User, UserId};

    use super::identity_for;

    #[test]
    fn identity_subject_is_the_user_id() -> Result<(), AppError> {
        let user = User::new(
            UserId::parse("m1")?,
            "Manager One",
            EmailAddress::new("M1@Example.com")?,
            Role::SalesManager,
            None,
        )?;

        let identity = identity_for(&user);

        assert_eq!(identity.subject(), "m1");
        assert_eq!(identity.display_name(), "Manager One");
        assert_eq!(identity.email(), Some("m1@example.com"));
        Ok(())
    }
}
