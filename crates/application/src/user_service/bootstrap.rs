use super::*;

/// Input payload for creating the first super admin.
#[derive(Debug, Clone)]
pub struct BootstrapAdminInput {
    /// Display name.
    pub display_name: String,
    /// Sign-in email.
    pub email: String,
    /// Initial password.
    pub password: String,
}

impl UserService {
    /// Creates the first super admin. Only allowed while no user exists.
    pub async fn bootstrap_super_admin(&self, input: BootstrapAdminInput) -> AppResult<User> {
        if self.user_repository.count_users().await? > 0 {
            return Err(AppError::Conflict(
                "bootstrap is only available before the first user exists".to_owned(),
            ));
        }

        let email = EmailAddress::new(input.email)?;
        validate_password(&input.password)?;

        let user = User::new(
            UserId::generate(),
            input.display_name,
            email,
            Role::SuperAdmin,
            None,
        )?;
        let password_hash = self.password_hasher.hash_password(&input.password)?;
        self.user_repository
            .create_user(user.clone(), Some(password_hash))
            .await?;

        self.audit_repository
            .append_event(AuditEvent::new(
                user.id(),
                AuditAction::UserCreated,
                "user",
                user.id(),
                Some("bootstrap".to_owned()),
            ))
            .await?;
        info!(user_id = %user.id(), "super admin bootstrapped");
        Ok(user)
    }
}
