use super::*;

impl UserService {
    /// Authenticates with email and password.
    ///
    /// Returns `None` for every failure (malformed or unknown email, missing
    /// or wrong password) and always performs one hash operation so that the
    /// outcome is not observable through timing.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Ok(email) = EmailAddress::new(email) else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(None);
        };

        let Some(credentials) = self.user_repository.find_credentials_by_email(&email).await?
        else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(None);
        };

        let Some(stored_hash) = credentials.password_hash.as_deref() else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(None);
        };

        if !self.password_hasher.verify_password(password, stored_hash)? {
            info!(user_id = %credentials.user.id(), "login rejected");
            return Ok(None);
        }

        info!(user_id = %credentials.user.id(), "login succeeded");
        Ok(Some(credentials.user))
    }
}
