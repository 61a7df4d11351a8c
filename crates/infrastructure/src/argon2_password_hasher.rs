//! Argon2id adapter for the password hashing port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as PasswordHashError, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use salesline_application::PasswordHasher as PasswordHasherPort;
use salesline_core::{AppError, AppResult};

/// Memory cost in KiB (19 MiB).
const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id hasher producing PHC strings.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the salesline cost parameters.
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .unwrap_or_else(|_| Params::default());

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let stored = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored password hash is malformed: {error}"))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "password verification failed: {error}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_password_it_hashed() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("pipeline-review-2026")?;

        assert!(hasher.verify_password("pipeline-review-2026", &hash)?);
        assert!(!hasher.verify_password("pipeline-review-2025", &hash)?);
        Ok(())
    }

    #[test]
    fn hashes_are_salted_per_call() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash_password("same-password")?;
        let second = hasher.hash_password("same-password")?;

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        Ok(())
    }

    #[test]
    fn malformed_hash_is_internal_error() {
        let hasher = Argon2PasswordHasher::new();
        let result = hasher.verify_password("password", "not-a-phc-string");

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
