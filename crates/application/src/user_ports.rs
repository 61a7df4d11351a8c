use async_trait::async_trait;
use salesline_core::AppResult;
use salesline_domain::{EmailAddress, User, UserId};

/// Stored user together with the password hash used for sign-in.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// The user.
    pub user: User,
    /// Argon2id password hash, if the account can sign in with a password.
    pub password_hash: Option<String>,
}

/// Repository port for user persistence and team lookups.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    async fn find_user(&self, user_id: &UserId) -> AppResult<Option<User>>;

    /// Finds a user and their password hash by email.
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<UserCredentials>>;

    /// Lists every user ordered by display name.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Lists users whose manager reference equals `manager_id`.
    async fn list_team_members(&self, manager_id: &UserId) -> AppResult<Vec<User>>;

    /// Counts stored users.
    async fn count_users(&self) -> AppResult<u64>;

    /// Persists a new user. Fails with a conflict when the email is taken.
    async fn create_user(&self, user: User, password_hash: Option<String>) -> AppResult<()>;

    /// Persists changes to an existing user.
    async fn save_user(&self, user: &User) -> AppResult<()>;

    /// Deletes a user.
    async fn delete_user(&self, user_id: &UserId) -> AppResult<()>;
}

/// Port for password hashing operations.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
