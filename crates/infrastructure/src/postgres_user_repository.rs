//! PostgreSQL-backed user repository.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use salesline_application::{UserCredentials, UserRepository};
use salesline_core::{AppError, AppResult};
use salesline_domain::{EmailAddress, Role, User, UserId};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    display_name: String,
    email: String,
    role: String,
    manager_id: Option<String>,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_credentials(self) -> AppResult<UserCredentials> {
        let row_id = self.id.clone();
        let restore = || -> AppResult<User> {
            User::restore(
                UserId::parse(self.id)?,
                self.display_name,
                EmailAddress::new(self.email)?,
                Role::from_str(&self.role)?,
                self.manager_id.map(UserId::parse).transpose()?,
                self.created_at,
            )
        };

        let user = restore().map_err(|error| {
            AppError::Internal(format!("stored user '{row_id}' is invalid: {error}"))
        })?;

        Ok(UserCredentials {
            user,
            password_hash: self.password_hash,
        })
    }
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("an account with this email already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

const USER_COLUMNS: &str =
    "id, display_name, email, role, manager_id, password_hash, created_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user(&self, user_id: &UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM crm_users WHERE id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user: {error}")))?;

        row.map(|row| row.into_credentials().map(|credentials| credentials.user))
            .transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM crm_users WHERE LOWER(email) = LOWER($1) LIMIT 1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?;

        row.map(UserRow::into_credentials).transpose()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM crm_users ORDER BY display_name, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        rows.into_iter()
            .map(|row| row.into_credentials().map(|credentials| credentials.user))
            .collect()
    }

    async fn list_team_members(&self, manager_id: &UserId) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM crm_users WHERE manager_id = $1 ORDER BY display_name, id"
        ))
        .bind(manager_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list team members: {error}")))?;

        rows.into_iter()
            .map(|row| row.into_credentials().map(|credentials| credentials.user))
            .collect()
    }

    async fn count_users(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM crm_users")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count users: {error}")))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn create_user(&self, user: User, password_hash: Option<String>) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO crm_users (id, display_name, email, role, manager_id, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.display_name().as_str())
        .bind(user.email().as_str())
        .bind(user.role().as_str())
        .bind(user.manager_id().map(UserId::as_str))
        .bind(password_hash)
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "create user"))?;

        Ok(())
    }

    async fn save_user(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE crm_users
            SET display_name = $2, email = $3, role = $4, manager_id = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.display_name().as_str())
        .bind(user.email().as_str())
        .bind(user.role().as_str())
        .bind(user.manager_id().map(UserId::as_str))
        .execute(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "update user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user '{}' does not exist",
                user.id()
            )));
        }

        Ok(())
    }

    async fn delete_user(&self, user_id: &UserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM crm_users WHERE id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }

        Ok(())
    }
}
