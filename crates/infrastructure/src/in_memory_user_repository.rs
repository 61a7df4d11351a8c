use std::collections::HashMap;

use async_trait::async_trait;
use salesline_application::{UserCredentials, UserRepository};
use salesline_core::{AppError, AppResult};
use salesline_domain::{EmailAddress, User, UserId};
use tokio::sync::RwLock;

/// In-memory user repository.
///
/// Mirrors the PostgreSQL schema rules: emails are unique and deleting a
/// manager detaches their reports.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserCredentials>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_user(&self, user_id: &UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .get(user_id)
            .map(|credentials| credentials.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<UserCredentials>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|credentials| credentials.user.email() == email)
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;

        let mut values: Vec<User> = users
            .values()
            .map(|credentials| credentials.user.clone())
            .collect();
        values.sort_by(|left, right| {
            left.display_name()
                .cmp(right.display_name())
                .then_with(|| left.id().cmp(right.id()))
        });

        Ok(values)
    }

    async fn list_team_members(&self, manager_id: &UserId) -> AppResult<Vec<User>> {
        Ok(self
            .list_users()
            .await?
            .into_iter()
            .filter(|user| user.reports_to(manager_id))
            .collect())
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn create_user(&self, user: User, password_hash: Option<String>) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(user.id()) {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                user.id()
            )));
        }
        if users
            .values()
            .any(|credentials| credentials.user.email() == user.email())
        {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        users.insert(
            user.id().clone(),
            UserCredentials {
                user,
                password_hash,
            },
        );
        Ok(())
    }

    async fn save_user(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.iter().any(|(id, credentials)| {
            id != user.id() && credentials.user.email() == user.email()
        }) {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let credentials = users
            .get_mut(user.id())
            .ok_or_else(|| AppError::NotFound(format!("user '{}' does not exist", user.id())))?;
        credentials.user = user.clone();
        Ok(())
    }

    async fn delete_user(&self, user_id: &UserId) -> AppResult<()> {
        let mut users = self.users.write().await;

        if users.remove(user_id).is_none() {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }

        for credentials in users.values_mut() {
            if credentials.user.reports_to(user_id) {
                credentials.user.reassign_manager(None)?;
            }
        }
        Ok(())
    }
}
