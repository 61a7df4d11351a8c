//! In-process fakes shared by service tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use salesline_core::{AppError, AppResult, UserIdentity};
use salesline_domain::{
    EmailAddress, OwnedRecord, RecordId, Role, RolePermissionSet, User, UserId, VisibleOwners,
};
use tokio::sync::Mutex;

use crate::{
    AccessScopeService, AuditEvent, AuditLogEntry, AuditRepository, PasswordHasher,
    RecordOwnershipRepository, RecordRepository, UserCredentials, UserRepository,
};

pub(crate) fn user_id(value: &str) -> UserId {
    UserId::parse(value).unwrap_or_else(|_| panic!("user id '{value}' should be valid"))
}

pub(crate) fn user(id: &str, role: Role, manager_id: Option<&str>) -> User {
    let email = EmailAddress::new(format!("{id}@example.com"))
        .unwrap_or_else(|_| panic!("email should be valid"));
    User::new(user_id(id), id.to_uppercase(), email, role, manager_id.map(user_id))
        .unwrap_or_else(|_| panic!("user '{id}' should be valid"))
}

pub(crate) fn identity(user: &User) -> UserIdentity {
    UserIdentity::new(
        user.id().as_str(),
        user.display_name().as_str(),
        Some(user.email().as_str().to_owned()),
    )
}

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    pub(crate) users: Mutex<HashMap<UserId, UserCredentials>>,
    pub(crate) fail_team_lookups: bool,
}

impl FakeUserRepository {
    pub(crate) fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Mutex::new(
                users
                    .into_iter()
                    .map(|user| {
                        (
                            user.id().clone(),
                            UserCredentials {
                                user,
                                password_hash: None,
                            },
                        )
                    })
                    .collect(),
            ),
            fail_team_lookups: false,
        }
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_user(&self, user_id: &UserId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
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
            .lock()
            .await
            .values()
            .find(|credentials| credentials.user.email() == email)
            .cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .await
            .values()
            .map(|credentials| credentials.user.clone())
            .collect();
        users.sort_by(|left, right| left.id().cmp(right.id()));
        Ok(users)
    }

    async fn list_team_members(&self, manager_id: &UserId) -> AppResult<Vec<User>> {
        if self.fail_team_lookups {
            return Err(AppError::Internal("team lookup failed".to_owned()));
        }

        Ok(self
            .list_users()
            .await?
            .into_iter()
            .filter(|user| user.reports_to(manager_id))
            .collect())
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.users.lock().await.len() as u64)
    }

    async fn create_user(&self, user: User, password_hash: Option<String>) -> AppResult<()> {
        let mut users = self.users.lock().await;
        if users
            .values()
            .any(|credentials| credentials.user.email() == user.email())
        {
            return Err(AppError::Conflict("email already registered".to_owned()));
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
        let mut users = self.users.lock().await;
        let credentials = users
            .get_mut(user.id())
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", user.id())))?;
        credentials.user = user.clone();
        Ok(())
    }

    async fn delete_user(&self, user_id: &UserId) -> AppResult<()> {
        self.users.lock().await.remove(user_id);
        Ok(())
    }
}

pub(crate) struct FakeRecordRepository<R> {
    pub(crate) records: Mutex<Vec<R>>,
}

impl<R> Default for FakeRecordRepository<R> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<R: OwnedRecord> RecordOwnershipRepository for FakeRecordRepository<R> {
    async fn count_records_owned_by(&self, owner_id: &UserId) -> AppResult<u64> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| record.owner_ids().contains(&owner_id))
            .count() as u64)
    }
}

#[async_trait]
impl<R: OwnedRecord> RecordRepository<R> for FakeRecordRepository<R> {
    async fn insert_record(&self, record: R) -> AppResult<()> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn update_record(&self, record: R) -> AppResult<()> {
        let mut records = self.records.lock().await;
        let slot = records
            .iter_mut()
            .find(|existing| existing.record_id() == record.record_id())
            .ok_or_else(|| AppError::NotFound("record not found".to_owned()))?;
        *slot = record;
        Ok(())
    }

    async fn find_record(&self, record_id: RecordId) -> AppResult<Option<R>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| record.record_id() == record_id)
            .cloned())
    }

    async fn list_records(&self, owners: &VisibleOwners) -> AppResult<Vec<R>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| owners.admits_record(*record))
            .cloned()
            .collect())
    }

    async fn delete_record(&self, record_id: RecordId) -> AppResult<()> {
        self.records
            .lock()
            .await
            .retain(|record| record.record_id() != record_id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }

    async fn list_recent_events(&self, limit: usize) -> AppResult<Vec<AuditLogEntry>> {
        Ok(self
            .events
            .lock()
            .await
            .iter()
            .enumerate()
            .rev()
            .take(limit)
            .map(|(index, event)| AuditLogEntry {
                entry_id: index as i64 + 1,
                event: event.clone(),
                recorded_at: chrono::Utc::now(),
            })
            .collect())
    }
}

pub(crate) struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

pub(crate) fn access_service(users: Arc<FakeUserRepository>) -> AccessScopeService {
    AccessScopeService::new(Arc::new(RolePermissionSet::standard()), users)
}

/// Super admin `root`, manager `m1` with agents `a1` and `a3`, manager `m2`
/// with agent `a2`, and unmanaged agents `u1` and `u2`.
pub(crate) fn sales_org() -> Vec<User> {
    vec![
        user("root", Role::SuperAdmin, None),
        user("m1", Role::SalesManager, None),
        user("m2", Role::SalesManager, None),
        user("a1", Role::SalesAgent, Some("m1")),
        user("a3", Role::SalesAgent, Some("m1")),
        user("a2", Role::SalesAgent, Some("m2")),
        user("u1", Role::SalesAgent, None),
        user("u2", Role::SalesAgent, None),
    ]
}

pub(crate) fn member(users: &[User], id: &str) -> User {
    users
        .iter()
        .find(|user| user.id().as_str() == id)
        .cloned()
        .unwrap_or_else(|| panic!("user '{id}' should exist in the fixture"))
}
