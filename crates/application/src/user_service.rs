//! User administration and sign-in.
//!
//! Creation, reporting-line changes and deletion all run through the access
//! scope: managers only ever touch their own team.

use std::collections::BTreeSet;
use std::sync::Arc;

use salesline_core::{AppError, AppResult};
use salesline_domain::{
    AuditAction, EmailAddress, Permission, Role, User, UserId, VisibleOwners, validate_password,
};
use tracing::{debug, info};

use crate::{
    AccessScopeService, AuditEvent, AuditRepository, PasswordHasher, RecordOwnershipRepository,
    UserRepository, access_denied,
};

mod bootstrap;
mod login;

pub use bootstrap::BootstrapAdminInput;

const USER_VIEW_PERMISSIONS: [Permission; 3] = [
    Permission::UserViewSelf,
    Permission::UserViewTeam,
    Permission::UserViewAll,
];

/// Input payload for user creation.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub display_name: String,
    /// Sign-in email.
    pub email: String,
    /// Role of the new user.
    pub role: Role,
    /// Manager for sales agents.
    pub manager_id: Option<UserId>,
    /// Initial password.
    pub password: String,
}

/// Application service for user administration and authentication.
#[derive(Clone)]
pub struct UserService {
    access: AccessScopeService,
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    audit_repository: Arc<dyn AuditRepository>,
    ownership_repositories: Vec<Arc<dyn RecordOwnershipRepository>>,
}

impl UserService {
    /// Creates the service.
    ///
    /// `ownership_repositories` are consulted before deleting a user so no
    /// record is left pointing at a missing owner.
    #[must_use]
    pub fn new(
        access: AccessScopeService,
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        audit_repository: Arc<dyn AuditRepository>,
        ownership_repositories: Vec<Arc<dyn RecordOwnershipRepository>>,
    ) -> Self {
        Self {
            access,
            user_repository,
            password_hasher,
            audit_repository,
            ownership_repositories,
        }
    }

    /// Returns the permissions the actor's role currently holds.
    #[must_use]
    pub fn effective_permissions(&self, actor: &User) -> Vec<Permission> {
        self.access.permission_table().permissions_for(actor.role())
    }

    /// Lists users the actor may see.
    pub async fn list_users(&self, actor: &User) -> AppResult<Vec<User>> {
        let scope = self.user_view_scope(actor).await?;
        let users = self.user_repository.list_users().await?;

        Ok(users
            .into_iter()
            .filter(|user| scope.admits(user.id()))
            .collect())
    }

    /// Loads one user the actor may see.
    pub async fn get_user(&self, actor: &User, user_id: &UserId) -> AppResult<User> {
        let scope = self.user_view_scope(actor).await?;
        if !scope.admits(user_id) {
            return Err(access_denied());
        }

        self.access.require_accessible_user(actor, user_id).await
    }

    /// Creates a user.
    ///
    /// Sales managers may only create sales agents reporting to themselves.
    pub async fn create_user(&self, actor: &User, input: CreateUserInput) -> AppResult<User> {
        self.access.require_permission(actor, Permission::UserCreate)?;

        let manager_id = match actor.role() {
            Role::SuperAdmin => {
                if let Some(manager_id) = &input.manager_id {
                    self.require_sales_manager(manager_id).await?;
                }
                input.manager_id
            }
            Role::SalesManager => {
                if input.role != Role::SalesAgent {
                    return Err(rule_denied(actor, "sales managers may only create sales agents"));
                }
                if input
                    .manager_id
                    .as_ref()
                    .is_some_and(|manager_id| manager_id != actor.id())
                {
                    return Err(rule_denied(
                        actor,
                        "sales managers may only create agents for their own team",
                    ));
                }
                Some(actor.id().clone())
            }
            Role::SalesAgent => {
                return Err(rule_denied(actor, "sales agents cannot create users"));
            }
        };

        let email = EmailAddress::new(input.email)?;
        validate_password(&input.password)?;
        if self
            .user_repository
            .find_credentials_by_email(&email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "email '{}' is already registered",
                email.as_str()
            )));
        }

        let user = User::new(
            UserId::generate(),
            input.display_name,
            email,
            input.role,
            manager_id,
        )?;
        let password_hash = self.password_hasher.hash_password(&input.password)?;
        self.user_repository
            .create_user(user.clone(), Some(password_hash))
            .await?;

        self.audit_repository
            .append_event(AuditEvent::new(
                actor.id(),
                AuditAction::UserCreated,
                "user",
                user.id(),
                Some(user.role().as_str().to_owned()),
            ))
            .await?;
        info!(actor_id = %actor.id(), user_id = %user.id(), role = user.role().as_str(), "user created");
        Ok(user)
    }

    /// Changes who a sales agent reports to.
    ///
    /// Super admins may move any agent to any sales manager. Sales managers
    /// may only move members of their own team to themselves or release them.
    pub async fn reassign_manager(
        &self,
        actor: &User,
        user_id: &UserId,
        manager_id: Option<UserId>,
    ) -> AppResult<User> {
        self.access.require_permission(actor, Permission::UserEdit)?;
        let mut user = self.access.require_accessible_user(actor, user_id).await?;

        match actor.role() {
            Role::SuperAdmin => {}
            Role::SalesManager => {
                if user.id() == actor.id() {
                    return Err(rule_denied(
                        actor,
                        "sales managers cannot change their own reporting line",
                    ));
                }
                if manager_id
                    .as_ref()
                    .is_some_and(|manager_id| manager_id != actor.id())
                {
                    return Err(rule_denied(
                        actor,
                        "sales managers may only assign agents to themselves",
                    ));
                }
            }
            Role::SalesAgent => {
                return Err(rule_denied(actor, "sales agents cannot change reporting lines"));
            }
        }

        if let Some(manager_id) = &manager_id {
            self.require_sales_manager(manager_id).await?;
        }

        let previous = user.manager_id().cloned();
        user.reassign_manager(manager_id)?;
        self.user_repository.save_user(&user).await?;

        self.audit_repository
            .append_event(AuditEvent::new(
                actor.id(),
                AuditAction::UserManagerReassigned,
                "user",
                user.id(),
                Some(format!(
                    "{} -> {}",
                    describe_manager(previous.as_ref()),
                    describe_manager(user.manager_id())
                )),
            ))
            .await?;
        info!(actor_id = %actor.id(), user_id = %user.id(), "manager reassigned");
        Ok(user)
    }

    /// Deletes a user who manages nobody and owns no records.
    pub async fn delete_user(&self, actor: &User, user_id: &UserId) -> AppResult<()> {
        self.access.require_permission(actor, Permission::UserDelete)?;
        let user = self.access.require_accessible_user(actor, user_id).await?;

        if user.id() == actor.id() {
            return Err(AppError::Conflict("users cannot delete themselves".to_owned()));
        }

        let reports = self
            .access
            .team_resolver()
            .get_team_members(user.id())
            .await?;
        if !reports.is_empty() {
            return Err(AppError::Conflict(format!(
                "user '{}' still manages {} agent(s)",
                user.id(),
                reports.len()
            )));
        }

        let mut owned = 0;
        for repository in &self.ownership_repositories {
            owned += repository.count_records_owned_by(user.id()).await?;
        }
        if owned > 0 {
            return Err(AppError::Conflict(format!(
                "user '{}' still owns {owned} record(s)",
                user.id()
            )));
        }

        self.user_repository.delete_user(user.id()).await?;
        self.audit_repository
            .append_event(AuditEvent::new(
                actor.id(),
                AuditAction::UserDeleted,
                "user",
                user.id(),
                Some(user.email().as_str().to_owned()),
            ))
            .await?;
        info!(actor_id = %actor.id(), user_id = %user.id(), "user deleted");
        Ok(())
    }

    /// Users visible to the actor: the role scope, narrowed to the actor
    /// when only self-view is held.
    async fn user_view_scope(&self, actor: &User) -> AppResult<VisibleOwners> {
        self.access
            .require_any_permission(actor, &USER_VIEW_PERMISSIONS)?;

        if self.access.has_any_permission(
            actor,
            &[Permission::UserViewTeam, Permission::UserViewAll],
        ) {
            return self.access.visible_owner_ids(actor).await;
        }

        Ok(VisibleOwners::Only(BTreeSet::from([actor.id().clone()])))
    }

    async fn require_sales_manager(&self, manager_id: &UserId) -> AppResult<()> {
        match self.user_repository.find_user(manager_id).await? {
            Some(manager) if manager.role() == Role::SalesManager => Ok(()),
            _ => Err(AppError::Validation(format!(
                "manager '{manager_id}' must be an existing sales manager"
            ))),
        }
    }
}

fn describe_manager(manager_id: Option<&UserId>) -> String {
    manager_id.map_or_else(|| "none".to_owned(), ToString::to_string)
}

fn rule_denied(actor: &User, rule: &'static str) -> AppError {
    debug!(
        actor_id = %actor.id(),
        role = actor.role().as_str(),
        rule,
        "user administration denied"
    );
    access_denied()
}

#[cfg(test)]
mod tests;
