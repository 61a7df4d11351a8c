//! Request-scoped access decisions.
//!
//! Resolves the acting user, checks role capabilities and computes the owner
//! scope. The pure decisions live in `salesline_domain::scope`; this service
//! only performs the awaited lookups they need.

use std::sync::Arc;

use salesline_core::{AppError, AppResult, UserIdentity};
use salesline_domain::{
    OwnedRecord, Permission, Role, RolePermissionSet, TeamRoster, User, UserId, VisibleOwners,
    owner_in_scope, resource_access_allowed, user_in_scope, visible_owners,
};
use tracing::debug;

use crate::{AccessGuard, TeamResolver, UserRepository};

const ACCESS_DENIED: &str = "access denied";

/// Builds the error returned for every denial.
///
/// A missing permission, an out-of-scope target and a missing resource all
/// carry the same message. The reason only goes to the `debug!` log.
#[must_use]
pub fn access_denied() -> AppError {
    AppError::Forbidden(ACCESS_DENIED.to_owned())
}

/// Application service answering "may this caller see or change this?".
#[derive(Clone)]
pub struct AccessScopeService {
    permissions: Arc<RolePermissionSet>,
    user_repository: Arc<dyn UserRepository>,
    team_resolver: TeamResolver,
}

impl AccessScopeService {
    /// Creates the service from the shared permission table and user storage.
    #[must_use]
    pub fn new(
        permissions: Arc<RolePermissionSet>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        let team_resolver = TeamResolver::new(user_repository.clone());
        Self {
            permissions,
            user_repository,
            team_resolver,
        }
    }

    /// Returns the permission table.
    #[must_use]
    pub fn permission_table(&self) -> &RolePermissionSet {
        &self.permissions
    }

    /// Returns the team resolver.
    #[must_use]
    pub fn team_resolver(&self) -> &TeamResolver {
        &self.team_resolver
    }

    /// Resolves the current user behind a session identity.
    ///
    /// A session whose user has since been deleted is unauthenticated.
    pub async fn resolve_actor(&self, identity: &UserIdentity) -> AppResult<User> {
        let user_id = UserId::parse(identity.subject())
            .map_err(|_| AppError::Unauthorized("session subject is invalid".to_owned()))?;

        self.user_repository
            .find_user(&user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("session user no longer exists".to_owned()))
    }

    /// Resolves the actor and evaluates a request gate.
    pub async fn authorize(
        &self,
        identity: Option<&UserIdentity>,
        guard: &AccessGuard,
    ) -> AppResult<User> {
        let identity =
            identity.ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
        let actor = self.resolve_actor(identity).await?;

        if guard.admits(&self.permissions, &actor) {
            return Ok(actor);
        }

        debug!(
            actor_id = %actor.id(),
            role = actor.role().as_str(),
            required = %guard.describe(),
            "request gate denied"
        );
        Err(access_denied())
    }

    /// Returns whether the user's role holds the permission.
    #[must_use]
    pub fn has_permission(&self, user: &User, permission: Permission) -> bool {
        self.permissions.has_permission(user, permission)
    }

    /// Returns whether the user's role holds any of the permissions.
    #[must_use]
    pub fn has_any_permission(&self, user: &User, permissions: &[Permission]) -> bool {
        self.permissions.has_any_permission(user, permissions)
    }

    /// Returns whether the user's role holds all of the permissions.
    #[must_use]
    pub fn has_all_permissions(&self, user: &User, permissions: &[Permission]) -> bool {
        self.permissions.has_all_permissions(user, permissions)
    }

    /// Fails with `Forbidden` unless the user's role holds the permission.
    pub fn require_permission(&self, user: &User, permission: Permission) -> AppResult<()> {
        if self.has_permission(user, permission) {
            return Ok(());
        }

        debug!(
            actor_id = %user.id(),
            role = user.role().as_str(),
            permission = permission.as_str(),
            "permission denied"
        );
        Err(access_denied())
    }

    /// Fails with `Forbidden` unless the user's role holds one of the permissions.
    pub fn require_any_permission(&self, user: &User, permissions: &[Permission]) -> AppResult<()> {
        let guard = AccessGuard::require_any_permission(permissions.iter().copied());
        if guard.admits(&self.permissions, user) {
            return Ok(());
        }

        debug!(
            actor_id = %user.id(),
            role = user.role().as_str(),
            required = %guard.describe(),
            "permission denied"
        );
        Err(access_denied())
    }

    /// Returns whether the user may act on a record owned by `owner_id`
    /// under `permission`.
    pub async fn can_access_resource(
        &self,
        user: &User,
        owner_id: &UserId,
        permission: Permission,
    ) -> AppResult<bool> {
        if !self.has_permission(user, permission) {
            return Ok(false);
        }

        let team = self.roster_for(user).await?;
        Ok(resource_access_allowed(
            &self.permissions,
            user,
            owner_id,
            permission,
            &team,
        ))
    }

    /// Returns whether the user may see or act on another user record.
    pub async fn can_access_user(&self, user: &User, target_user_id: &UserId) -> AppResult<bool> {
        let team = self.roster_for(user).await?;
        Ok(user_in_scope(user, target_user_id, &team))
    }

    /// Loads a user the actor may see or act on.
    ///
    /// Missing and out-of-scope users fail with the same `Forbidden` error.
    pub async fn require_accessible_user(
        &self,
        actor: &User,
        target_user_id: &UserId,
    ) -> AppResult<User> {
        if !self.can_access_user(actor, target_user_id).await? {
            debug!(
                actor_id = %actor.id(),
                target_user_id = %target_user_id,
                "user outside scope"
            );
            return Err(access_denied());
        }

        self.user_repository
            .find_user(target_user_id)
            .await?
            .ok_or_else(access_denied)
    }

    /// Returns the owners whose records the user may see.
    pub async fn visible_owner_ids(&self, user: &User) -> AppResult<VisibleOwners> {
        let team = self.roster_for(user).await?;
        Ok(visible_owners(user, &team))
    }

    /// Permission gate followed by the owner scope for list operations.
    pub async fn scoped_owners(
        &self,
        user: &User,
        permission: Permission,
    ) -> AppResult<VisibleOwners> {
        self.require_permission(user, permission)?;
        self.visible_owner_ids(user).await
    }

    /// Returns whether the record is inside the user's scope under `permission`.
    ///
    /// Two-owner records pass when either owner is in scope.
    pub async fn can_access_record<R: OwnedRecord>(
        &self,
        user: &User,
        record: &R,
        permission: Permission,
    ) -> AppResult<bool> {
        if !self.has_permission(user, permission) {
            return Ok(false);
        }

        Ok(self.visible_owner_ids(user).await?.admits_record(record))
    }

    /// Fails with `Forbidden` unless every owner of the record is inside the
    /// user's scope. Used when the caller writes owner references.
    pub async fn require_owners_in_scope<R: OwnedRecord>(
        &self,
        user: &User,
        record: &R,
    ) -> AppResult<()> {
        let team = self.roster_for(user).await?;
        let outside = record
            .owner_ids()
            .into_iter()
            .find(|owner_id| !owner_in_scope(user, owner_id, &team));

        match outside {
            None => Ok(()),
            Some(owner_id) => {
                debug!(
                    actor_id = %user.id(),
                    owner_id = %owner_id,
                    family = R::FAMILY.as_str(),
                    "owner outside scope"
                );
                Err(access_denied())
            }
        }
    }

    /// Resolves the roster consulted for the user's decisions.
    ///
    /// Only sales managers need one, so other roles skip the lookup.
    async fn roster_for(&self, user: &User) -> AppResult<TeamRoster> {
        match user.role() {
            Role::SalesManager => self.team_resolver.roster(user.id()).await,
            Role::SuperAdmin | Role::SalesAgent => Ok(TeamRoster::none()),
        }
    }
}

#[cfg(test)]
mod tests;
