//! Visibility scope decisions.
//!
//! Every function here is pure: the caller resolves the acting user and, for
//! sales managers, the current team roster, then asks for a decision. Nothing
//! is cached between calls.

use std::collections::BTreeSet;

use crate::{OwnedRecord, Permission, Role, RolePermissionSet, User, UserId};

/// Users reporting to one manager, resolved for a single decision.
///
/// The manager is never a member of their own roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    manager_id: Option<UserId>,
    member_ids: BTreeSet<UserId>,
}

impl TeamRoster {
    /// Returns a roster with no manager and no members.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds the roster of `manager_id` from candidate users, keeping only
    /// those whose manager reference points at the manager.
    #[must_use]
    pub fn for_manager<'a>(
        manager_id: &UserId,
        candidates: impl IntoIterator<Item = &'a User>,
    ) -> Self {
        let member_ids = candidates
            .into_iter()
            .filter(|user| user.reports_to(manager_id) && user.id() != manager_id)
            .map(|user| user.id().clone())
            .collect();

        Self {
            manager_id: Some(manager_id.clone()),
            member_ids,
        }
    }

    /// Returns the manager the roster belongs to.
    #[must_use]
    pub fn manager_id(&self) -> Option<&UserId> {
        self.manager_id.as_ref()
    }

    /// Returns the member ids.
    #[must_use]
    pub fn member_ids(&self) -> &BTreeSet<UserId> {
        &self.member_ids
    }

    /// Returns whether the user reports to the roster's manager.
    #[must_use]
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.member_ids.contains(user_id)
    }

    fn belongs_to(&self, actor: &User) -> bool {
        self.manager_id.as_ref() == Some(actor.id())
    }
}

/// Owner identities whose records a caller may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleOwners {
    /// No owner restriction.
    All,
    /// Only records owned by one of these users.
    Only(BTreeSet<UserId>),
}

impl VisibleOwners {
    /// Returns whether records owned by `owner_id` are visible.
    #[must_use]
    pub fn admits(&self, owner_id: &UserId) -> bool {
        match self {
            Self::All => true,
            Self::Only(owner_ids) => owner_ids.contains(owner_id),
        }
    }

    /// Returns whether a record is visible through any of its owner fields.
    ///
    /// House-owned records (no owner at all) are visible only through `All`.
    #[must_use]
    pub fn admits_record<R: OwnedRecord>(&self, record: &R) -> bool {
        match self {
            Self::All => true,
            Self::Only(_) => record
                .owner_ids()
                .into_iter()
                .any(|owner_id| self.admits(owner_id)),
        }
    }

    /// Returns the restricting owner set, or `None` when unrestricted.
    #[must_use]
    pub fn owner_ids(&self) -> Option<&BTreeSet<UserId>> {
        match self {
            Self::All => None,
            Self::Only(owner_ids) => Some(owner_ids),
        }
    }
}

/// Computes the owners visible to `actor`.
///
/// Super admins see everything, managers see themselves plus their roster,
/// agents see themselves.
#[must_use]
pub fn visible_owners(actor: &User, team: &TeamRoster) -> VisibleOwners {
    match actor.role() {
        Role::SuperAdmin => VisibleOwners::All,
        Role::SalesManager => {
            let mut owner_ids = BTreeSet::from([actor.id().clone()]);
            if team.belongs_to(actor) {
                owner_ids.extend(team.member_ids().iter().cloned());
            }
            VisibleOwners::Only(owner_ids)
        }
        Role::SalesAgent => VisibleOwners::Only(BTreeSet::from([actor.id().clone()])),
    }
}

/// Returns whether a record owned by `owner_id` is inside the actor's scope.
#[must_use]
pub fn owner_in_scope(actor: &User, owner_id: &UserId, team: &TeamRoster) -> bool {
    match actor.role() {
        Role::SuperAdmin => true,
        Role::SalesManager => {
            owner_id == actor.id() || (team.belongs_to(actor) && team.contains(owner_id))
        }
        Role::SalesAgent => owner_id == actor.id(),
    }
}

/// Returns whether the actor may see or act on the user record `target_user_id`.
#[must_use]
pub fn user_in_scope(actor: &User, target_user_id: &UserId, team: &TeamRoster) -> bool {
    owner_in_scope(actor, target_user_id, team)
}

/// Permission gate followed by scope check for one owner reference.
#[must_use]
pub fn resource_access_allowed(
    permissions: &RolePermissionSet,
    actor: &User,
    owner_id: &UserId,
    permission: Permission,
    team: &TeamRoster,
) -> bool {
    permissions.has_permission(actor, permission) && owner_in_scope(actor, owner_id, team)
}
