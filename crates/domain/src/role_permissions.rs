//! Static role → permission table.
//!
//! Built once at process start and shared read-only. Lookups never fail: a
//! role the table does not mention holds no permissions.

use std::collections::{BTreeSet, HashMap};

use crate::{Permission, Role, User};

const SALES_MANAGER_GRANTS: &[Permission] = &[
    Permission::LeadView,
    Permission::LeadCreate,
    Permission::LeadEdit,
    Permission::LeadDelete,
    Permission::LeadAssign,
    Permission::LeadConvert,
    Permission::CustomerView,
    Permission::CustomerEdit,
    Permission::CustomerDelete,
    Permission::TargetView,
    Permission::TargetCreate,
    Permission::TargetEdit,
    Permission::TargetDelete,
    Permission::RevenueView,
    Permission::RevenueLog,
    Permission::RevenueDelete,
    Permission::InteractionView,
    Permission::InteractionCreate,
    Permission::InteractionDelete,
    Permission::AnalyticsOwn,
    Permission::AnalyticsTeam,
    Permission::CalendarView,
    Permission::CalendarManage,
    Permission::UserViewSelf,
    Permission::UserViewTeam,
    Permission::UserCreate,
    Permission::UserEdit,
];

const SALES_AGENT_GRANTS: &[Permission] = &[
    Permission::LeadView,
    Permission::LeadCreate,
    Permission::LeadEdit,
    Permission::LeadConvert,
    Permission::CustomerView,
    Permission::CustomerEdit,
    Permission::TargetView,
    Permission::RevenueView,
    Permission::RevenueLog,
    Permission::InteractionView,
    Permission::InteractionCreate,
    Permission::CalendarView,
    Permission::CalendarManage,
    Permission::AnalyticsOwn,
    Permission::UserViewSelf,
];

/// Immutable mapping from role to the permissions it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionSet {
    grants: HashMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionSet {
    /// Returns the default grants of the three built-in roles.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_grants([
            (Role::SuperAdmin, Permission::all().to_vec()),
            (Role::SalesManager, SALES_MANAGER_GRANTS.to_vec()),
            (Role::SalesAgent, SALES_AGENT_GRANTS.to_vec()),
        ])
    }

    /// Builds a table from explicit grants. Roles not listed hold nothing.
    #[must_use]
    pub fn from_grants(grants: impl IntoIterator<Item = (Role, Vec<Permission>)>) -> Self {
        let mut table: HashMap<Role, BTreeSet<Permission>> = HashMap::new();
        for (role, permissions) in grants {
            table.entry(role).or_default().extend(permissions);
        }

        Self { grants: table }
    }

    /// Replaces the grants of every role named in `overrides`.
    #[must_use]
    pub fn with_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (Role, Vec<Permission>)>,
    ) -> Self {
        for (role, permissions) in overrides {
            self.grants
                .insert(role, permissions.into_iter().collect::<BTreeSet<_>>());
        }

        self
    }

    /// Returns the permissions held by a role, in stable order.
    #[must_use]
    pub fn permissions_for(&self, role: Role) -> Vec<Permission> {
        self.grants
            .get(&role)
            .map(|permissions| permissions.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns whether a role holds a permission.
    #[must_use]
    pub fn role_holds(&self, role: Role, permission: Permission) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|permissions| permissions.contains(&permission))
    }

    /// Returns whether the user's role holds the permission.
    #[must_use]
    pub fn has_permission(&self, user: &User, permission: Permission) -> bool {
        self.role_holds(user.role(), permission)
    }

    /// Returns whether the user's role holds at least one of the permissions.
    #[must_use]
    pub fn has_any_permission(&self, user: &User, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .any(|permission| self.has_permission(user, *permission))
    }

    /// Returns whether the user's role holds every one of the permissions.
    #[must_use]
    pub fn has_all_permissions(&self, user: &User, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .all(|permission| self.has_permission(user, *permission))
    }
}

impl Default for RolePermissionSet {
    fn default() -> Self {
        Self::standard()
    }
}
