use salesline_domain::{Permission, Role, RolePermissionSet, User};

/// Request gate evaluated before a handler runs.
///
/// Gates only decide whether the caller may reach an operation at all; they
/// never filter data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessGuard {
    /// Caller's role must hold the permission.
    Permission(Permission),
    /// Caller's role must hold at least one of the permissions.
    AnyPermission(Vec<Permission>),
    /// Caller must have exactly this role.
    Role(Role),
}

impl AccessGuard {
    /// Gate requiring one permission.
    #[must_use]
    pub fn require_permission(permission: Permission) -> Self {
        Self::Permission(permission)
    }

    /// Gate requiring any of the given permissions.
    #[must_use]
    pub fn require_any_permission(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::AnyPermission(permissions.into_iter().collect())
    }

    /// Gate requiring a role.
    #[must_use]
    pub fn require_role(role: Role) -> Self {
        Self::Role(role)
    }

    /// Returns whether the actor passes this gate.
    ///
    /// An `AnyPermission` gate with an empty list admits nobody.
    #[must_use]
    pub fn admits(&self, permissions: &RolePermissionSet, actor: &User) -> bool {
        match self {
            Self::Permission(permission) => permissions.has_permission(actor, *permission),
            Self::AnyPermission(required) => permissions.has_any_permission(actor, required),
            Self::Role(role) => actor.role() == *role,
        }
    }

    /// Short human-readable description used in denial messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Permission(permission) => format!("permission '{}'", permission.as_str()),
            Self::AnyPermission(required) => format!(
                "one of [{}]",
                required
                    .iter()
                    .map(|permission| permission.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Role(role) => format!("role '{}'", role.as_str()),
        }
    }
}
