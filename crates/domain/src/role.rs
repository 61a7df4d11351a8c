use std::fmt::{Display, Formatter};
use std::str::FromStr;

use salesline_core::AppError;
use serde::{Deserialize, Serialize};

/// Fixed roles of the sales organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees and manages everything.
    SuperAdmin,
    /// Sees their own records and those of the agents reporting to them.
    SalesManager,
    /// Sees their own records only.
    SalesAgent,
}

impl Role {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::SalesManager => "sales_manager",
            Self::SalesAgent => "sales_agent",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::SuperAdmin, Role::SalesManager, Role::SalesAgent];

        ALL
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "super_admin" => Ok(Self::SuperAdmin),
            "sales_manager" => Ok(Self::SalesManager),
            "sales_agent" => Ok(Self::SalesAgent),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Role;

    #[test]
    fn every_role_roundtrips_through_storage_value() {
        for role in Role::all() {
            let restored = Role::from_str(role.as_str());
            assert!(matches!(restored, Ok(value) if value == *role));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("regional_director").is_err());
    }
}
