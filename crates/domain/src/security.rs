use std::str::FromStr;

use salesline_core::AppError;
use serde::{Deserialize, Serialize};

/// Resource family a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionFamily {
    /// Leads and customers.
    Lead,
    /// Sales targets.
    Target,
    /// Revenue entries and interactions.
    Pipeline,
    /// Reporting.
    Analytics,
    /// Calendar events.
    Calendar,
    /// User administration and audit.
    User,
}

/// Capabilities enforced by application policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows reading leads.
    LeadView,
    /// Allows creating leads.
    LeadCreate,
    /// Allows editing lead details and status.
    LeadEdit,
    /// Allows deleting leads.
    LeadDelete,
    /// Allows reassigning leads to another user.
    LeadAssign,
    /// Allows converting a lead into a customer.
    LeadConvert,
    /// Allows reading customers.
    CustomerView,
    /// Allows editing customers.
    CustomerEdit,
    /// Allows deleting customers.
    CustomerDelete,
    /// Allows reading targets.
    TargetView,
    /// Allows setting targets.
    TargetCreate,
    /// Allows changing targets.
    TargetEdit,
    /// Allows deleting targets.
    TargetDelete,
    /// Allows reading daily revenue entries.
    RevenueView,
    /// Allows logging daily revenue.
    RevenueLog,
    /// Allows deleting daily revenue entries.
    RevenueDelete,
    /// Allows reading lead interactions.
    InteractionView,
    /// Allows recording lead interactions.
    InteractionCreate,
    /// Allows deleting lead interactions.
    InteractionDelete,
    /// Allows reading reports about one's own records.
    AnalyticsOwn,
    /// Allows reading reports about one's team.
    AnalyticsTeam,
    /// Allows reading organisation-wide reports.
    AnalyticsGlobal,
    /// Allows reading calendar events.
    CalendarView,
    /// Allows creating, changing and deleting calendar events.
    CalendarManage,
    /// Allows reading one's own user record.
    UserViewSelf,
    /// Allows reading the users of one's team.
    UserViewTeam,
    /// Allows reading every user.
    UserViewAll,
    /// Allows creating users.
    UserCreate,
    /// Allows changing users, including their reporting line.
    UserEdit,
    /// Allows deleting users.
    UserDelete,
    /// Allows reading the audit log.
    AuditView,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeadView => "lead.view",
            Self::LeadCreate => "lead.create",
            Self::LeadEdit => "lead.edit",
            Self::LeadDelete => "lead.delete",
            Self::LeadAssign => "lead.assign",
            Self::LeadConvert => "lead.convert",
            Self::CustomerView => "customer.view",
            Self::CustomerEdit => "customer.edit",
            Self::CustomerDelete => "customer.delete",
            Self::TargetView => "target.view",
            Self::TargetCreate => "target.create",
            Self::TargetEdit => "target.edit",
            Self::TargetDelete => "target.delete",
            Self::RevenueView => "revenue.view",
            Self::RevenueLog => "revenue.log",
            Self::RevenueDelete => "revenue.delete",
            Self::InteractionView => "interaction.view",
            Self::InteractionCreate => "interaction.create",
            Self::InteractionDelete => "interaction.delete",
            Self::AnalyticsOwn => "analytics.own",
            Self::AnalyticsTeam => "analytics.team",
            Self::AnalyticsGlobal => "analytics.global",
            Self::CalendarView => "calendar.view",
            Self::CalendarManage => "calendar.manage",
            Self::UserViewSelf => "user.view_self",
            Self::UserViewTeam => "user.view_team",
            Self::UserViewAll => "user.view_all",
            Self::UserCreate => "user.create",
            Self::UserEdit => "user.edit",
            Self::UserDelete => "user.delete",
            Self::AuditView => "audit.view",
        }
    }

    /// Returns the resource family this permission guards.
    #[must_use]
    pub fn family(&self) -> PermissionFamily {
        match self {
            Self::LeadView
            | Self::LeadCreate
            | Self::LeadEdit
            | Self::LeadDelete
            | Self::LeadAssign
            | Self::LeadConvert
            | Self::CustomerView
            | Self::CustomerEdit
            | Self::CustomerDelete => PermissionFamily::Lead,
            Self::TargetView | Self::TargetCreate | Self::TargetEdit | Self::TargetDelete => {
                PermissionFamily::Target
            }
            Self::RevenueView
            | Self::RevenueLog
            | Self::RevenueDelete
            | Self::InteractionView
            | Self::InteractionCreate
            | Self::InteractionDelete => PermissionFamily::Pipeline,
            Self::AnalyticsOwn | Self::AnalyticsTeam | Self::AnalyticsGlobal => {
                PermissionFamily::Analytics
            }
            Self::CalendarView | Self::CalendarManage => PermissionFamily::Calendar,
            Self::UserViewSelf
            | Self::UserViewTeam
            | Self::UserViewAll
            | Self::UserCreate
            | Self::UserEdit
            | Self::UserDelete
            | Self::AuditView => PermissionFamily::User,
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
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
            Permission::AnalyticsGlobal,
            Permission::CalendarView,
            Permission::CalendarManage,
            Permission::UserViewSelf,
            Permission::UserViewTeam,
            Permission::UserViewAll,
            Permission::UserCreate,
            Permission::UserEdit,
            Permission::UserDelete,
            Permission::AuditView,
        ];

        ALL
    }

    /// Parses a transport value into a permission.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a lead is created.
    LeadCreated,
    /// Emitted when a lead is handed to another user.
    LeadAssigned,
    /// Emitted when a lead is converted into a customer.
    LeadConverted,
    /// Emitted when a lead is deleted.
    LeadDeleted,
    /// Emitted when a target is set.
    TargetCreated,
    /// Emitted when a target is deleted.
    TargetDeleted,
    /// Emitted when a user is created.
    UserCreated,
    /// Emitted when a user's manager changes.
    UserManagerReassigned,
    /// Emitted when a user is deleted.
    UserDeleted,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeadCreated => "lead.created",
            Self::LeadAssigned => "lead.assigned",
            Self::LeadConverted => "lead.converted",
            Self::LeadDeleted => "lead.deleted",
            Self::TargetCreated => "target.created",
            Self::TargetDeleted => "target.deleted",
            Self::UserCreated => "user.created",
            Self::UserManagerReassigned => "user.manager_reassigned",
            Self::UserDeleted => "user.deleted",
        }
    }
}

impl FromStr for AuditAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lead.created" => Ok(Self::LeadCreated),
            "lead.assigned" => Ok(Self::LeadAssigned),
            "lead.converted" => Ok(Self::LeadConverted),
            "lead.deleted" => Ok(Self::LeadDeleted),
            "target.created" => Ok(Self::TargetCreated),
            "target.deleted" => Ok(Self::TargetDeleted),
            "user.created" => Ok(Self::UserCreated),
            "user.manager_reassigned" => Ok(Self::UserManagerReassigned),
            "user.deleted" => Ok(Self::UserDeleted),
            _ => Err(AppError::Validation(format!(
                "unknown audit action '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use super::{Permission, PermissionFamily};

    #[test]
    fn permission_roundtrip_storage_value() {
        for permission in Permission::all() {
            let restored = Permission::from_str(permission.as_str());
            assert!(matches!(restored, Ok(value) if value == *permission));
        }
    }

    #[test]
    fn storage_values_are_unique() {
        let values: HashSet<&str> = Permission::all().iter().map(Permission::as_str).collect();
        assert_eq!(values.len(), Permission::all().len());
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert!(Permission::from_str("lead.teleport").is_err());
    }

    #[test]
    fn customer_permissions_belong_to_lead_family() {
        assert_eq!(Permission::CustomerEdit.family(), PermissionFamily::Lead);
        assert_eq!(Permission::RevenueLog.family(), PermissionFamily::Pipeline);
    }
}
