use std::fmt::{Display, Formatter};
use std::str::FromStr;

use salesline_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Permission, UserId};

/// Identifier shared by every CRM record family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a random record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid record id '{value}': {error}")))
    }
}

/// CRM record families that carry owner references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceFamily {
    /// Sales leads.
    Lead,
    /// Converted customers.
    Customer,
    /// Revenue targets.
    Target,
    /// Daily revenue entries.
    DailyRevenue,
    /// Calls, emails, meetings and notes against a lead.
    Interaction,
    /// Calendar events.
    CalendarEvent,
}

/// Kind of operation attempted on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceAction {
    /// Read one record or a collection.
    View,
    /// Create a record.
    Create,
    /// Change a record.
    Edit,
    /// Delete a record.
    Delete,
}

impl ResourceFamily {
    /// Returns a stable storage value for the family.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Customer => "customer",
            Self::Target => "target",
            Self::DailyRevenue => "daily_revenue",
            Self::Interaction => "interaction",
            Self::CalendarEvent => "calendar_event",
        }
    }

    /// Returns the base permission gating an action on this family.
    #[must_use]
    pub fn required_permission(&self, action: ResourceAction) -> Permission {
        match (self, action) {
            (Self::Lead, ResourceAction::View) => Permission::LeadView,
            (Self::Lead, ResourceAction::Create) => Permission::LeadCreate,
            (Self::Lead, ResourceAction::Edit) => Permission::LeadEdit,
            (Self::Lead, ResourceAction::Delete) => Permission::LeadDelete,
            (Self::Customer, ResourceAction::View) => Permission::CustomerView,
            (Self::Customer, ResourceAction::Create) => Permission::LeadConvert,
            (Self::Customer, ResourceAction::Edit) => Permission::CustomerEdit,
            (Self::Customer, ResourceAction::Delete) => Permission::CustomerDelete,
            (Self::Target, ResourceAction::View) => Permission::TargetView,
            (Self::Target, ResourceAction::Create) => Permission::TargetCreate,
            (Self::Target, ResourceAction::Edit) => Permission::TargetEdit,
            (Self::Target, ResourceAction::Delete) => Permission::TargetDelete,
            (Self::DailyRevenue, ResourceAction::View) => Permission::RevenueView,
            (Self::DailyRevenue, ResourceAction::Create | ResourceAction::Edit) => {
                Permission::RevenueLog
            }
            (Self::DailyRevenue, ResourceAction::Delete) => Permission::RevenueDelete,
            (Self::Interaction, ResourceAction::View) => Permission::InteractionView,
            (Self::Interaction, ResourceAction::Create | ResourceAction::Edit) => {
                Permission::InteractionCreate
            }
            (Self::Interaction, ResourceAction::Delete) => Permission::InteractionDelete,
            (Self::CalendarEvent, ResourceAction::View) => Permission::CalendarView,
            (Self::CalendarEvent, _) => Permission::CalendarManage,
        }
    }
}

impl FromStr for ResourceFamily {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lead" => Ok(Self::Lead),
            "customer" => Ok(Self::Customer),
            "target" => Ok(Self::Target),
            "daily_revenue" => Ok(Self::DailyRevenue),
            "interaction" => Ok(Self::Interaction),
            "calendar_event" => Ok(Self::CalendarEvent),
            _ => Err(AppError::Validation(format!(
                "unknown resource family '{value}'"
            ))),
        }
    }
}

/// A record whose visibility is decided by one or two owner references.
///
/// A record with two owner fields is visible to a caller when either field
/// is inside the caller's scope. A `None` owner is house-owned.
pub trait OwnedRecord: Clone + Send + Sync + 'static {
    /// Family the record belongs to.
    const FAMILY: ResourceFamily;

    /// Returns the record id.
    fn record_id(&self) -> RecordId;

    /// Returns the primary owner reference.
    fn primary_owner(&self) -> Option<&UserId>;

    /// Returns the secondary owner reference, for families that carry one.
    fn secondary_owner(&self) -> Option<&UserId> {
        None
    }

    /// Natural key that must be unique among the family's records sharing a
    /// primary owner.
    fn owner_unique_key(&self) -> Option<String> {
        None
    }

    /// Returns every non-null owner reference.
    fn owner_ids(&self) -> Vec<&UserId> {
        self.primary_owner()
            .into_iter()
            .chain(self.secondary_owner())
            .collect()
    }
}

pub(crate) fn non_negative_cents(value: i64, label: &str) -> AppResult<i64> {
    if value < 0 {
        return Err(AppError::Validation(format!(
            "{label} must not be negative"
        )));
    }

    Ok(value)
}

pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{RecordId, ResourceAction, ResourceFamily};
    use crate::Permission;

    #[test]
    fn record_id_parses_uuid_text() {
        let id = RecordId::new();
        let parsed = RecordId::from_str(id.to_string().as_str());
        assert!(matches!(parsed, Ok(value) if value == id));
        assert!(RecordId::from_str("42").is_err());
    }

    #[test]
    fn customer_creation_is_gated_by_conversion() {
        assert_eq!(
            ResourceFamily::Customer.required_permission(ResourceAction::Create),
            Permission::LeadConvert
        );
        assert_eq!(
            ResourceFamily::CalendarEvent.required_permission(ResourceAction::Delete),
            Permission::CalendarManage
        );
    }
}
