//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod activity;
mod lead;
mod records;
mod role;
mod role_permissions;
mod scope;
mod security;
mod user;

pub use activity::{
    CalendarEvent, DailyRevenue, Interaction, InteractionKind, Target, TargetPeriod,
};
pub use lead::{Customer, CustomerDetails, Lead, LeadDetails, LeadStatus};
pub use records::{OwnedRecord, RecordId, ResourceAction, ResourceFamily};
pub use role::Role;
pub use role_permissions::RolePermissionSet;
pub use scope::{
    TeamRoster, VisibleOwners, owner_in_scope, resource_access_allowed, user_in_scope,
    visible_owners,
};
pub use security::{AuditAction, Permission, PermissionFamily};
pub use user::{
    EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, User, UserId, validate_password,
};
