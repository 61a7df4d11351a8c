//! User domain types and validation rules.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use salesline_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Role;

/// Unique identifier for a user record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses an existing user identifier.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "user id must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated, lower-cased email address.
    ///
    /// Performs structural validation only: exactly one `@`, non-empty local
    /// part, and a domain containing at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if local.is_empty() || domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 10;

/// Maximum password length to allow passphrases while bounding hashing cost.
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validates a plaintext password for a new or changed account.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.iter().any(|entry| *entry == lowered) {
        return Err(AppError::Validation(
            "this password is too common and has appeared in data breaches".to_owned(),
        ));
    }

    Ok(())
}

static COMMON_PASSWORDS: &[&str] = &[
    "1234567890",
    "password123",
    "qwertyuiop",
    "letmein123",
    "welcome123",
    "iloveyou12",
    "salesforce",
    "changeme123",
];

/// A member of the sales organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    display_name: NonEmptyString,
    email: EmailAddress,
    role: Role,
    manager_id: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user, enforcing reporting-line invariants.
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        email: EmailAddress,
        role: Role,
        manager_id: Option<UserId>,
    ) -> AppResult<Self> {
        Self::validate_manager(&id, role, manager_id.as_ref())?;

        Ok(Self {
            id,
            display_name: NonEmptyString::new(display_name)?,
            email,
            role,
            manager_id,
            created_at: Utc::now(),
        })
    }

    /// Restores a user from storage with its original creation time.
    pub fn restore(
        id: UserId,
        display_name: impl Into<String>,
        email: EmailAddress,
        role: Role,
        manager_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        let mut user = Self::new(id, display_name, email, role, manager_id)?;
        user.created_at = created_at;
        Ok(user)
    }

    /// Returns the user id.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the manager this user reports to, if any.
    #[must_use]
    pub fn manager_id(&self) -> Option<&UserId> {
        self.manager_id.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether this user reports to the given manager.
    #[must_use]
    pub fn reports_to(&self, manager_id: &UserId) -> bool {
        self.manager_id.as_ref() == Some(manager_id)
    }

    /// Moves the user under another manager, or detaches them with `None`.
    pub fn reassign_manager(&mut self, manager_id: Option<UserId>) -> AppResult<()> {
        Self::validate_manager(&self.id, self.role, manager_id.as_ref())?;
        self.manager_id = manager_id;
        Ok(())
    }

    fn validate_manager(id: &UserId, role: Role, manager_id: Option<&UserId>) -> AppResult<()> {
        let Some(manager_id) = manager_id else {
            return Ok(());
        };

        if manager_id == id {
            return Err(AppError::Validation(format!(
                "user '{id}' cannot report to themselves"
            )));
        }

        if role != Role::SalesAgent {
            return Err(AppError::Validation(format!(
                "only sales agents report to a manager, user '{id}' is '{role}'"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(value: &str) -> EmailAddress {
        EmailAddress::new(value).unwrap_or_else(|_| panic!("valid email"))
    }

    fn user_id(value: &str) -> UserId {
        UserId::parse(value).unwrap_or_else(|_| panic!("valid user id"))
    }

    #[test]
    fn valid_email_is_lowercased() {
        let email = EmailAddress::new("Agent@Example.COM");
        assert!(matches!(email, Ok(value) if value.as_str() == "agent@example.com"));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("noatsign").is_err());
        assert!(EmailAddress::new("user@nodot").is_err());
        assert!(EmailAddress::new("a@b@c.com").is_err());
    }

    #[test]
    fn blank_user_id_is_rejected() {
        assert!(UserId::parse("  ").is_err());
    }

    #[test]
    fn password_rules_apply_length_and_blocklist() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("password123").is_err());
        assert!(validate_password("a-reasonable-passphrase").is_ok());
        assert!(validate_password(&"x".repeat(PASSWORD_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn user_cannot_report_to_themselves() {
        let result = User::new(
            user_id("a1"),
            "Agent",
            email("a1@example.com"),
            Role::SalesAgent,
            Some(user_id("a1")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn only_agents_have_a_manager() {
        let result = User::new(
            user_id("m2"),
            "Manager",
            email("m2@example.com"),
            Role::SalesManager,
            Some(user_id("m1")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn reassignment_changes_reporting_line() {
        let mut agent = User::new(
            user_id("a1"),
            "Agent",
            email("a1@example.com"),
            Role::SalesAgent,
            Some(user_id("m1")),
        )
        .unwrap_or_else(|_| panic!("valid agent"));

        assert!(agent.reassign_manager(Some(user_id("m2"))).is_ok());
        assert!(agent.reports_to(&user_id("m2")));
        assert!(!agent.reports_to(&user_id("m1")));
        assert!(agent.reassign_manager(Some(user_id("a1"))).is_err());
    }
}
