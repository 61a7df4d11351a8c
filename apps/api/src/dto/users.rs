use std::str::FromStr;

use salesline_application::CreateUserInput;
use salesline_core::AppError;
use salesline_domain::{Permission, Role, User};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::parse_optional_user_id;

/// API representation of a user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<String>,
    pub created_at: String,
}

/// Authenticated user together with the permissions their role holds.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/session-user-response.ts"
)]
pub struct SessionUserResponse {
    pub user: UserResponse,
    pub permissions: Vec<String>,
}

/// Permissions currently granted to one role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-permissions-response.ts"
)]
pub struct RolePermissionsResponse {
    pub role: String,
    pub permissions: Vec<String>,
}

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<String>,
    pub password: String,
}

/// Incoming payload for changing who an agent reports to.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/reassign-manager-request.ts"
)]
pub struct ReassignManagerRequest {
    pub manager_id: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            display_name: user.display_name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            manager_id: user.manager_id().map(ToString::to_string),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

fn permission_values(permissions: Vec<Permission>) -> Vec<String> {
    permissions
        .into_iter()
        .map(|permission| permission.as_str().to_owned())
        .collect()
}

impl SessionUserResponse {
    #[must_use]
    pub fn new(user: User, permissions: Vec<Permission>) -> Self {
        Self {
            user: UserResponse::from(user),
            permissions: permission_values(permissions),
        }
    }
}

impl RolePermissionsResponse {
    #[must_use]
    pub fn new(role: Role, permissions: Vec<Permission>) -> Self {
        Self {
            role: role.as_str().to_owned(),
            permissions: permission_values(permissions),
        }
    }
}

impl TryFrom<CreateUserRequest> for CreateUserInput {
    type Error = AppError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            display_name: value.display_name,
            email: value.email,
            role: Role::from_str(value.role.as_str())?,
            manager_id: parse_optional_user_id(value.manager_id)?,
            password: value.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use salesline_application::CreateUserInput;
    use salesline_core::AppError;
    use salesline_domain::{EmailAddress, Permission, Role, User, UserId};

    use super::{CreateUserRequest, SessionUserResponse};

    #[test]
    fn create_request_parses_role_and_manager() -> Result<(), AppError> {
        let input = CreateUserInput::try_from(CreateUserRequest {
            display_name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role: "sales_agent".to_owned(),
            manager_id: Some("m1".to_owned()),
            password: "correct horse battery".to_owned(),
        })?;

        assert_eq!(input.role, Role::SalesAgent);
        assert_eq!(input.manager_id, Some(UserId::parse("m1")?));
        Ok(())
    }

    #[test]
    fn create_request_rejects_unknown_role() {
        let result = CreateUserInput::try_from(CreateUserRequest {
            display_name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role: "owner".to_owned(),
            manager_id: None,
            password: "correct horse battery".to_owned(),
        });

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn session_response_lists_permission_values() -> Result<(), AppError> {
        let user = User::new(
            UserId::parse("a1")?,
            "Agent One",
            EmailAddress::new("a1@example.com")?,
            Role::SalesAgent,
            None,
        )?;

        let response =
            SessionUserResponse::new(user, vec![Permission::LeadView, Permission::UserViewSelf]);

        assert_eq!(response.user.role, "sales_agent");
        assert_eq!(response.permissions, vec!["lead.view", "user.view_self"]);
        Ok(())
    }
}
