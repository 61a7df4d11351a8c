use std::collections::BTreeMap;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use salesline_core::AppError;
use salesline_domain::{Permission, Role, RolePermissionSet};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub role_permissions: RolePermissionSet,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        if migrate_only && database_url.is_none() {
            return Err(AppError::Validation(
                "DATABASE_URL is required to run migrations".to_owned(),
            ));
        }

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let bootstrap_token = required_non_empty_env("AUTH_BOOTSTRAP_TOKEN")?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let role_permissions = match env::var("ROLE_PERMISSIONS_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            Some(path) => {
                let contents = std::fs::read_to_string(&path).map_err(|error| {
                    AppError::Validation(format!(
                        "failed to read ROLE_PERMISSIONS_FILE '{path}': {error}"
                    ))
                })?;
                RolePermissionSet::standard()
                    .with_overrides(parse_role_permission_overrides(&contents)?)
            }
            None => RolePermissionSet::standard(),
        };

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            role_permissions,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Parses `{ "sales_agent": ["lead.view", ...] }` into per-role grants.
///
/// Unknown roles or permission values reject the whole file.
pub fn parse_role_permission_overrides(
    contents: &str,
) -> Result<Vec<(Role, Vec<Permission>)>, AppError> {
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(contents).map_err(|error| {
        AppError::Validation(format!("invalid role permissions document: {error}"))
    })?;

    raw.into_iter()
        .map(|(role, permissions)| {
            let role = Role::from_str(role.as_str())?;
            let permissions = permissions
                .iter()
                .map(|permission| Permission::from_transport(permission.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((role, permissions))
        })
        .collect()
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use salesline_core::AppError;
    use salesline_domain::{Permission, Role, RolePermissionSet};

    use super::{ApiConfig, parse_role_permission_overrides};

    fn config_with_host(api_host: &str) -> ApiConfig {
        ApiConfig {
            migrate_only: false,
            database_url: None,
            frontend_url: "http://localhost:3000".to_owned(),
            bootstrap_token: "token".to_owned(),
            api_host: api_host.to_owned(),
            api_port: 3001,
            cookie_secure: false,
            role_permissions: RolePermissionSet::standard(),
        }
    }

    #[test]
    fn overrides_replace_only_named_roles() -> Result<(), AppError> {
        let overrides = parse_role_permission_overrides(
            r#"{ "sales_agent": ["lead.view", "calendar.view"] }"#,
        )?;
        let table = RolePermissionSet::standard().with_overrides(overrides);

        assert_eq!(
            table.permissions_for(Role::SalesAgent),
            vec![Permission::LeadView, Permission::CalendarView]
        );
        assert_eq!(
            table.permissions_for(Role::SalesManager),
            RolePermissionSet::standard().permissions_for(Role::SalesManager)
        );
        Ok(())
    }

    #[test]
    fn empty_grant_list_revokes_everything() -> Result<(), AppError> {
        let overrides = parse_role_permission_overrides(r#"{ "sales_manager": [] }"#)?;
        let table = RolePermissionSet::standard().with_overrides(overrides);

        assert!(table.permissions_for(Role::SalesManager).is_empty());
        Ok(())
    }

    #[test]
    fn unknown_values_are_rejected() {
        let unknown_role = parse_role_permission_overrides(r#"{ "intern": ["lead.view"] }"#);
        assert!(matches!(unknown_role, Err(AppError::Validation(_))));

        let unknown_permission =
            parse_role_permission_overrides(r#"{ "sales_agent": ["lead.teleport"] }"#);
        assert!(matches!(unknown_permission, Err(AppError::Validation(_))));

        let malformed = parse_role_permission_overrides("[1, 2, 3]");
        assert!(matches!(malformed, Err(AppError::Validation(_))));
    }

    #[test]
    fn socket_address_requires_an_ip_host() {
        let valid = config_with_host("0.0.0.0").socket_address();
        assert!(matches!(valid, Ok(address) if address.port() == 3001));

        let invalid = config_with_host("localhost").socket_address();
        assert!(matches!(invalid, Err(AppError::Internal(_))));
    }
}
