use serde::Deserialize;
use ts_rs::TS;

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-login-request.ts"
)]
pub struct AuthLoginRequest {
    pub email: String,
    pub password: String,
}

/// Incoming payload creating the first super admin.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/auth-bootstrap-request.ts"
)]
pub struct AuthBootstrapRequest {
    pub token: String,
    pub display_name: String,
    pub email: String,
    pub password: String,
}
