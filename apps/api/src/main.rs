//! Salesline API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use axum::Router;
use salesline_core::AppError;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{
    RepositorySet, build_app_state, build_memory_session_layer, build_postgres_session_layer,
    connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let app = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_and_migrate(database_url).await?;
            if config.migrate_only {
                info!("database migrations applied");
                return Ok(());
            }

            let session_layer =
                build_postgres_session_layer(pool.clone(), config.cookie_secure).await?;
            let app_state = build_app_state(
                RepositorySet::postgres(&pool),
                config.role_permissions.clone(),
                config.bootstrap_token.clone(),
            );
            build_router(app_state, &config.frontend_url, session_layer)?
        }
        None => {
            warn!("DATABASE_URL is not set; using in-memory storage and sessions");
            let app_state = build_app_state(
                RepositorySet::in_memory(),
                config.role_permissions.clone(),
                config.bootstrap_token.clone(),
            );
            build_router(
                app_state,
                &config.frontend_url,
                build_memory_session_layer(config.cookie_secure),
            )?
        }
    };

    serve(app, &config).await
}

async fn serve(app: Router, config: &ApiConfig) -> Result<(), AppError> {
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "salesline-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("API server failed: {error}")))
}
