//! API Server Entry Point
//!
//! Reads configuration, picks the account store (PostgreSQL or in-memory),
//! provisions the admin account and serves the portal API. Startup errors
//! use `anyhow`; request errors are `auth::AuthError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::application::{ProvisionAdminUseCase, ProvisionOutcome};
use auth::domain::repository::{AccountStore, KeyValueStore};
use auth::infra::ConfiguredMailer;
use auth::{InMemoryAuthRepository, PgAuthRepository, portal_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    match config.database_url.clone() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await
                .context("failed to connect to DATABASE_URL")?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            run(PgAuthRepository::new(pool), config).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts live in memory for this process");
            run(InMemoryAuthRepository::new(), config).await
        }
    }
}

async fn run<R>(repo: R, config: ServerConfig) -> anyhow::Result<()>
where
    R: AccountStore,
{
    // Startup cleanup: errors here should not prevent server startup
    match repo.purge_expired().await {
        Ok(deleted) => tracing::info!(pending_deleted = deleted, "Pending OTP cleanup completed"),
        Err(e) => tracing::warn!(error = %e, "Pending OTP cleanup failed, continuing anyway"),
    }

    provision_admin(&repo, &config).await?;
    spawn_purge_task(repo.clone());

    let mailer = ConfiguredMailer::from_config(config.mail.clone())?;
    let cors = cors_layer(&config.frontend_origins);

    // Build router
    let app: Router = portal_router(repo, mailer, config.auth)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn provision_admin<R>(repo: &R, config: &ServerConfig) -> anyhow::Result<()>
where
    R: AccountStore,
{
    let use_case = ProvisionAdminUseCase::new(Arc::new(repo.clone()), Arc::new(config.auth.clone()));
    let outcome = use_case
        .execute(config.admin_email.clone(), config.admin_password.clone())
        .await
        .context("admin provisioning failed")?;

    if outcome == ProvisionOutcome::Created {
        tracing::info!("Admin account provisioned");
    }

    Ok(())
}

/// Drop pending OTP records past retention once a minute
fn spawn_purge_task<R>(repo: R)
where
    R: AccountStore,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        // The first tick completes immediately; boot already purged
        interval.tick().await;

        loop {
            interval.tick().await;
            match repo.purge_expired().await {
                Ok(0) => {}
                Ok(deleted) => tracing::debug!(pending_deleted = deleted, "Purged pending OTPs"),
                Err(e) => tracing::warn!(error = %e, "Pending OTP purge failed"),
            }
        }
    });
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
