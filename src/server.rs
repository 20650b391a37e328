//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, database migrations and the Axum server
//! lifecycle.

use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
use crate::routes::app_service;
use crate::state::{AppState, StorageKind};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a PostgreSQL pool sized from the configuration.
///
/// # Errors
///
/// Returns an error if no connection can be established within
/// `db_connect_timeout`.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the application state on the configured store.
///
/// With a database configured, connects and applies pending migrations.
/// Without one, records live in process memory and are lost on restart.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let (repository, storage): (Arc<dyn UrlRepository>, StorageKind) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = connect_pool(config, database_url).await?;
                tracing::info!("Connected to database");

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to apply database migrations")?;
                tracing::info!("Database migrations applied");

                let repository: Arc<dyn UrlRepository> =
                    Arc::new(PgUrlRepository::new(Arc::new(pool)));
                (repository, StorageKind::Postgres)
            }
            None => {
                tracing::warn!("No database configured, using in-memory store");
                let repository: Arc<dyn UrlRepository> = Arc::new(InMemoryUrlRepository::new());
                (repository, StorageKind::InMemory)
            }
        };

    Ok(AppState::new(repository, storage, &config.shortener))
}

/// Runs the HTTP server with the given configuration.
///
/// Serves until Ctrl+C (or SIGTERM on Unix), then drains in-flight requests.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_service(state, &config.cors_allowed_origins);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
