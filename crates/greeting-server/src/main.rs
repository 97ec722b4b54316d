//! Greeting Server - Main entry point

use anyhow::{Context, Result};
use greeting_common::logging::{init_logging, LogConfig};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::info;

use greeting_server::{
    api,
    audit::{AuditStore, InMemoryAuditStore, PgAuditStore},
    config::{Config, DatabaseConfig, StoreBackend},
    features::FeatureState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("greeting-server")
        .filter_directives("greeting_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting Greeting Server");

    let config = Config::load()?;
    info!(
        environment = %config.app.environment,
        version = %config.app.version,
        store = ?config.store,
        "Configuration loaded - server will bind to {}:{}",
        config.server.host,
        config.server.port
    );

    let store = build_store(&config).await?;
    let state = FeatureState::new(store, config.app.clone());
    let app = api::create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn AuditStore>> {
    match config.store {
        StoreBackend::Memory => {
            info!("Using in-memory audit store; records are lost on restart");
            Ok(Arc::new(InMemoryAuditStore::new()))
        },
        StoreBackend::Postgres => {
            let pool = connect_database(&config.database).await?;
            Ok(Arc::new(PgAuditStore::new(pool)))
        },
    }
}

async fn connect_database(config: &DatabaseConfig) -> Result<sqlx::PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    info!("Database connection pool established");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    info!("Database migrations completed");

    Ok(pool)
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // In-flight simulate requests may still be sleeping
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
