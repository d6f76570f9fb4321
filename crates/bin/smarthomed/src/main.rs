//! # smarthomed: smarthome daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Seed the catalog from configuration
//! - Construct application services over the storage backend
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use smarthome_adapter_http_axum::state::AppState;
use smarthome_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteStorage};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let storage = SqliteStorage::new(db.pool().clone());

    // Services
    let state = AppState::new(
        &storage,
        config.reading_settings()?,
        config.blind_position_model()?,
    );
    state.catalog_service.load(config.catalog()?).await?;

    // HTTP
    let app = smarthome_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "smarthomed listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("smarthomed stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
