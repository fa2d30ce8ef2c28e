//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Open storage before accepting traffic
//! - Bind the listener last and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics::init_metrics;
use crate::storage::{PersonStore, SqlitePersonStore, StoreError};

/// Fatal error raised before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open storage: {0}")]
    Storage(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bring the service up and serve until a termination signal arrives.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::forward_to(shutdown));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = open_store(&config).await?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    tracing::info!(
        database = %config.database.path,
        address = %listener.local_addr()?,
        "Storage ready; accepting connections"
    );

    HttpServer::new(store).run(listener, server_shutdown).await?;
    Ok(())
}

/// Open the configured database off the async workers.
pub async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn PersonStore>, StartupError> {
    let database = config.database.clone();
    let store = tokio::task::spawn_blocking(move || SqlitePersonStore::open(&database))
        .await
        .map_err(StoreError::from)??;
    Ok(Arc::new(store))
}
