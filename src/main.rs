//! People API service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http::server ──▶ person::handlers          │
//!                             │   (request id,      (bind payload,           │
//!                             │    trace, metrics)   classify outcome)       │
//!                             │                          │                   │
//!                             │                          ▼                   │
//!     Client Response         │                    storage::PersonStore      │
//!     ◀───────────────────────┼─── http::response ◀── (SQLite, blocking pool)│
//!                             │                                              │
//!                             │   config · observability · lifecycle         │
//!                             └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use people_api::config::{load_config, validate_config, ConfigError, ServiceConfig};
use people_api::lifecycle::startup;
use people_api::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "people-api")]
#[command(about = "CRUD HTTP service for person records", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `database.path` (`:memory:` for a throwaway database).
    #[arg(short, long)]
    database: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(database) = &self.database {
            config.database.path = database.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_logging(&config.observability);

    tracing::info!("people-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
