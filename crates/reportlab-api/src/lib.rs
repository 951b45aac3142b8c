//! Reportlab API
//!
//! HTTP surface for visit-report extraction and storage.
//!
//! # Routes
//!
//! ```text
//! GET  /api/health          liveness
//! POST /api/process-excel   one file  -> record
//! POST /api/process-batch   N files   -> batch result
//! POST /api/upload-results  records   -> inserted / skipped (409 if nothing new)
//! GET  /api/reports         stored reports, newest first
//! GET  /api/stats           dashboard statistics
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

use config::ApiConfig;
use handlers::{create_router, AppState};
use reportlab_extractor::Extractor;
use std::sync::Arc;
use store::StoreHandle;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build application state from configuration
pub fn build_state(config: &ApiConfig) -> AppState {
    AppState {
        extractor: Arc::new(Extractor::new(config.extractor.clone())),
        store: Arc::new(StoreHandle::new(&config.store)),
        max_upload_bytes: config.max_upload_bytes(),
    }
}

/// Start the API HTTP server
pub async fn start_server(config: ApiConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    config.validate()?;

    info!("Starting Reportlab API");
    info!("Bind address: {}", config.bind_addr());
    info!("Reports table: {}", config.store.table_name);
    match &config.store.database_path {
        Some(path) => info!("Database: {}", path.display()),
        None => warn!("No database configured; storage endpoints will fail"),
    }

    let app = create_router(build_state(&config));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
