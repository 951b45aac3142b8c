//! Lazily opened, shared report store

use crate::config::StoreSettings;
use crate::error::ApiError;
use reportlab_store::SqliteStore;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

/// Shared store, opened on first use
pub type SharedStore = Arc<Mutex<SqliteStore>>;

/// Create-once, reuse-thereafter handle to the report store.
///
/// Opening is not serialized: two first callers may both open a connection,
/// in which case one is kept and the other dropped. A missing database path
/// is reported on every call and never cached.
#[derive(Debug)]
pub struct StoreHandle {
    database_path: Option<PathBuf>,
    table_name: String,
    store: OnceLock<SharedStore>,
}

impl StoreHandle {
    /// Create a handle; nothing is opened yet
    pub fn new(settings: &StoreSettings) -> Self {
        Self {
            database_path: settings.database_path.clone(),
            table_name: settings.table_name.clone(),
            store: OnceLock::new(),
        }
    }

    /// Get the store, opening it on first use.
    ///
    /// Blocks on SQLite; call from a blocking context.
    pub fn get(&self) -> Result<SharedStore, ApiError> {
        if let Some(store) = self.store.get() {
            return Ok(store.clone());
        }

        let path = self.database_path.as_ref().ok_or_else(|| {
            ApiError::Configuration(
                "database path is not set (store.database_path or REPORTLAB_DATABASE_PATH)"
                    .to_string(),
            )
        })?;

        let opened = SqliteStore::with_table(path, &self.table_name)?;
        info!(
            "Opened report store at {} (table {})",
            path.display(),
            self.table_name
        );

        Ok(self
            .store
            .get_or_init(|| Arc::new(Mutex::new(opened)))
            .clone())
    }

    /// Whether a store has been opened
    pub fn is_open(&self) -> bool {
        self.store.get().is_some()
    }
}
