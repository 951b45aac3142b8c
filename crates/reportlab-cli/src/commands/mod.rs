//! Command implementations.

pub mod extract;
pub mod reports;
pub mod stats;
pub mod upload;

pub use self::extract::execute_extract;
pub use self::reports::execute_reports;
pub use self::stats::execute_stats;
pub use self::upload::execute_upload;

use crate::config::Config;
use crate::error::Result;
use reportlab_store::SqliteStore;

/// Open the configured report store.
pub(crate) fn open_store(config: &Config) -> Result<SqliteStore> {
    let path = config.database_path()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(SqliteStore::with_table(path, &config.store.table_name)?)
}
