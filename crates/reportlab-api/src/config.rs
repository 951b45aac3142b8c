//! Configuration file parsing for the API server.
//!
//! Loads settings from TOML files including bind address, upload limits,
//! the SQLite database location and the extractor layout. Store settings
//! can be overridden from the environment.

use reportlab_extractor::ExtractorConfig;
use reportlab_store::DEFAULT_TABLE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `store.database_path`
pub const DATABASE_PATH_ENV: &str = "REPORTLAB_DATABASE_PATH";

/// Environment variable overriding `store.table_name`
pub const REPORTS_TABLE_ENV: &str = "REPORTLAB_REPORTS_TABLE";

/// API configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where processed reports are stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// SQLite database file; storage endpoints fail until this is set
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Table holding the reports
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            table_name: default_table_name(),
        }
    }
}

fn default_table_name() -> String {
    DEFAULT_TABLE.to_string()
}

/// API configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Largest accepted request body, in megabytes
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,

    /// Report storage
    #[serde(default)]
    pub store: StoreSettings,

    /// Cell layout and role catalog
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8000
}

fn default_max_upload_mb() -> usize {
    50
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_upload_mb: default_max_upload_mb(),
            store: StoreSettings::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ApiConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_mb == 0 {
            return Err(ConfigError::Invalid("max_upload_mb must be > 0".to_string()));
        }
        self.extractor.validate().map_err(ConfigError::Invalid)
    }

    /// Apply `REPORTLAB_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; blank values are ignored
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(DATABASE_PATH_ENV) {
            self.store.database_path = Some(PathBuf::from(path));
        }
        if let Some(table) = get(REPORTS_TABLE_ENV) {
            self.store.table_name = table;
        }
        self
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Request body limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}
