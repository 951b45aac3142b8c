//! Configuration for the Extractor

use reportlab_domain::RoleCatalog;
use serde::{Deserialize, Serialize};

/// Excel's last row and column; anything beyond cannot exist in a workbook
const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// A zero-indexed (row, col) grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// Zero-indexed row
    pub row: usize,
    /// Zero-indexed column
    pub col: usize,
}

impl CellRef {
    /// Create a new cell reference
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Where each field lives in a report grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    /// Visit date
    pub date: CellRef,
    /// Site / client
    pub site: CellRef,
    /// Receiving personnel, one person per line
    pub receiving_personnel: CellRef,
    /// Person responsible for the visit
    pub responsible: CellRef,
    /// Obtained rating
    pub rating: CellRef,
    /// Risk classification
    pub risk_classification: CellRef,
}

impl FieldLayout {
    fn cells(&self) -> [(&'static str, CellRef); 6] {
        [
            ("date", self.date),
            ("site", self.site),
            ("receiving_personnel", self.receiving_personnel),
            ("responsible", self.responsible),
            ("rating", self.rating),
            ("risk_classification", self.risk_classification),
        ]
    }
}

impl Default for FieldLayout {
    /// Layout of the standard visit report template
    fn default() -> Self {
        Self {
            date: CellRef::new(5, 2),
            site: CellRef::new(6, 2),
            receiving_personnel: CellRef::new(7, 2),
            responsible: CellRef::new(8, 2),
            rating: CellRef::new(20, 2),
            risk_classification: CellRef::new(21, 2),
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Role keywords in match priority order
    #[serde(default)]
    pub role_catalog: RoleCatalog,

    /// Field coordinates
    #[serde(default)]
    pub layout: FieldLayout,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, cell) in self.layout.cells() {
            if cell.row >= MAX_ROWS || cell.col >= MAX_COLS {
                return Err(format!(
                    "{} cell ({}, {}) is outside the sheet",
                    name, cell.row, cell.col
                ));
            }
        }
        if self.role_catalog.is_empty() {
            return Err("role_catalog must list at least one role".to_string());
        }
        if self.role_catalog.keywords().iter().any(|k| k.trim().is_empty()) {
            return Err("role_catalog entries must not be blank".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
