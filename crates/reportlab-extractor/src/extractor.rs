//! Core Extractor implementation

use crate::config::{CellRef, ExtractorConfig};
use crate::error::ExtractorError;
use crate::grid::{FileFormat, Grid};
use reportlab_domain::{normalize, normalize_text, RawCell, VisitRecord, NOT_AVAILABLE};
use tracing::debug;

/// Separator between entries of the multi-person receiving fields
const ENTRY_SEPARATOR: &str = " | ";

/// The Extractor turns one report file into one [`VisitRecord`]
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the record of one file.
    ///
    /// The format is chosen from the filename suffix alone. `filename` is
    /// stored verbatim as the record's `ARCHIVO`.
    pub fn extract(&self, bytes: &[u8], filename: &str) -> Result<VisitRecord, ExtractorError> {
        let format = FileFormat::from_filename(filename)
            .ok_or_else(|| ExtractorError::UnsupportedFormat(filename.to_string()))?;

        debug!("Extracting '{}' as {:?} ({} bytes)", filename, format, bytes.len());

        let grid = Grid::parse(bytes, format)?;
        Ok(self.extract_from_grid(&grid, filename))
    }

    /// Build a record from an already-parsed grid.
    ///
    /// Never fails: every field outside the grid becomes `"N/A"`.
    pub fn extract_from_grid(&self, grid: &Grid, filename: &str) -> VisitRecord {
        let layout = &self.config.layout;

        let (receiving_names, receiving_roles) =
            self.receiving_personnel(grid.get(layout.receiving_personnel));
        let responsible = self
            .config
            .role_catalog
            .split(&field(grid, layout.responsible));

        let record = VisitRecord {
            file: filename.to_string(),
            site: field(grid, layout.site),
            date: field(grid, layout.date),
            receiving_names,
            receiving_roles,
            responsible_name: responsible.name,
            responsible_role: responsible.role,
            rating: field(grid, layout.rating),
            risk_classification: field(grid, layout.risk_classification),
        };

        debug!(
            "Extracted '{}': site='{}', date='{}', responsible='{}', rating='{}', risk='{}'",
            record.file,
            record.site,
            record.date,
            record.responsible_name,
            record.rating,
            record.risk_classification
        );

        record
    }

    /// Split the receiving-personnel cell into joined names and joined roles.
    ///
    /// Text cells hold one person per line. Lines are cleaned one by one, so
    /// the split happens before newlines are folded into spaces.
    fn receiving_personnel(&self, cell: Option<&RawCell>) -> (String, String) {
        let lines: Vec<String> = match cell {
            None => Vec::new(),
            Some(RawCell::Text(text)) => text.split('\n').map(normalize_text).collect(),
            Some(other) => vec![normalize(other)],
        };

        let (names, roles): (Vec<String>, Vec<String>) = lines
            .iter()
            .filter(|line| line.as_str() != NOT_AVAILABLE)
            .map(|line| {
                let entry = self.config.role_catalog.split(line);
                (entry.name, entry.role)
            })
            .unzip();

        if names.is_empty() {
            return (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string());
        }

        (names.join(ENTRY_SEPARATOR), roles.join(ENTRY_SEPARATOR))
    }
}

/// Cleaned value at `at`, `"N/A"` when the grid does not reach it
fn field(grid: &Grid, at: CellRef) -> String {
    grid.get(at)
        .map(normalize)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
