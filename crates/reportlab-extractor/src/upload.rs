//! Dedup-before-insert upload of extracted records

use crate::error::ExtractorError;
use reportlab_domain::traits::ReportStore;
use reportlab_domain::{ReportRow, VisitRecord};
use std::fmt::Display;
use tracing::{debug, info};

/// What an upload did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// New records were inserted
    Inserted {
        /// Number of rows inserted
        inserted: usize,
        /// Number of records left out as duplicates
        skipped: usize,
    },
    /// Every record was already stored
    NothingNew {
        /// Number of records left out as duplicates
        skipped: usize,
    },
}

impl UploadOutcome {
    /// Number of rows inserted
    pub fn inserted(&self) -> usize {
        match self {
            UploadOutcome::Inserted { inserted, .. } => *inserted,
            UploadOutcome::NothingNew { .. } => 0,
        }
    }

    /// Number of records skipped as duplicates
    pub fn skipped(&self) -> usize {
        match self {
            UploadOutcome::Inserted { skipped, .. } | UploadOutcome::NothingNew { skipped } => {
                *skipped
            }
        }
    }

    /// Human-readable summary
    pub fn message(&self) -> String {
        match self {
            UploadOutcome::Inserted { inserted, skipped: 0 } => {
                format!("Uploaded {} new records", inserted)
            }
            UploadOutcome::Inserted { inserted, skipped } => format!(
                "Uploaded {} new records, {} duplicates skipped",
                inserted, skipped
            ),
            UploadOutcome::NothingNew { .. } => {
                "All records already exist in the database".to_string()
            }
        }
    }
}

/// Insert the records whose file identity is not stored yet.
///
/// Only records whose identifier is already in the store are skipped;
/// repeats within `records` are all inserted. The insert is a single store
/// call; any store fault is returned as one [`ExtractorError::Store`].
pub fn upload_records<S>(
    store: &mut S,
    records: &[VisitRecord],
) -> Result<UploadOutcome, ExtractorError>
where
    S: ReportStore,
    S::Error: Display,
{
    if records.is_empty() {
        return Err(ExtractorError::InvalidInput("No data to upload".to_string()));
    }

    let identifiers: Vec<String> = records.iter().map(|r| r.identifier().to_string()).collect();
    let existing = store
        .find_existing(&identifiers)
        .map_err(|e| ExtractorError::Store(e.to_string()))?;

    let rows: Vec<ReportRow> = records
        .iter()
        .filter(|r| !existing.contains(r.identifier()))
        .map(ReportRow::from)
        .collect();

    let skipped = records.len() - rows.len();
    debug!(
        "Upload of {} records: {} already stored, {} to insert",
        records.len(),
        existing.len(),
        rows.len()
    );

    if rows.is_empty() {
        info!("Nothing new to upload, {} duplicates skipped", skipped);
        return Ok(UploadOutcome::NothingNew { skipped });
    }

    store
        .insert(&rows)
        .map_err(|e| ExtractorError::Store(e.to_string()))?;

    info!("Uploaded {} records, {} duplicates skipped", rows.len(), skipped);
    Ok(UploadOutcome::Inserted {
        inserted: rows.len(),
        skipped,
    })
}
