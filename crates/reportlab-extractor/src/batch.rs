//! Batch extraction with per-file failure isolation

use crate::error::ExtractorError;
use crate::extractor::Extractor;
use reportlab_domain::{BatchResult, UploadedFile, VisitRecord};
use std::panic::{self, AssertUnwindSafe};
use tracing::{info, warn};

impl Extractor {
    /// Extract every file, in order, into one [`BatchResult`].
    ///
    /// A file that fails, for any reason, becomes a failure entry and the
    /// batch moves on. Never returns an error.
    pub fn run_batch(&self, files: &[UploadedFile]) -> BatchResult {
        info!("Processing batch of {} files", files.len());

        let result = files.iter().fold(BatchResult::new(), |mut batch, file| {
            let outcome = self.extract_isolated(file).map_err(|e| {
                warn!("Failed to process '{}': {}", file.filename, e);
                e.to_string()
            });
            batch.push(&file.filename, outcome);
            batch
        });

        info!(
            "Batch complete: {} of {} files processed, {} failed",
            result.succeeded(),
            result.total(),
            result.failures().len()
        );

        result
    }

    /// Run one extraction, turning a panic inside a parser into an error
    fn extract_isolated(&self, file: &UploadedFile) -> Result<VisitRecord, ExtractorError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.extract(&file.bytes, &file.filename)))
            .unwrap_or_else(|_| {
                Err(ExtractorError::Extraction(
                    "reader aborted on malformed content".to_string(),
                ))
            })
    }
}
