//! Batch inputs and aggregate outcomes

use crate::record::VisitRecord;
use serde::Serialize;

/// An uploaded file, fully buffered in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename as supplied by the caller
    pub filename: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create a new uploaded file
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Why one file of a batch produced no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    /// Filename as supplied by the caller
    pub file: String,
    /// Human-readable failure message
    pub error: String,
}

/// Aggregate outcome of a batch.
///
/// Every input file lands in exactly one of `records` or `failures`, each
/// list in input order. The only way to grow a batch result is
/// [`BatchResult::push`], which keeps `succeeded + failures.len() == total`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BatchResult {
    /// Number of files that produced a record
    #[serde(rename = "processed_count")]
    succeeded: usize,

    /// Number of files submitted
    #[serde(rename = "total_count")]
    total: usize,

    /// Records of successful files
    #[serde(rename = "results")]
    records: Vec<VisitRecord>,

    /// Failure descriptors of failed files
    #[serde(rename = "errors")]
    failures: Vec<FileFailure>,
}

impl BatchResult {
    /// Create an empty batch result
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file outcome into the result
    pub fn push(&mut self, filename: &str, outcome: Result<VisitRecord, String>) {
        self.total += 1;
        match outcome {
            Ok(record) => {
                self.succeeded += 1;
                self.records.push(record);
            }
            Err(error) => self.failures.push(FileFailure {
                file: filename.to_string(),
                error,
            }),
        }
    }

    /// Successful records, in input order
    pub fn records(&self) -> &[VisitRecord] {
        &self.records
    }

    /// Failures, in input order
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Number of files submitted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of files that produced a record
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Take the records out, dropping the failures
    pub fn into_records(self) -> Vec<VisitRecord> {
        self.records
    }
}
