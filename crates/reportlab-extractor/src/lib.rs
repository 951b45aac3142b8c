//! Reportlab Extractor
//!
//! Reads visit-report files into a grid and pulls a fixed set of cell
//! coordinates into a [`VisitRecord`](reportlab_domain::VisitRecord).
//!
//! # Overview
//!
//! Each report is one `.xlsx` workbook or `.csv` file with values at known
//! positions. The Extractor parses the file into a zero-indexed grid, cleans
//! the cells it needs and splits the "name + role" cells into separate fields.
//! Batches run file by file; a failing file is recorded and never stops the
//! rest of the batch.
//!
//! # Architecture
//!
//! ```text
//! bytes → Grid → cleaned cells → VisitRecord → BatchResult → ReportStore
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use reportlab_domain::UploadedFile;
//! use reportlab_extractor::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::default());
//!
//! let files = vec![
//!     UploadedFile::new("visita_01.xlsx", std::fs::read("visita_01.xlsx").unwrap()),
//!     UploadedFile::new("notas.pdf", Vec::new()),
//! ];
//!
//! let batch = extractor.run_batch(&files);
//!
//! println!("Processed: {} of {}", batch.succeeded(), batch.total());
//! for failure in batch.failures() {
//!     println!("{}: {}", failure.file, failure.error);
//! }
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod extractor;
mod grid;
mod upload;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod tests;

pub use config::{CellRef, ExtractorConfig, FieldLayout};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use grid::{FileFormat, Grid};
pub use upload::{upload_records, UploadOutcome};
