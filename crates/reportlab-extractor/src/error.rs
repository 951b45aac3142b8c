//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction and upload
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Filename extension is neither a spreadsheet nor delimited text
    #[error("Invalid file type: {0}")]
    UnsupportedFormat(String),

    /// The file could not be parsed into a grid
    #[error("Error extracting data: {0}")]
    Extraction(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied nothing usable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persistence gateway error
    #[error("Store error: {0}")]
    Store(String),
}

impl From<csv::Error> for ExtractorError {
    fn from(e: csv::Error) -> Self {
        ExtractorError::Extraction(e.to_string())
    }
}

impl From<calamine::XlsxError> for ExtractorError {
    fn from(e: calamine::XlsxError) -> Self {
        ExtractorError::Extraction(e.to_string())
    }
}
