//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::record::{ReportRow, StoredReport};
use std::collections::HashSet;

/// Persistence gateway for extracted reports
///
/// Implemented by the infrastructure layer (reportlab-store)
pub trait ReportStore {
    /// Error type for store operations
    type Error;

    /// Return which of the given file identifiers are already persisted
    fn find_existing(&self, identifiers: &[String]) -> Result<HashSet<String>, Self::Error>;

    /// Insert rows as one operation, returning the number inserted
    fn insert(&mut self, rows: &[ReportRow]) -> Result<usize, Self::Error>;

    /// Most recently inserted rows, newest first
    fn recent(&self, limit: usize) -> Result<Vec<StoredReport>, Self::Error>;

    /// Rows matching the query, ordered by visit date descending
    fn query(&self, query: &ReportQuery) -> Result<Vec<StoredReport>, Self::Error>;
}

/// Query criteria for retrieving stored reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    /// Inclusive lower bound on the visit date (`YYYY-MM-DD`)
    pub start_date: Option<String>,

    /// Inclusive upper bound on the visit date (`YYYY-MM-DD`)
    pub end_date: Option<String>,

    /// Maximum results to return
    pub limit: Option<usize>,
}
