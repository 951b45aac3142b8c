//! Reportlab Domain Layer
//!
//! This crate contains the data model and the pure decision logic for turning
//! visit-report cells into flat records. It knows nothing about file formats,
//! HTTP or databases; those live in other crates and meet this one through
//! the types and traits defined here.
//!
//! ## Key Concepts
//!
//! - **RawCell**: a value read from a grid position, before cleaning
//! - **Clean value**: canonical text for a cell, `"N/A"` when absent
//! - **Role catalog**: ordered keywords used to split "name + role" text
//! - **VisitRecord**: the nine extracted fields of one report file
//! - **BatchResult**: per-file outcomes of a batch, successes and failures
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Persistence is reached through the [`traits::ReportStore`] trait
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod cell;
pub mod normalize;
pub mod record;
pub mod roles;
pub mod stats;
pub mod traits;

// Re-exports for convenience
pub use batch::{BatchResult, FileFailure, UploadedFile};
pub use cell::RawCell;
pub use normalize::{normalize, normalize_text, NOT_AVAILABLE};
pub use record::{ReportRow, StoredReport, VisitRecord};
pub use roles::{split_person_role, PersonRoleEntry, RoleCatalog};
pub use stats::{compute_stats, ReportStats};
