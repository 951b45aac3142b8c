//! Reportlab Storage Layer
//!
//! Implements the ReportStore trait on a single SQLite table.
//!
//! # Architecture
//!
//! - One row per uploaded report, keyed by an autoincrement id
//! - `archivo` (the source filename) is the dedup identity; it is indexed
//!   but not unique, the upload path decides what gets inserted
//! - The table name is configurable so several deployments can share a file
//!
//! # Examples
//!
//! ```no_run
//! use reportlab_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for report operations
//! ```

#![warn(missing_docs)]

use reportlab_domain::traits::{ReportQuery, ReportStore};
use reportlab_domain::{ReportRow, StoredReport};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Table used when none is configured
pub const DEFAULT_TABLE: &str = "reportes_procesados";

/// Identifiers per `IN (...)` lookup, well under SQLite's variable limit
const LOOKUP_CHUNK: usize = 500;

const COLUMNS: &str = "id, created_at, archivo, sede, fecha, \
    nombre_profesionales_que_reciben, cargo_profesionales_que_reciben, \
    nombre_responsable_visita, cargo_responsable_visita, \
    calificacion_obtenida, clasificacion_riesgo";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Table name is not a plain SQL identifier
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}

/// SQLite-based implementation of ReportStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store between threads
/// behind a `Mutex`, or give each thread its own SqliteStore instance.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteStore {
    /// Open (or create) a store on the default table
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::with_table(path, DEFAULT_TABLE)
    }

    /// Open (or create) a store on a named table
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use reportlab_store::SqliteStore;
    ///
    /// let store = SqliteStore::with_table("reportlab.db", "visitas_2024").unwrap();
    /// ```
    pub fn with_table<P: AsRef<Path>>(path: P, table: &str) -> Result<Self, StoreError> {
        if !is_identifier(table) {
            return Err(StoreError::InvalidTableName(table.to_string()));
        }

        let conn = Connection::open(path)?;
        let mut store = Self {
            conn,
            table: table.to_string(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Name of the table this store writes to
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql").replace("{table}", &self.table);
        self.conn.execute_batch(&schema)?;
        Ok(())
    }

    fn row_to_report(row: &Row<'_>) -> rusqlite::Result<StoredReport> {
        Ok(StoredReport {
            id: row.get(0)?,
            created_at: row.get(1)?,
            row: ReportRow {
                archivo: row.get(2)?,
                sede: row.get(3)?,
                fecha: row.get(4)?,
                nombre_profesionales_que_reciben: row.get(5)?,
                cargo_profesionales_que_reciben: row.get(6)?,
                nombre_responsable_visita: row.get(7)?,
                cargo_responsable_visita: row.get(8)?,
                calificacion_obtenida: row.get(9)?,
                clasificacion_riesgo: row.get(10)?,
            },
        })
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl ReportStore for SqliteStore {
    type Error = StoreError;

    fn find_existing(&self, identifiers: &[String]) -> Result<HashSet<String>, Self::Error> {
        let mut existing = HashSet::new();

        for chunk in identifiers.chunks(LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT DISTINCT archivo FROM {} WHERE archivo IN ({})",
                self.table, placeholders
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let found = stmt
                .query_map(rusqlite::params_from_iter(chunk.iter()), |row| {
                    row.get::<_, String>(0)
                })?
                .collect::<Result<Vec<_>, _>>()?;
            existing.extend(found);
        }

        Ok(existing)
    }

    fn insert(&mut self, rows: &[ReportRow]) -> Result<usize, Self::Error> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (archivo, sede, fecha,
                    nombre_profesionales_que_reciben, cargo_profesionales_que_reciben,
                    nombre_responsable_visita, cargo_responsable_visita,
                    calificacion_obtenida, clasificacion_riesgo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                self.table
            ))?;

            for row in rows {
                stmt.execute(params![
                    &row.archivo,
                    &row.sede,
                    &row.fecha,
                    &row.nombre_profesionales_que_reciben,
                    &row.cargo_profesionales_que_reciben,
                    &row.nombre_responsable_visita,
                    &row.cargo_responsable_visita,
                    &row.calificacion_obtenida,
                    &row.clasificacion_riesgo,
                ])?;
            }
        }
        tx.commit()?;

        debug!("Inserted {} rows into {}", rows.len(), self.table);
        Ok(rows.len())
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredReport>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id DESC LIMIT ?1",
            COLUMNS, self.table
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let reports = stmt
            .query_map(params![limit as i64], Self::row_to_report)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reports)
    }

    fn query(&self, query: &ReportQuery) -> Result<Vec<StoredReport>, Self::Error> {
        let mut sql = format!("SELECT {} FROM {} WHERE 1=1", COLUMNS, self.table);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = &query.start_date {
            sql.push_str(" AND fecha >= ?");
            params.push(Box::new(start.clone()));
        }

        if let Some(end) = &query.end_date {
            sql.push_str(" AND fecha <= ?");
            params.push(Box::new(end.clone()));
        }

        sql.push_str(" ORDER BY fecha DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let reports = stmt
            .query_map(&param_refs[..], Self::row_to_report)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reports)
    }
}
