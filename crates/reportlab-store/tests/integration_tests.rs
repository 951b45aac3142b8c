//! Integration tests for reportlab-store
//!
//! These tests cover the insert / lookup / listing cycle for stored reports.

use reportlab_domain::traits::{ReportQuery, ReportStore};
use reportlab_domain::ReportRow;
use reportlab_store::{SqliteStore, StoreError, DEFAULT_TABLE};
use tempfile::TempDir;

fn row(archivo: &str, fecha: &str) -> ReportRow {
    ReportRow {
        archivo: archivo.to_string(),
        sede: "Clínica Norte".to_string(),
        fecha: fecha.to_string(),
        nombre_profesionales_que_reciben: "Ana Ruiz | Pedro Díaz".to_string(),
        cargo_profesionales_que_reciben: "Bacteriólogo | Auxiliar de laboratorio".to_string(),
        nombre_responsable_visita: "Laura Mora".to_string(),
        cargo_responsable_visita: "Profesional".to_string(),
        calificacion_obtenida: "85".to_string(),
        clasificacion_riesgo: "Riesgo bajo".to_string(),
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().table(), DEFAULT_TABLE);
}

#[test]
fn test_insert_and_read_back() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let inserted = store
        .insert(&[row("a.xlsx", "2024-01-15"), row("b.csv", "2024-02-01")])
        .unwrap();
    assert_eq!(inserted, 2);

    let recent = store.recent(10).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].row, row("b.csv", "2024-02-01"));
    assert_eq!(recent[1].row, row("a.xlsx", "2024-01-15"));
    assert!(recent[0].id > recent[1].id);
    assert!(!recent[0].created_at.is_empty());
}

#[test]
fn test_recent_respects_limit() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let rows: Vec<_> = (0..5).map(|i| row(&format!("{}.xlsx", i), "2024-01-01")).collect();
    store.insert(&rows).unwrap();

    let recent = store.recent(3).unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].row.archivo, "4.xlsx");
}

#[test]
fn test_find_existing() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.insert(&[row("a.xlsx", "2024-01-15")]).unwrap();

    let existing = store
        .find_existing(&["a.xlsx".to_string(), "z.xlsx".to_string()])
        .unwrap();
    assert_eq!(existing.len(), 1);
    assert!(existing.contains("a.xlsx"));

    assert!(store.find_existing(&[]).unwrap().is_empty());
}

#[test]
fn test_find_existing_many_identifiers() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let rows: Vec<_> = (0..1200).map(|i| row(&format!("{}.csv", i), "2024-01-01")).collect();
    store.insert(&rows).unwrap();

    let ids: Vec<String> = (0..1500).map(|i| format!("{}.csv", i)).collect();
    assert_eq!(store.find_existing(&ids).unwrap().len(), 1200);
}

#[test]
fn test_query_by_date_range() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store
        .insert(&[
            row("a.xlsx", "2024-01-15"),
            row("b.xlsx", "2024-03-02"),
            row("c.xlsx", "2024-02-10"),
            row("d.xlsx", "2023-12-31"),
        ])
        .unwrap();

    let query = ReportQuery {
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-02-10".to_string()),
        limit: None,
    };
    let reports = store.query(&query).unwrap();
    let files: Vec<_> = reports.iter().map(|r| r.row.archivo.as_str()).collect();
    assert_eq!(files, vec!["c.xlsx", "a.xlsx"]);

    let all = store.query(&ReportQuery::default()).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].row.fecha, "2024-03-02");

    let limited = store
        .query(&ReportQuery {
            limit: Some(1),
            ..ReportQuery::default()
        })
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[test]
fn test_custom_table_and_persistence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reportlab.db");

    {
        let mut store = SqliteStore::with_table(&path, "visitas").unwrap();
        store.insert(&[row("a.xlsx", "2024-01-15")]).unwrap();
    }

    let store = SqliteStore::with_table(&path, "visitas").unwrap();
    assert_eq!(store.recent(10).unwrap().len(), 1);

    // Same file, different table: nothing shared
    let other = SqliteStore::new(&path).unwrap();
    assert!(other.recent(10).unwrap().is_empty());
}

#[test]
fn test_invalid_table_name() {
    let result = SqliteStore::with_table(":memory:", "x; DROP TABLE y");
    assert!(matches!(result, Err(StoreError::InvalidTableName(_))));
}
