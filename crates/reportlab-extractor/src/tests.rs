//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, FixtureCell};
    use crate::{upload_records, Extractor, ExtractorConfig, ExtractorError, UploadOutcome};
    use reportlab_domain::traits::ReportStore;
    use reportlab_domain::{RoleCatalog, UploadedFile, VisitRecord, NOT_AVAILABLE};
    use reportlab_store::SqliteStore;

    fn expected_standard(file: &str) -> VisitRecord {
        VisitRecord {
            file: file.to_string(),
            site: "Clínica Norte".to_string(),
            date: "2024-01-15".to_string(),
            receiving_names: "Ana Ruiz | Pedro Díaz".to_string(),
            receiving_roles: "Bacteriólogo | Auxiliar de laboratorio".to_string(),
            responsible_name: "Laura Mora".to_string(),
            responsible_role: "Profesional".to_string(),
            rating: "85".to_string(),
            risk_classification: "Riesgo bajo".to_string(),
        }
    }

    #[test]
    fn test_standard_xlsx_report() {
        let bytes = fixtures::xlsx(&fixtures::standard_report());
        let record = Extractor::default().extract(&bytes, "visita_01.xlsx").unwrap();
        assert_eq!(record, expected_standard("visita_01.xlsx"));
    }

    #[test]
    fn test_standard_csv_report() {
        let bytes = fixtures::csv(&fixtures::standard_report());
        let record = Extractor::default().extract(&bytes, "visita_01.csv").unwrap();
        assert_eq!(record, expected_standard("visita_01.csv"));
    }

    #[test]
    fn test_uppercase_extension_is_accepted() {
        let bytes = fixtures::xlsx(&fixtures::standard_report());
        let record = Extractor::default().extract(&bytes, "VISITA.XLSX").unwrap();
        assert_eq!(record.file, "VISITA.XLSX");
        assert_eq!(record.date, "2024-01-15");
    }

    #[test]
    fn test_datetime_cell_keeps_date_only() {
        // 45306.75 is 2024-01-15 18:00
        let bytes = fixtures::xlsx(&[(5, 2, FixtureCell::Date(45306.75))]);
        let record = Extractor::default().extract(&bytes, "v.xlsx").unwrap();
        assert_eq!(record.date, "2024-01-15");
    }

    #[test]
    fn test_textual_timestamp_keeps_date_token() {
        let bytes = fixtures::csv(&[(5, 2, FixtureCell::Text("2024-03-09 08:15:00"))]);
        let record = Extractor::default().extract(&bytes, "v.csv").unwrap();
        assert_eq!(record.date, "2024-03-09");
    }

    #[test]
    fn test_error_cell_is_not_available() {
        let bytes = fixtures::xlsx(&[
            (20, 2, FixtureCell::Error),
            (21, 2, FixtureCell::Text("Alto")),
        ]);
        let record = Extractor::default().extract(&bytes, "v.xlsx").unwrap();
        assert_eq!(record.rating, NOT_AVAILABLE);
        assert_eq!(record.risk_classification, "Alto");
    }

    #[test]
    fn test_short_grid_fields_are_not_available() {
        // Nothing past row 9: rating and risk are out of the grid
        let cells: Vec<_> = fixtures::standard_report()
            .into_iter()
            .filter(|(row, _, _)| *row < 9)
            .collect();

        for (bytes, name) in [
            (fixtures::xlsx(&cells), "corto.xlsx"),
            (fixtures::csv(&cells), "corto.csv"),
        ] {
            let record = Extractor::default().extract(&bytes, name).unwrap();
            assert_eq!(record.site, "Clínica Norte");
            assert_eq!(record.rating, NOT_AVAILABLE);
            assert_eq!(record.risk_classification, NOT_AVAILABLE);
        }
    }

    #[test]
    fn test_narrow_grid_fields_are_not_available() {
        let bytes = fixtures::csv(&[(21, 1, FixtureCell::Text("x"))]);
        let record = Extractor::default().extract(&bytes, "estrecho.csv").unwrap();
        assert_eq!(record.date, NOT_AVAILABLE);
        assert_eq!(record.receiving_names, NOT_AVAILABLE);
        assert_eq!(record.responsible_role, NOT_AVAILABLE);
    }

    #[test]
    fn test_workbook_without_data_is_all_not_available() {
        let bytes = fixtures::xlsx(&[]);
        let record = Extractor::default().extract(&bytes, "vacio.xlsx").unwrap();
        assert_eq!(record.file, "vacio.xlsx");
        assert!(record.values()[1..].iter().all(|v| *v == NOT_AVAILABLE));
    }

    #[test]
    fn test_custom_role_catalog() {
        let config = ExtractorConfig {
            role_catalog: RoleCatalog::new(["Médico"]),
            ..ExtractorConfig::default()
        };
        let bytes = fixtures::csv(&[(8, 2, FixtureCell::Text("Jorge Vélez MÉDICO general"))]);
        let record = Extractor::new(config).extract(&bytes, "v.csv").unwrap();
        assert_eq!(record.responsible_name, "Jorge Vélez");
        assert_eq!(record.responsible_role, "Médico");
    }

    #[test]
    fn test_batch_isolates_failures_and_keeps_order() {
        let files = vec![
            UploadedFile::new("a.xlsx", fixtures::xlsx(&fixtures::standard_report())),
            UploadedFile::new("notas.pdf", b"%PDF".to_vec()),
            UploadedFile::new("roto.xlsx", b"not a workbook".to_vec()),
            UploadedFile::new("b.csv", fixtures::csv(&fixtures::standard_report())),
            UploadedFile::new("vacio.csv", Vec::new()),
        ];

        let batch = Extractor::default().run_batch(&files);

        assert_eq!(batch.total(), 5);
        assert_eq!(batch.succeeded(), 2);
        assert_eq!(batch.succeeded() + batch.failures().len(), batch.total());

        let files_ok: Vec<_> = batch.records().iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files_ok, vec!["a.xlsx", "b.csv"]);

        let files_failed: Vec<_> = batch.failures().iter().map(|f| f.file.as_str()).collect();
        assert_eq!(files_failed, vec!["notas.pdf", "roto.xlsx", "vacio.csv"]);
        assert_eq!(batch.failures()[0].error, "Invalid file type: notas.pdf");
        assert!(batch.failures()[1].error.starts_with("Error extracting data:"));
        assert!(batch.failures()[2].error.starts_with("Error extracting data:"));
    }

    #[test]
    fn test_batch_where_every_file_fails() {
        let files = vec![
            UploadedFile::new("a.txt", b"hola".to_vec()),
            UploadedFile::new("b.docx", Vec::new()),
        ];
        let batch = Extractor::default().run_batch(&files);

        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["processed_count"], 0);
        assert_eq!(json["total_count"], 2);
        assert_eq!(json["results"].as_array().unwrap().len(), 0);
        assert_eq!(json["errors"][1]["file"], "b.docx");
    }

    #[test]
    fn test_empty_batch() {
        let batch = Extractor::default().run_batch(&[]);
        assert_eq!(batch.total(), 0);
        assert_eq!(batch.succeeded(), 0);
        assert!(batch.failures().is_empty());
    }

    #[test]
    fn test_record_serializes_with_report_headers() {
        let bytes = fixtures::xlsx(&fixtures::standard_report());
        let record = Extractor::default().extract(&bytes, "v.xlsx").unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let mut last = 0;
        for header in VisitRecord::HEADERS {
            let pos = json.find(&format!("\"{}\"", header)).unwrap();
            assert!(pos >= last, "{} out of order", header);
            last = pos;
        }
    }

    #[test]
    fn test_batch_then_upload_deduplicates() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let extractor = Extractor::default();

        let first = extractor.run_batch(&[
            UploadedFile::new("a.xlsx", fixtures::xlsx(&fixtures::standard_report())),
            UploadedFile::new("b.csv", fixtures::csv(&fixtures::standard_report())),
        ]);
        let outcome = upload_records(&mut store, first.records()).unwrap();
        assert_eq!(outcome, UploadOutcome::Inserted { inserted: 2, skipped: 0 });

        let second = extractor.run_batch(&[
            UploadedFile::new("b.csv", fixtures::csv(&fixtures::standard_report())),
            UploadedFile::new("c.csv", fixtures::csv(&fixtures::standard_report())),
        ]);
        let outcome = upload_records(&mut store, second.records()).unwrap();
        assert_eq!(outcome, UploadOutcome::Inserted { inserted: 1, skipped: 1 });

        let outcome = upload_records(&mut store, second.records()).unwrap();
        assert_eq!(outcome, UploadOutcome::NothingNew { skipped: 2 });

        let stored = store.recent(10).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].row.archivo, "c.csv");
    }

    #[test]
    fn test_repeated_filename_in_one_upload_is_stored_twice() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let report = fixtures::csv(&fixtures::standard_report());
        let batch = Extractor::default().run_batch(&[
            UploadedFile::new("a.xlsx", fixtures::xlsx(&fixtures::standard_report())),
            UploadedFile::new("a.xlsx", fixtures::xlsx(&fixtures::standard_report())),
            UploadedFile::new("b.csv", report),
        ]);

        let outcome = upload_records(&mut store, batch.records()).unwrap();
        assert_eq!(outcome, UploadOutcome::Inserted { inserted: 3, skipped: 0 });
        assert_eq!(store.recent(10).unwrap().len(), 3);
    }

    #[test]
    fn test_upload_of_empty_batch_is_invalid() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let batch = Extractor::default().run_batch(&[UploadedFile::new("x.pdf", Vec::new())]);
        let result = upload_records(&mut store, batch.records());
        assert!(matches!(result, Err(ExtractorError::InvalidInput(_))));
    }
}
