//! In-memory report files for tests

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A cell value to place in a fixture file
#[derive(Debug, Clone, Copy)]
pub(crate) enum FixtureCell<'a> {
    Text(&'a str),
    Number(f64),
    /// Excel date serial, written with a date number format
    Date(f64),
    /// `#N/A` error cell
    Error,
}

/// Cells of the standard visit report layout
pub(crate) fn standard_report() -> Vec<(usize, usize, FixtureCell<'static>)> {
    vec![
        (0, 0, FixtureCell::Text("INFORME DE VISITA")),
        (5, 1, FixtureCell::Text("Fecha")),
        (5, 2, FixtureCell::Date(45306.0)),
        (6, 1, FixtureCell::Text("Sede")),
        (6, 2, FixtureCell::Text("  Clínica  Norte ")),
        (7, 1, FixtureCell::Text("Reciben")),
        (
            7,
            2,
            FixtureCell::Text("Ana Ruiz Bacteriólogo\nPedro Díaz Auxiliar de laboratorio"),
        ),
        (8, 1, FixtureCell::Text("Responsable")),
        (8, 2, FixtureCell::Text("Laura Mora Profesional")),
        (20, 1, FixtureCell::Text("Calificación")),
        (20, 2, FixtureCell::Number(85.0)),
        (21, 1, FixtureCell::Text("Clasificación")),
        (21, 2, FixtureCell::Text("Riesgo bajo")),
    ]
}

/// Build a single-sheet `.xlsx` workbook holding `cells`
pub(crate) fn xlsx(cells: &[(usize, usize, FixtureCell<'_>)]) -> Vec<u8> {
    let mut rows: BTreeMap<usize, BTreeMap<usize, FixtureCell<'_>>> = BTreeMap::new();
    for &(row, col, cell) in cells {
        rows.entry(row).or_default().insert(col, cell);
    }

    let mut sheet_data = String::new();
    for (row, cols) in &rows {
        sheet_data.push_str(&format!("<row r=\"{}\">", row + 1));
        for (col, cell) in cols {
            let at = cell_name(*row, *col);
            let xml = match cell {
                FixtureCell::Text(text) => format!(
                    "<c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                    at,
                    escape(text)
                ),
                FixtureCell::Number(n) => format!("<c r=\"{}\"><v>{}</v></c>", at, n),
                FixtureCell::Date(serial) => {
                    format!("<c r=\"{}\" s=\"1\"><v>{}</v></c>", at, serial)
                }
                FixtureCell::Error => format!("<c r=\"{}\" t=\"e\"><v>#N/A</v></c>", at),
            };
            sheet_data.push_str(&xml);
        }
        sheet_data.push_str("</row>");
    }

    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        sheet_data
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/styles.xml", STYLES),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Build a `.csv` file holding `cells`; every row is padded to the same width
pub(crate) fn csv(cells: &[(usize, usize, FixtureCell<'_>)]) -> Vec<u8> {
    let height = cells.iter().map(|(r, _, _)| r + 1).max().unwrap_or(0);
    let width = cells.iter().map(|(_, c, _)| c + 1).max().unwrap_or(0).max(2);
    let mut grid = vec![vec![String::new(); width]; height];
    for &(row, col, cell) in cells {
        grid[row][col] = match cell {
            FixtureCell::Text(text) => text.to_string(),
            FixtureCell::Number(n) => n.to_string(),
            FixtureCell::Date(_) => "2024-01-15 00:00:00".to_string(),
            FixtureCell::Error => "#N/A".to_string(),
        };
    }

    let mut writer = ::csv::Writer::from_writer(Vec::new());
    for row in &grid {
        writer.write_record(row).unwrap();
    }
    writer.into_inner().unwrap()
}

fn cell_name(row: usize, col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("{}{}", String::from_utf8_lossy(&letters), row + 1)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Informe" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="1"><fill><patternFill patternType="none"/></fill></fills><borders count="1"><border/></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#;
