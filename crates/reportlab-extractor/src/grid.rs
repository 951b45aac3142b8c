//! Zero-indexed grid view over spreadsheet and delimited-text files

use crate::config::CellRef;
use crate::error::ExtractorError;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use reportlab_domain::RawCell;
use std::io::Cursor;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Field values that mean "missing" in delimited text
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Supported input formats, chosen by filename extension only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.xlsx` workbook
    Spreadsheet,
    /// `.csv` delimited text
    DelimitedText,
}

impl FileFormat {
    /// Detect the format from a filename suffix, ignoring case.
    ///
    /// Content is never sniffed.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".xlsx") {
            Some(FileFormat::Spreadsheet)
        } else if lower.ends_with(".csv") {
            Some(FileFormat::DelimitedText)
        } else {
            None
        }
    }
}

/// Zero-indexed row/column view of a parsed file.
///
/// Positions are absolute: row 0 is the first row of the file, never a
/// header. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<RawCell>>,
}

impl Grid {
    /// Build a grid from rows of cells
    pub fn from_rows(rows: Vec<Vec<RawCell>>) -> Self {
        Self { rows }
    }

    /// Parse file contents in the given format
    pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Self, ExtractorError> {
        match format {
            FileFormat::Spreadsheet => Self::from_xlsx(bytes),
            FileFormat::DelimitedText => Self::from_csv(bytes),
        }
    }

    /// Read the first worksheet of an `.xlsx` workbook
    pub fn from_xlsx(bytes: &[u8]) -> Result<Self, ExtractorError> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ExtractorError::Extraction("workbook has no worksheets".to_string()))??;

        let mut grid = Grid::default();
        // used_cells() is relative to the range start; the grid is absolute
        if let Some((first_row, first_col)) = range.start() {
            for (row, col, value) in range.used_cells() {
                let at = CellRef::new(first_row as usize + row, first_col as usize + col);
                grid.set(at, cell_from_data(value));
            }
        }

        debug!("Read worksheet grid: {} rows x {} cols", grid.height(), grid.width());
        Ok(grid)
    }

    /// Read headerless, possibly ragged, UTF-8 delimited text
    pub fn from_csv(bytes: &[u8]) -> Result<Self, ExtractorError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(cell_from_field).collect());
        }

        if rows.is_empty() {
            return Err(ExtractorError::Extraction(
                "no columns to parse from file".to_string(),
            ));
        }

        let grid = Grid { rows };
        debug!("Read delimited grid: {} rows x {} cols", grid.height(), grid.width());
        Ok(grid)
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `at`, or `None` when the grid does not reach that far
    pub fn get(&self, at: CellRef) -> Option<&RawCell> {
        self.rows.get(at.row).and_then(|row| row.get(at.col))
    }

    fn set(&mut self, at: CellRef, cell: RawCell) {
        if self.rows.len() <= at.row {
            self.rows.resize_with(at.row + 1, Vec::new);
        }
        let row = &mut self.rows[at.row];
        if row.len() <= at.col {
            row.resize(at.col + 1, RawCell::Empty);
        }
        row[at.col] = cell;
    }
}

fn cell_from_data(value: &Data) -> RawCell {
    match value {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map(RawCell::Date)
            .unwrap_or_else(|| RawCell::Number(dt.as_f64())),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(RawCell::Date)
            .unwrap_or_else(|| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn cell_from_field(field: &str) -> RawCell {
    if MISSING_MARKERS.contains(&field) {
        RawCell::Empty
    } else {
        RawCell::Text(field.to_string())
    }
}
