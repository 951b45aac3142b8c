//! Raw cell values as produced by the grid readers

use chrono::NaiveDateTime;
use std::fmt;

/// A value read from a grid position, before any cleaning.
///
/// Cells are ephemeral: the grid reader produces them and the normalizer
/// consumes them immediately.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    /// Missing value (blank cell, empty CSV field, spreadsheet error cell)
    Empty,
    /// Typed date or timestamp
    Date(NaiveDateTime),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Free text
    Text(String),
}

impl RawCell {
    /// Build a text cell
    pub fn text(value: impl Into<String>) -> Self {
        RawCell::Text(value.into())
    }

    /// Whether the cell carries no value
    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }
}

impl Default for RawCell {
    fn default() -> Self {
        RawCell::Empty
    }
}

impl fmt::Display for RawCell {
    /// Plain textual rendering, before cleaning.
    ///
    /// Integral numbers print without a decimal point, the way spreadsheet
    /// readers hand them back for whole-number cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => Ok(()),
            RawCell::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            RawCell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            RawCell::Number(n) => write!(f, "{}", n),
            RawCell::Bool(true) => f.write_str("True"),
            RawCell::Bool(false) => f.write_str("False"),
            RawCell::Text(s) => f.write_str(s),
        }
    }
}
