//! Value normalizer
//!
//! Turns a single raw cell into its canonical textual form. Absence is always
//! the literal `"N/A"`, never an empty string.

use crate::cell::RawCell;

/// Placeholder used for every missing or unusable value
pub const NOT_AVAILABLE: &str = "N/A";

/// Length of a `YYYY-MM-DD` token
const DATE_TOKEN_LEN: usize = 10;

/// Normalize a raw cell into a clean value.
///
/// - `Empty` becomes `"N/A"`
/// - typed dates become `YYYY-MM-DD`, dropping any time of day
/// - everything else goes through [`normalize_text`]
///
/// # Examples
///
/// ```
/// use reportlab_domain::{normalize, RawCell};
///
/// assert_eq!(normalize(&RawCell::Empty), "N/A");
/// assert_eq!(normalize(&RawCell::text(" 2024-01-15 10:30:00 ")), "2024-01-15");
/// ```
pub fn normalize(cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => NOT_AVAILABLE.to_string(),
        RawCell::Date(dt) => dt.format("%Y-%m-%d").to_string(),
        other => normalize_text(&other.to_string()),
    }
}

/// Clean a textual value.
///
/// Trims the ends, turns newlines into spaces and collapses pairs of spaces in
/// a single non-overlapping pass. Runs of three or more spaces are therefore
/// only partially collapsed; existing reports depend on that output.
///
/// Text shaped like `YYYY-MM-DD HH:MM:SS` is cut down to its date token even
/// when the source cell was plain text.
pub fn normalize_text(raw: &str) -> String {
    let cleaned = raw.trim().replace('\n', " ").replace("  ", " ");

    if cleaned.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    if cleaned.contains(' ') {
        if let Some(first) = cleaned.split_whitespace().next() {
            if looks_like_date_token(first) {
                return first.to_string();
            }
        }
    }

    cleaned
}

fn looks_like_date_token(token: &str) -> bool {
    token.chars().count() == DATE_TOKEN_LEN && token.matches('-').count() == 2
}
