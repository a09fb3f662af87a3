//! Genre text normalisation.
//!
//! A title's `genres` cell is free text such as `"Comedy, Drama"`. Before
//! any comparison or counting it is trimmed and lowercased; the normalised
//! string is then split on `,` into individual tokens, each trimmed again.
//! A missing cell reads as the literal text `nan`.

use crate::models::Value;

/// Separator between genres in a single cell.
pub const SEPARATOR: char = ',';

/// Genre text of a missing cell.
pub const MISSING: &str = "nan";

/// Trim surrounding whitespace and lowercase. Idempotent.
///
/// ```
/// use flix_core::genres::normalize;
///
/// assert_eq!(normalize("  Comedy, Drama "), "comedy, drama");
/// assert_eq!(normalize(&normalize(" Action ")), normalize(" Action "));
/// ```
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split an already-normalised genre string into trimmed tokens.
///
/// Empty pieces are kept: `""` yields one empty token and `"a,,b"` yields
/// three.
pub fn split(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(SEPARATOR).map(str::trim)
}

/// Normalised genre string of one cell, [`MISSING`] when the cell is empty.
pub fn normalize_cell(value: &Value) -> String {
    match value.as_text() {
        Some(raw) => normalize(&raw),
        None => MISSING.to_string(),
    }
}

/// Normalise a cell and split it into owned tokens.
pub fn tokens(value: &Value) -> Vec<String> {
    split(&normalize_cell(value)).map(str::to_string).collect()
}
