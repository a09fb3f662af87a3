//! Dataset overview shown ahead of the report: a row preview, per-column
//! type and null counts, and the distinct release years and genre strings.

use std::collections::BTreeSet;

use flix_core::genres;
use flix_core::models::{Table, Value};
use serde::Serialize;
use tracing::debug;

use crate::aggregator::columns;

/// Inferred type of a column from the cells it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    /// Numbers and text side by side.
    Mixed,
    /// Every cell missing.
    Empty,
}

/// Type and completeness of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
    pub non_null: usize,
    pub nulls: usize,
}

/// Everything the overview page displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub row_count: usize,
    pub column_count: usize,
    pub headers: Vec<String>,
    /// First rows as display strings, missing cells shown as `NaN`.
    pub preview: Vec<Vec<String>>,
    pub columns: Vec<ColumnInfo>,
    pub unique_years: Vec<i64>,
    pub unique_genres: Vec<String>,
}

/// Profile `table`, keeping at most `preview_rows` rows for the preview.
///
/// Any table is accepted; absent catalogue columns give empty listings.
pub fn describe(table: &Table, preview_rows: usize) -> DatasetOverview {
    let preview = table
        .rows()
        .iter()
        .take(preview_rows)
        .map(|row| row.values.iter().map(Value::to_string).collect())
        .collect();

    let columns = table
        .headers()
        .iter()
        .enumerate()
        .map(|(pos, name)| {
            let cells = table.rows().iter().filter_map(|row| row.values.get(pos));
            column_info(name, cells)
        })
        .collect();

    let unique_years: BTreeSet<i64> = table
        .column(columns::YEAR)
        .filter_map(Value::as_integer)
        .collect();

    let unique_genres: BTreeSet<String> = if table.has_column(columns::GENRES) {
        table.column(columns::GENRES).map(genres::normalize_cell).collect()
    } else {
        BTreeSet::new()
    };

    debug!(
        "Overview: {} distinct years, {} distinct genre strings",
        unique_years.len(),
        unique_genres.len()
    );

    DatasetOverview {
        row_count: table.len(),
        column_count: table.headers().len(),
        headers: table.headers().to_vec(),
        preview,
        columns,
        unique_years: unique_years.into_iter().collect(),
        unique_genres: unique_genres.into_iter().collect(),
    }
}

fn column_info<'a>(name: &str, cells: impl Iterator<Item = &'a Value>) -> ColumnInfo {
    let (mut ints, mut floats, mut texts, mut nulls) = (0usize, 0usize, 0usize, 0usize);
    for cell in cells {
        match cell {
            Value::Missing => nulls += 1,
            Value::Int(_) => ints += 1,
            Value::Float(_) => floats += 1,
            Value::Text(_) => texts += 1,
        }
    }

    let kind = match (ints + floats, texts) {
        (0, 0) => ColumnKind::Empty,
        (_, 0) if floats == 0 => ColumnKind::Integer,
        (_, 0) => ColumnKind::Float,
        (0, _) => ColumnKind::Text,
        _ => ColumnKind::Mixed,
    };

    ColumnInfo {
        name: name.to_string(),
        kind,
        non_null: ints + floats + texts,
        nulls,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
