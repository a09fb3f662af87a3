use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Columns the summarization pipeline requires, in the order they are
/// reported when absent.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "releaseYear",
    "genres",
    "imdbAverageRating",
    "type",
    "url",
    "title",
];

// ── Value ─────────────────────────────────────────────────────────────────────

/// A single cell of a loaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Empty cell or a recognised NA marker.
    Missing,
    /// Integer literal.
    Int(i64),
    /// Floating-point literal (always finite).
    Float(f64),
    /// Anything else.
    Text(String),
}

static MISSING: Value = Value::Missing;

impl Value {
    /// `true` for [`Value::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell. Text is parsed when it holds a finite
    /// number, so a numeric column polluted by one stray word still yields
    /// its numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite()),
            Value::Missing => None,
        }
    }

    /// Integer view for integer-like cells: integers, integral floats
    /// (`2020.0`) and integral numeric text (`"2020"`).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
            Value::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    /// Display form of the cell, `None` when missing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "NaN"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// One data row, stored positionally against the owning table's headers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }
}

/// An ordered sequence of rows sharing one header list.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Row>,
}

impl Table {
    /// Build an empty table with the given column names.
    ///
    /// When a header name repeats, lookups by name resolve to its first
    /// position.
    pub fn new(headers: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (pos, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(pos);
        }
        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding short rows with [`Value::Missing`] and
    /// truncating long ones to the header width.
    pub fn push_row(&mut self, mut values: Vec<Value>) {
        values.resize(self.headers.len(), Value::Missing);
        self.rows.push(Row::new(values));
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name` in the header list.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Cell at (`row`, `column`); [`Value::Missing`] for unknown columns.
    pub fn value<'r>(&self, row: &'r Row, column: &str) -> &'r Value {
        self.column_index(column)
            .and_then(|pos| row.values.get(pos))
            .unwrap_or(&MISSING)
    }

    /// Iterate over one column's cells in row order.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let pos = self.column_index(name);
        self.rows.iter().map(move |row| {
            pos.and_then(|p| row.values.get(p))
                .unwrap_or(&MISSING)
        })
    }

    /// Required columns absent from this table, in canonical order.
    pub fn missing_required_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }
}

// ── Report sections ───────────────────────────────────────────────────────────

/// Stable identifiers for the report's sections, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    YearDistribution,
    GenreDistribution,
    TopGenres,
    HighestRatedGenre,
    LowestRatedGenre,
    MostCommonType,
    RatingByType,
    UniqueUrls,
    TopRated,
}

impl SectionId {
    /// Every section in report order.
    pub const ALL: [SectionId; 9] = [
        SectionId::YearDistribution,
        SectionId::GenreDistribution,
        SectionId::TopGenres,
        SectionId::HighestRatedGenre,
        SectionId::LowestRatedGenre,
        SectionId::MostCommonType,
        SectionId::RatingByType,
        SectionId::UniqueUrls,
        SectionId::TopRated,
    ];

    /// Human-readable heading.
    pub fn title(self) -> &'static str {
        match self {
            SectionId::YearDistribution => "Distribution of Release Years",
            SectionId::GenreDistribution => "Distribution of Genres",
            SectionId::TopGenres => "Top 10 Genres",
            SectionId::HighestRatedGenre => "Highest Rated Genre",
            SectionId::LowestRatedGenre => "Lowest Rated Genre",
            SectionId::MostCommonType => "Most Watched Type",
            SectionId::RatingByType => "Average IMDb Rating by Type",
            SectionId::UniqueUrls => "Unique URLs",
            SectionId::TopRated => "Top Titles by IMDb Rating",
        }
    }
}

/// Numeric value of a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Count(u64),
    Mean(f64),
    /// A group with no rating to average. Serialises as `null`.
    Unrated,
}

impl Metric {
    /// Numeric value for scaling; an unrated group is `0.0`.
    pub fn as_f64(self) -> f64 {
        match self {
            Metric::Count(c) => c as f64,
            Metric::Mean(m) => m,
            Metric::Unrated => 0.0,
        }
    }
}

/// One `(key, numeric)` pair of a chart-ready table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub key: String,
    pub value: Metric,
}

impl TableEntry {
    pub fn count(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            value: Metric::Count(count),
        }
    }

    pub fn mean(key: impl Into<String>, mean: f64) -> Self {
        Self {
            key: key.into(),
            value: Metric::Mean(mean),
        }
    }

    pub fn unrated(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Metric::Unrated,
        }
    }
}

/// Above/below classification of table entries against a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// The threshold value (e.g. an unweighted mean of means).
    pub value: f64,
    /// Entry key → `true` when the entry's value is at or above `value`.
    pub above: BTreeMap<String, bool>,
}

/// One `(title, rating)` line of a ranked table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub title: String,
    pub rating: f64,
}

/// Payload of a report section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    /// A formatted finding.
    Text { text: String },
    /// An ordered `(key, numeric)` table, optionally classified.
    Table {
        entries: Vec<TableEntry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        threshold: Option<Threshold>,
    },
    /// Rows sorted by rating under an explicit tie-break rule.
    RankedTable { entries: Vec<RankedEntry> },
}

/// A named unit of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub id: SectionId,
    pub title: String,
    pub body: SectionBody,
}

impl ReportSection {
    pub fn text(id: SectionId, text: impl Into<String>) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            body: SectionBody::Text { text: text.into() },
        }
    }

    pub fn table(id: SectionId, entries: Vec<TableEntry>) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            body: SectionBody::Table {
                entries,
                threshold: None,
            },
        }
    }

    pub fn classified_table(id: SectionId, entries: Vec<TableEntry>, threshold: Threshold) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            body: SectionBody::Table {
                entries,
                threshold: Some(threshold),
            },
        }
    }

    pub fn ranked(id: SectionId, entries: Vec<RankedEntry>) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            body: SectionBody::RankedTable { entries },
        }
    }

    /// Table entries of a `Table` section, empty for other bodies.
    pub fn entries(&self) -> &[TableEntry] {
        match &self.body {
            SectionBody::Table { entries, .. } => entries,
            _ => &[],
        }
    }

    /// Text of a `Text` section.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            SectionBody::Text { text } => Some(text),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
