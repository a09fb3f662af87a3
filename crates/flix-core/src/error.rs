use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading, summarising or rendering a catalogue.
#[derive(Error, Debug)]
pub enum ReportError {
    /// One or more required columns are absent from the input table.
    ///
    /// Raised once at pipeline entry; `missing` lists every absent column.
    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The table has no rows, so rating extremes are undefined.
    #[error("Dataset is empty: no rows to summarise")]
    EmptyDataset,

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV content could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReportError {
    /// Stable short name of the error kind, shown by the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Schema { .. } => "schema",
            Self::EmptyDataset => "empty_dataset",
            Self::FileRead { .. } => "file_read",
            Self::Csv(_) => "csv",
            Self::Json(_) => "json",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Other(_) => "other",
        }
    }

    /// Column names reported by a schema error; empty for every other kind.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::Schema { missing } => missing,
            _ => &[],
        }
    }
}

/// Convenience alias used throughout the flix crates.
pub type Result<T> = std::result::Result<T, ReportError>;
