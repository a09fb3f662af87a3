//! Presentation form of a failed run, shared by every renderer.

use flix_core::error::ReportError;
use serde::Serialize;

/// What the user sees when loading or summarising fails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    /// Stable short name, e.g. `schema` or `empty_dataset`.
    pub kind: String,
    pub message: String,
    /// Absent required columns; empty unless `kind` is `schema`.
    pub missing: Vec<String>,
}

impl From<&ReportError> for ErrorView {
    fn from(err: &ReportError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            missing: err.missing_columns().to_vec(),
        }
    }
}
