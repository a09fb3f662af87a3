//! Shared model layer for flix-report.
//!
//! Defines the loaded [`models::Table`], the report section types handed to
//! the presentation layer, the error taxonomy, genre normalisation, number
//! formatting and the command-line settings.

pub mod error;
pub mod formatting;
pub mod genres;
pub mod models;
pub mod settings;

pub use error::{ReportError, Result};
