//! Presentation layer for flix-report.
//!
//! Provides themes, value bars, the ratatui report views and the
//! interactive application, plus the plain-text and JSON renderers used
//! when the report is written to a file or piped.

pub mod app;
pub mod components;
pub mod error_view;
pub mod json;
pub mod report_view;
pub mod text;
pub mod themes;

pub use error_view::ErrorView;
pub use flix_core as core;
