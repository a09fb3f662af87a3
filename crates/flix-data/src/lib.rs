//! Data layer for flix-report.
//!
//! Reads a catalogue CSV into a table, profiles its columns, and runs the
//! summarization pipeline that produces the report sections.

pub mod aggregator;
pub mod pipeline;
pub mod profile;
pub mod reader;

pub use flix_core as core;
pub use pipeline::{run, Report, ReportMetadata};
