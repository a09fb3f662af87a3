//! JSON rendering: the overview and report as one pretty-printed document.

use flix_core::error::Result;
use flix_data::profile::DatasetOverview;
use flix_data::Report;
use serde::Serialize;

use crate::error_view::ErrorView;

#[derive(Serialize)]
struct Document<'a> {
    overview: &'a DatasetOverview,
    report: &'a Report,
}

#[derive(Serialize)]
struct ErrorDocument<'a> {
    error: &'a ErrorView,
}

/// `{ "overview": …, "report": … }`, pretty-printed.
pub fn render_report(overview: &DatasetOverview, report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Document { overview, report })?)
}

/// `{ "error": { "kind", "message", "missing" } }`, pretty-printed.
pub fn render_error(error: &ErrorView) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ErrorDocument { error })?)
}
