mod bootstrap;

use std::process::ExitCode;

use anyhow::{Context, Result};
use flix_core::error::ReportError;
use flix_core::settings::Settings;
use flix_data::pipeline::{run, Report};
use flix_data::profile::{describe, DatasetOverview};
use flix_data::reader::load_table;
use flix_ui::app::App;
use flix_ui::text::TextOptions;
use flix_ui::{json, text, ErrorView};

fn main() -> Result<ExitCode> {
    let settings = Settings::load_with_last_used();
    settings.validate()?;

    bootstrap::ensure_directories()?;
    let tui = settings.format == "tui";
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref(), !tui)?;

    tracing::info!("flix-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, Format: {}, Theme: {}",
        settings.file.display(),
        settings.format,
        settings.theme
    );

    match summarise(&settings) {
        Ok((overview, report)) => {
            present(&settings, overview, report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!("Report failed: {}", err);
            present_error(&settings, &ErrorView::from(&err))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Load the catalogue, profile it and run the pipeline.
fn summarise(settings: &Settings) -> Result<(DatasetOverview, Report), ReportError> {
    let table = load_table(&settings.file)?;
    let overview = describe(&table, settings.preview_rows as usize);
    let report = run(&table)?;
    Ok((overview, report))
}

fn present(settings: &Settings, overview: DatasetOverview, report: Report) -> Result<()> {
    match settings.format.as_str() {
        "tui" => App::new(&settings.theme, overview, report).run()?,
        "json" => emit(settings, &json::render_report(&overview, &report)?)?,
        _ => {
            let options = TextOptions {
                max_ranked: settings.max_ranked as usize,
                ..TextOptions::default()
            };
            emit(settings, &text::render_report(&overview, &report, &options))?;
        }
    }
    Ok(())
}

fn present_error(settings: &Settings, error: &ErrorView) -> Result<()> {
    match settings.format.as_str() {
        "tui" => App::with_error(&settings.theme, error.clone()).run()?,
        "json" => emit(settings, &json::render_error(error)?)?,
        _ => {
            let rendered = text::render_error(error);
            if settings.output.is_some() {
                emit(settings, &rendered)?;
            }
            eprint!("{rendered}");
        }
    }
    Ok(())
}

/// Write `content` to `--output` when given, stdout otherwise.
fn emit(settings: &Settings, content: &str) -> Result<()> {
    match &settings.output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
