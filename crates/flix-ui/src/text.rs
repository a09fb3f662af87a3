//! Plain-text rendering of a dataset overview and its report.
//!
//! Output is deterministic for a given input and safe to pipe into a file:
//! no colours, column alignment by display width.

use flix_core::formatting::{display_key, format_count, format_rating};
use flix_core::models::{ReportSection, SectionBody};
use flix_data::profile::DatasetOverview;
use flix_data::Report;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::components::bar::{self, BarConfig};
use crate::error_view::ErrorView;

/// Widest a preview cell may be before it is cut with `…`.
const MAX_CELL_WIDTH: usize = 24;

/// Knobs for [`render_report`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Rows shown for the ranked section; `0` shows every row.
    pub max_ranked: usize,
    pub bar_width: u16,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            max_ranked: 25,
            bar_width: 30,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Render the overview followed by every report section.
pub fn render_report(overview: &DatasetOverview, report: &Report, options: &TextOptions) -> String {
    let mut out = String::new();
    heading(&mut out, "Flix Report", '=');
    out.push_str(&format!(
        "Rows: {}  Columns: {}  Generated: {}\n",
        format_count(overview.row_count as u64),
        overview.column_count,
        report.metadata.generated_at
    ));

    render_overview(&mut out, overview);
    for section in &report.sections {
        render_section(&mut out, section, options);
    }
    out
}

/// Render a failed run as `error: <message>` plus any missing columns.
pub fn render_error(error: &ErrorView) -> String {
    let mut out = format!("error: {}\n", error.message);
    if !error.missing.is_empty() {
        out.push_str("missing columns:\n");
        for column in &error.missing {
            out.push_str(&format!("  - {column}\n"));
        }
    }
    out
}

// ── Overview ──────────────────────────────────────────────────────────────────

fn render_overview(out: &mut String, overview: &DatasetOverview) {
    heading(out, "Data Preview", '-');
    if overview.preview.is_empty() {
        out.push_str("(no rows)\n");
    } else {
        let mut rows = vec![overview.headers.clone()];
        rows.extend(overview.preview.iter().cloned());
        grid(out, &rows, &[]);
    }

    heading(out, "Column Info", '-');
    let mut rows = vec![vec![
        "Column".to_string(),
        "Type".to_string(),
        "Non-Null".to_string(),
        "Nulls".to_string(),
    ]];
    for column in &overview.columns {
        rows.push(vec![
            column.name.clone(),
            format!("{:?}", column.kind).to_lowercase(),
            format_count(column.non_null as u64),
            format_count(column.nulls as u64),
        ]);
    }
    grid(out, &rows, &[2, 3]);

    heading(out, "Unique Release Years", '-');
    if overview.unique_years.is_empty() {
        out.push_str("(none)\n");
    } else {
        let years: Vec<String> = overview.unique_years.iter().map(i64::to_string).collect();
        out.push_str(&years.join(", "));
        out.push('\n');
    }

    heading(out, "Unique Genres", '-');
    if overview.unique_genres.is_empty() {
        out.push_str("(none)\n");
    }
    for genre in &overview.unique_genres {
        out.push_str(&format!("  {}\n", display_key(genre)));
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

fn render_section(out: &mut String, section: &ReportSection, options: &TextOptions) {
    heading(out, &section.title, '-');
    match &section.body {
        SectionBody::Text { text } => {
            out.push_str(text);
            out.push('\n');
        }
        SectionBody::Table { entries, threshold } => {
            if entries.is_empty() {
                out.push_str("(no data)\n");
                return;
            }
            let config = BarConfig {
                width: options.bar_width,
                ..BarConfig::default()
            };
            let max = bar::max_value(entries);
            let shares = bar::shows_shares(section.id).then(|| bar::shares(entries));
            let key_width = entries
                .iter()
                .map(|e| display_key(&e.key).width())
                .max()
                .unwrap_or(0);
            let labels: Vec<String> = entries.iter().map(|e| bar::metric_label(e.value)).collect();
            let label_width = labels.iter().map(|l| l.width()).max().unwrap_or(0);

            for (i, entry) in entries.iter().enumerate() {
                let mut line = format!(
                    "{}  {}  {}",
                    pad_right(display_key(&entry.key), key_width),
                    pad_left(&labels[i], label_width),
                    bar::text_bar(entry.value.as_f64(), max, &config)
                );
                if let Some(shares) = &shares {
                    line.push_str(&format!("  {:>5.1}%", shares[i]));
                }
                if let Some(above) = threshold.as_ref().and_then(|t| t.above.get(&entry.key)) {
                    line.push_str(if *above { "  above" } else { "  below" });
                }
                out.push_str(line.trim_end());
                out.push('\n');
            }
            if let Some(threshold) = threshold {
                out.push_str(&format!(
                    "Threshold (mean of means): {}\n",
                    format_rating(threshold.value)
                ));
            }
        }
        SectionBody::RankedTable { entries } => {
            let shown = if options.max_ranked == 0 {
                entries.len()
            } else {
                entries.len().min(options.max_ranked)
            };
            let rank_width = shown.to_string().len();
            let title_width = entries[..shown]
                .iter()
                .map(|e| e.title.width().min(MAX_CELL_WIDTH * 2))
                .max()
                .unwrap_or(0);
            for (i, entry) in entries[..shown].iter().enumerate() {
                out.push_str(&format!(
                    "{:>rank_width$}. {}  {}\n",
                    i + 1,
                    pad_right(&fit(&entry.title, MAX_CELL_WIDTH * 2), title_width),
                    format_rating(entry.rating)
                ));
            }
            if shown < entries.len() {
                out.push_str(&format!(
                    "... {} more\n",
                    format_count((entries.len() - shown) as u64)
                ));
            }
        }
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn heading(out: &mut String, title: &str, underline: char) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(title);
    out.push('\n');
    out.push_str(&underline.to_string().repeat(title.width()));
    out.push('\n');
}

/// Aligned grid; columns listed in `right` are right-aligned.
fn grid(out: &mut String, rows: &[Vec<String>], right: &[usize]) {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| fit(cell, MAX_CELL_WIDTH).width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (cell, width))| {
                let cell = fit(cell, MAX_CELL_WIDTH);
                if right.contains(&c) {
                    pad_left(&cell, *width)
                } else {
                    pad_right(&cell, *width)
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
}

/// Cut `s` to at most `width` columns, marking the cut with `…`.
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut used = 0;
    let mut cut = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        cut.push(ch);
    }
    cut.push('…');
    cut
}

fn pad_right(s: &str, width: usize) -> String {
    let gap = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(gap))
}

fn pad_left(s: &str, width: usize) -> String {
    let gap = width.saturating_sub(s.width());
    format!("{}{s}", " ".repeat(gap))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
