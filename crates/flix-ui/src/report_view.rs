//! ratatui views for the overview page, each report section and a failed
//! run.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use flix_core::formatting::{display_key, format_count, format_rating};
use flix_core::models::{ReportSection, SectionBody};
use flix_data::profile::DatasetOverview;

use crate::components::bar::{self, ValueBar};
use crate::error_view::ErrorView;
use crate::themes::Theme;

/// Render the dataset overview: counts, preview, column info and the
/// unique year / genre listings.
pub fn render_overview(frame: &mut Frame, area: Rect, overview: &DatasetOverview, scroll: u16, theme: &Theme) {
    let mut lines: Vec<Line> = vec![Line::from(vec![
        Span::styled("Rows: ", theme.label),
        Span::styled(format_count(overview.row_count as u64), theme.value),
        Span::styled("   Columns: ", theme.label),
        Span::styled(overview.column_count.to_string(), theme.value),
    ])];

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Data Preview", theme.header)));
    lines.push(Line::from(Span::styled(overview.headers.join(" | "), theme.table_header)));
    for (i, row) in overview.preview.iter().enumerate() {
        let style = if i % 2 == 0 { theme.table_row } else { theme.table_row_alt };
        lines.push(Line::from(Span::styled(row.join(" | "), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Column Info", theme.header)));
    for column in &overview.columns {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<20}", column.name), theme.label),
            Span::styled(format!("{:<9}", format!("{:?}", column.kind).to_lowercase()), theme.text),
            Span::styled(format!("{} non-null", format_count(column.non_null as u64)), theme.text),
            Span::styled(format!("  {} nulls", format_count(column.nulls as u64)), theme.dim),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Unique Release Years", theme.header)));
    let years: Vec<String> = overview.unique_years.iter().map(i64::to_string).collect();
    lines.push(Line::from(Span::styled(years.join(", "), theme.text)));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Unique Genres", theme.header)));
    for genre in &overview.unique_genres {
        lines.push(Line::from(Span::styled(format!("  {}", display_key(genre)), theme.text)));
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(bordered(" Overview ", theme))
            .scroll((scroll, 0)),
        area,
    );
}

/// Render one report section: text as a paragraph, tables as bar lists,
/// ranked rows as a table.
pub fn render_section(frame: &mut Frame, area: Rect, section: &ReportSection, scroll: u16, theme: &Theme) {
    let title = format!(" {} ", section.title);
    match &section.body {
        SectionBody::Text { text } => {
            let paragraph = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(text.clone(), theme.value)),
            ]))
            .wrap(Wrap { trim: true })
            .block(bordered(&title, theme));
            frame.render_widget(paragraph, area);
        }
        SectionBody::Table { entries, threshold } => {
            let max = bar::max_value(entries);
            let shares = bar::shows_shares(section.id).then(|| bar::shares(entries));
            let key_width = entries
                .iter()
                .map(|e| display_key(&e.key).chars().count())
                .max()
                .unwrap_or(0)
                .min(30);

            let mut lines: Vec<Line> = Vec::with_capacity(entries.len() + 2);
            for (i, entry) in entries.iter().enumerate() {
                let mut value_bar =
                    ValueBar::new(entry.value.as_f64(), max, bar::metric_label(entry.value), theme);
                if let Some(shares) = &shares {
                    value_bar = value_bar.with_share(shares[i]);
                }
                let mut spans = vec![Span::styled(
                    format!("{:<width$}  ", display_key(&entry.key), width = key_width),
                    theme.label,
                )];
                spans.extend(value_bar.to_line().spans);
                if let Some(above) = threshold.as_ref().and_then(|t| t.above.get(&entry.key)) {
                    let mark = if *above { "  above" } else { "  below" };
                    spans.push(Span::styled(mark, theme.threshold_style(*above)));
                }
                lines.push(Line::from(spans));
            }
            if entries.is_empty() {
                lines.push(Line::from(Span::styled("No data", theme.warning)));
            }
            if let Some(threshold) = threshold {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("Threshold (mean of means): ", theme.label),
                    Span::styled(format_rating(threshold.value), theme.value),
                ]));
            }

            frame.render_widget(
                Paragraph::new(Text::from(lines))
                    .block(bordered(&title, theme))
                    .scroll((scroll, 0)),
                area,
            );
        }
        SectionBody::RankedTable { entries } => {
            let header = Row::new(
                ["#", "Title", "Rating"]
                    .iter()
                    .map(|h| Cell::from(*h).style(theme.table_header)),
            )
            .height(1);

            let rows: Vec<Row> = entries
                .iter()
                .enumerate()
                .skip(scroll as usize)
                .map(|(i, entry)| {
                    let style = if i % 2 == 0 { theme.table_row } else { theme.table_row_alt };
                    Row::new(vec![
                        Cell::from((i + 1).to_string()),
                        Cell::from(entry.title.clone()),
                        Cell::from(format_rating(entry.rating)).style(theme.rating_style(entry.rating)),
                    ])
                    .style(style)
                })
                .collect();

            let widths = [Constraint::Length(6), Constraint::Min(20), Constraint::Length(8)];
            let table = Table::new(rows, widths)
                .header(header)
                .block(bordered(&title, theme))
                .style(theme.text);
            frame.render_widget(table, area);
        }
    }
}

/// Render a failed run: the error kind, its message and any missing
/// columns.
pub fn render_error(frame: &mut Frame, area: Rect, error: &ErrorView, theme: &Theme) {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Error: ", theme.error),
            Span::styled(error.kind.clone(), theme.bold),
        ]),
        Line::from(Span::styled(error.message.clone(), theme.text)),
    ];
    if !error.missing.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Missing columns:", theme.warning)));
        for column in &error.missing {
            lines.push(Line::from(Span::styled(format!("  - {column}"), theme.text)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(bordered(" Flix Report ", theme)),
        area,
    );
}

fn bordered<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(title.to_string(), theme.header))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
