use crate::themes::Theme;
use flix_core::formatting;
use flix_core::models::{Metric, SectionId, TableEntry};
use ratatui::text::{Line, Span};

/// Visual appearance of a value bar.
#[derive(Debug, Clone, Copy)]
pub struct BarConfig {
    /// Width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    /// Character used for the filled portion.
    pub filled_char: char,
    /// Character used for the empty portion.
    pub empty_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// Number of filled cells for `value` on a bar where `max` fills `width`.
///
/// Non-zero values always get at least one cell so small counts stay visible.
pub fn filled_cells(value: f64, max: f64, width: u16) -> u16 {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let cells = ((value / max).min(1.0) * width as f64).round() as u16;
    cells.max(1).min(width)
}

/// Plain-text bar, filled then empty, exactly `config.width` characters.
pub fn text_bar(value: f64, max: f64, config: &BarConfig) -> String {
    let filled = filled_cells(value, max, config.width) as usize;
    let empty = config.width as usize - filled;
    std::iter::repeat(config.filled_char)
        .take(filled)
        .chain(std::iter::repeat(config.empty_char).take(empty))
        .collect()
}

// ── Entry helpers ─────────────────────────────────────────────────────────────

/// Sections whose entries are also shown as shares of their total.
pub fn shows_shares(id: SectionId) -> bool {
    matches!(id, SectionId::TopGenres | SectionId::RatingByType)
}

/// Each entry's share of the entries' total, in percent.
pub fn shares(entries: &[TableEntry]) -> Vec<f64> {
    let total: f64 = entries.iter().map(|e| e.value.as_f64()).sum();
    entries
        .iter()
        .map(|e| formatting::percentage(e.value.as_f64(), total, 1))
        .collect()
}

/// Largest value among `entries`, `0.0` when empty.
pub fn max_value(entries: &[TableEntry]) -> f64 {
    entries
        .iter()
        .map(|e| e.value.as_f64())
        .fold(0.0, f64::max)
}

/// Counts with thousands separators, means to two decimals.
pub fn metric_label(metric: Metric) -> String {
    match metric {
        Metric::Count(c) => formatting::format_count(c),
        Metric::Mean(m) => formatting::format_rating(m),
        Metric::Unrated => "n/a".to_string(),
    }
}

// ── ValueBar ─────────────────────────────────────────────────────────────────

/// Horizontal bar for one table entry, scaled against the largest entry.
///
/// Renders as `<bar> <value>` with an optional share percentage appended.
pub struct ValueBar<'a> {
    pub value: f64,
    pub max: f64,
    /// Formatted value shown after the bar.
    pub label: String,
    /// Share of the whole, in percent.
    pub share: Option<f64>,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> ValueBar<'a> {
    pub fn new(value: f64, max: f64, label: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            value,
            max,
            label: label.into(),
            share: None,
            theme,
            config: BarConfig::default(),
        }
    }

    /// Append `(<pct>%)` after the label.
    pub fn with_share(mut self, share: f64) -> Self {
        self.share = Some(share);
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    /// Render as a [`Line`] of styled spans.
    pub fn to_line(&self) -> Line<'a> {
        let filled = filled_cells(self.value, self.max, self.config.width);
        let empty = self.config.width.saturating_sub(filled);

        let filled_str: String =
            std::iter::repeat(self.config.filled_char).take(filled as usize).collect();
        let empty_str: String =
            std::iter::repeat(self.config.empty_char).take(empty as usize).collect();

        let mut label = format!(" {}", self.label);
        if let Some(share) = self.share {
            label.push_str(&format!(" ({}%)", formatting::format_number(share, 1)));
        }

        Line::from(vec![
            Span::styled(filled_str, self.theme.bar_fill),
            Span::styled(empty_str, self.theme.bar_empty),
            Span::styled(label, self.theme.bar_label),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
