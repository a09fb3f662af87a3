//! Summarization pipeline for flix-report.
//!
//! Turns a loaded [`Table`] into the nine report sections, in fixed order,
//! or fails as a whole. The table is only ever read.

use std::time::Instant;

use chrono::Utc;
use flix_core::error::{ReportError, Result};
use flix_core::formatting::{display_key, format_count, format_rating};
use flix_core::models::{ReportSection, SectionId, Table, TableEntry, Threshold};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregator::{columns, TableAggregator};

/// Number of genres kept in the top-genres section.
pub const TOP_GENRES: usize = 10;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of table rows summarised.
    pub rows_processed: usize,
    /// Number of distinct genre tokens seen.
    pub distinct_genres: usize,
    /// Wall-clock seconds spent in [`run`].
    pub run_time_seconds: f64,
}

/// The complete output of [`run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sections: Vec<ReportSection>,
    pub metadata: ReportMetadata,
}

impl Report {
    /// The section with the given id.
    pub fn section(&self, id: SectionId) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full summarization pipeline.
///
/// 1. Validate that every required column exists.
/// 2. Count rows per release year.
/// 3. Count genre tokens; 4. keep the top ten.
/// 5. Find the best and worst rated genre strings.
/// 6. Find the most common type; 7. average rating per type.
/// 8. Count unique URLs; 9. rank every title by rating.
///
/// Either all nine sections are returned or the first error.
pub fn run(table: &Table) -> Result<Report> {
    let start = Instant::now();

    validate_schema(table)?;
    if table.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let genre_counts = TableAggregator::genre_counts(table);
    let (highest, lowest) = genre_rating_extremes(table)?;

    let sections = vec![
        year_distribution(table),
        genre_distribution(&genre_counts),
        top_genres(&genre_counts),
        highest,
        lowest,
        most_common_type(table),
        rating_by_type(table),
        unique_urls(table),
        top_rated(table),
    ];

    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        rows_processed: table.len(),
        distinct_genres: genre_counts.len(),
        run_time_seconds: start.elapsed().as_secs_f64(),
    };
    info!(
        "Summarised {} rows into {} sections in {:.3}s",
        metadata.rows_processed,
        sections.len(),
        metadata.run_time_seconds
    );

    Ok(Report { sections, metadata })
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// Fail with every absent required column, in canonical order.
pub fn validate_schema(table: &Table) -> Result<()> {
    let missing = table.missing_required_columns();
    if missing.is_empty() {
        Ok(())
    } else {
        debug!("Schema check failed, missing: {:?}", missing);
        Err(ReportError::Schema { missing })
    }
}

pub fn year_distribution(table: &Table) -> ReportSection {
    let entries = TableAggregator::year_counts(table)
        .into_iter()
        .map(|(year, count)| TableEntry::count(year.to_string(), count))
        .collect();
    ReportSection::table(SectionId::YearDistribution, entries)
}

pub fn genre_distribution(genre_counts: &[(String, u64)]) -> ReportSection {
    ReportSection::table(SectionId::GenreDistribution, count_entries(genre_counts))
}

pub fn top_genres(genre_counts: &[(String, u64)]) -> ReportSection {
    let top = &genre_counts[..genre_counts.len().min(TOP_GENRES)];
    ReportSection::table(SectionId::TopGenres, count_entries(top))
}

/// Highest and lowest mean-rated genre strings.
///
/// Ties go to the first group in ascending key order. Groups without any
/// rating take no part; if none has a rating both sections read `n/a`.
pub fn genre_rating_extremes(table: &Table) -> Result<(ReportSection, ReportSection)> {
    if table.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let mut highest: Option<(&str, f64)> = None;
    let mut lowest: Option<(&str, f64)> = None;
    let groups = TableAggregator::genre_rating_stats(table);
    for (genre, stats) in &groups {
        let Some(mean) = stats.mean() else {
            continue;
        };
        if highest.map_or(true, |(_, best)| mean > best) {
            highest = Some((genre.as_str(), mean));
        }
        if lowest.map_or(true, |(_, worst)| mean < worst) {
            lowest = Some((genre.as_str(), mean));
        }
    }
    debug!("{} genre groups compared", groups.len());

    Ok((
        ReportSection::text(SectionId::HighestRatedGenre, extreme_text("maximum", highest)),
        ReportSection::text(SectionId::LowestRatedGenre, extreme_text("minimum", lowest)),
    ))
}

/// The type with the most rows; ties go to the type seen first.
pub fn most_common_type(table: &Table) -> ReportSection {
    let mut best: Option<&(String, u64)> = None;
    let counts = TableAggregator::type_counts(table);
    for candidate in &counts {
        if best.map_or(true, |(_, n)| candidate.1 > *n) {
            best = Some(candidate);
        }
    }

    let text = match best {
        Some((kind, count)) => format!(
            "Most watched type: {} ({} titles)",
            kind,
            format_count(*count)
        ),
        None => "Most watched type: n/a".to_string(),
    };
    ReportSection::text(SectionId::MostCommonType, text)
}

/// Mean rating per type, classified against the unweighted mean of those
/// means. A type is "above" when its mean is at or over the threshold.
///
/// Every distinct type is listed. One without any rating is shown unrated,
/// takes no part in the threshold and is classified below it.
pub fn rating_by_type(table: &Table) -> ReportSection {
    let means = TableAggregator::type_mean_ratings(table);
    let rated: Vec<f64> = means.iter().filter_map(|(_, m)| *m).collect();
    let value = if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    };

    let above = means
        .iter()
        .map(|(kind, mean)| (kind.clone(), mean.is_some_and(|m| m >= value)))
        .collect();
    let entries = means
        .into_iter()
        .map(|(kind, mean)| match mean {
            Some(mean) => TableEntry::mean(kind, mean),
            None => TableEntry::unrated(kind),
        })
        .collect();

    ReportSection::classified_table(SectionId::RatingByType, entries, Threshold { value, above })
}

pub fn unique_urls(table: &Table) -> ReportSection {
    let count = TableAggregator::unique_count(table, columns::URL);
    ReportSection::text(
        SectionId::UniqueUrls,
        format!("Number of unique URLs: {}", format_count(count as u64)),
    )
}

/// Every title ranked by rating, missing ratings counted as `0.0`.
pub fn top_rated(table: &Table) -> ReportSection {
    ReportSection::ranked(SectionId::TopRated, TableAggregator::ranked_by_rating(table))
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn count_entries(counts: &[(String, u64)]) -> Vec<TableEntry> {
    counts
        .iter()
        .map(|(key, count)| TableEntry::count(key.clone(), *count))
        .collect()
}

fn extreme_text(which: &str, pick: Option<(&str, f64)>) -> String {
    match pick {
        Some((genre, mean)) => format!(
            "Genre with the {} average IMDb rating: {} ({})",
            which,
            display_key(genre),
            format_rating(mean)
        ),
        None => format!("Genre with the {} average IMDb rating: n/a", which),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
