//! Grouping and counting primitives over a loaded catalogue [`Table`].
//!
//! Every function reads the table without mutating it; the pipeline composes
//! them into report sections.

use std::collections::{BTreeMap, HashMap, HashSet};

use flix_core::genres;
use flix_core::models::{RankedEntry, Table};
use tracing::debug;

/// Column names read by the aggregator.
pub mod columns {
    pub const YEAR: &str = "releaseYear";
    pub const GENRES: &str = "genres";
    pub const RATING: &str = "imdbAverageRating";
    pub const TYPE: &str = "type";
    pub const URL: &str = "url";
    pub const TITLE: &str = "title";
}

// ── RatingStats ───────────────────────────────────────────────────────────────

/// Running rating statistics for one group. Missing ratings never reach it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingStats {
    pub sum: f64,
    pub rated: u32,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl RatingStats {
    /// Fold one rating into the totals.
    pub fn add(&mut self, rating: f64) {
        self.sum += rating;
        self.rated += 1;
        self.max = Some(self.max.map_or(rating, |m| m.max(rating)));
        self.min = Some(self.min.map_or(rating, |m| m.min(rating)));
    }

    /// Arithmetic mean, `None` when no rating was added.
    pub fn mean(&self) -> Option<f64> {
        if self.rated == 0 {
            None
        } else {
            Some(self.sum / self.rated as f64)
        }
    }
}

// ── TableAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups catalogue rows.
pub struct TableAggregator;

impl TableAggregator {
    /// Rows per release year, ascending by year.
    ///
    /// Rows whose year is missing or not integer-like are left out.
    pub fn year_counts(table: &Table) -> BTreeMap<i64, u64> {
        let mut counts = BTreeMap::new();
        let mut skipped = 0usize;
        for value in table.column(columns::YEAR) {
            match value.as_integer() {
                Some(year) => *counts.entry(year).or_insert(0) += 1,
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("{} rows without an integer release year skipped", skipped);
        }
        counts
    }

    /// Genre token counts, count descending with ties broken by ascending
    /// genre name.
    ///
    /// A missing `genres` cell counts as one `nan` token.
    pub fn genre_counts(table: &Table) -> Vec<(String, u64)> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for value in table.column(columns::GENRES) {
            for token in genres::tokens(value) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut sorted: Vec<(String, u64)> = counts.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sorted
    }

    /// Rating statistics grouped by the whole normalised `genres` string
    /// (not split into tokens), keyed in ascending order.
    ///
    /// Groups whose rows are all unrated are present with `rated == 0`.
    /// Missing cells group under `nan`.
    pub fn genre_rating_stats(table: &Table) -> BTreeMap<String, RatingStats> {
        let mut groups: BTreeMap<String, RatingStats> = BTreeMap::new();
        for row in table.rows() {
            let key = genres::normalize_cell(table.value(row, columns::GENRES));
            let stats = groups.entry(key).or_default();
            if let Some(rating) = table.value(row, columns::RATING).as_f64() {
                stats.add(rating);
            }
        }
        groups
    }

    /// Rows per `type`, in order of first appearance. Missing types are
    /// skipped.
    pub fn type_counts(table: &Table) -> Vec<(String, u64)> {
        let mut order: Vec<(String, u64)> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();
        for value in table.column(columns::TYPE) {
            let Some(kind) = value.as_text() else {
                continue;
            };
            match position.get(&kind) {
                Some(&i) => order[i].1 += 1,
                None => {
                    position.insert(kind.clone(), order.len());
                    order.push((kind, 1));
                }
            }
        }
        order
    }

    /// Mean rating per `type`, in order of first appearance.
    ///
    /// A type with no rated row has a `None` mean. Rows with a missing type
    /// are skipped.
    pub fn type_mean_ratings(table: &Table) -> Vec<(String, Option<f64>)> {
        let mut order: Vec<String> = Vec::new();
        let mut stats: HashMap<String, RatingStats> = HashMap::new();
        for row in table.rows() {
            let Some(kind) = table.value(row, columns::TYPE).as_text() else {
                continue;
            };
            let entry = stats.entry(kind.clone()).or_insert_with(|| {
                order.push(kind);
                RatingStats::default()
            });
            if let Some(rating) = table.value(row, columns::RATING).as_f64() {
                entry.add(rating);
            }
        }

        order
            .into_iter()
            .map(|kind| {
                let mean = stats.get(&kind).and_then(RatingStats::mean);
                (kind, mean)
            })
            .collect()
    }

    /// Number of distinct non-missing values in `column`.
    pub fn unique_count(table: &Table, column: &str) -> usize {
        table
            .column(column)
            .filter_map(|v| v.as_text())
            .collect::<HashSet<String>>()
            .len()
    }

    /// Every row as `(title, rating)`, missing ratings filled with `0.0`,
    /// sorted by rating descending. The sort is stable, so equal ratings keep
    /// their row order.
    pub fn ranked_by_rating(table: &Table) -> Vec<RankedEntry> {
        let mut ranked: Vec<RankedEntry> = table
            .rows()
            .iter()
            .map(|row| RankedEntry {
                title: table.value(row, columns::TITLE).as_text().unwrap_or_default(),
                rating: table.value(row, columns::RATING).as_f64().unwrap_or(0.0),
            })
            .collect();
        ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        ranked
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use flix_core::models::Value;

    type Cells = (Value, Value, Value, Value, Value, Value);

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    /// Table with the six catalogue columns; each tuple is
    /// `(year, genres, rating, type, url, title)`.
    fn catalogue(rows: &[Cells]) -> Table {
        let mut table = Table::new(
            ["releaseYear", "genres", "imdbAverageRating", "type", "url", "title"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for (y, g, r, t, u, ti) in rows {
            table.push_row(vec![
                y.clone(),
                g.clone(),
                r.clone(),
                t.clone(),
                u.clone(),
                ti.clone(),
            ]);
        }
        table
    }

    fn row(year: Value, genres: &str, rating: Value, kind: &str, title: &str) -> Cells {
        (
            year,
            text(genres),
            rating,
            text(kind),
            text(&format!("https://example.com/{title}")),
            text(title),
        )
    }

    // ── RatingStats ───────────────────────────────────────────────────────────

    #[test]
    fn test_rating_stats_accumulates() {
        let mut stats = RatingStats::default();
        assert_eq!(stats.mean(), None);
        stats.add(6.0);
        stats.add(8.0);
        assert_eq!(stats.rated, 2);
        assert_eq!(stats.mean(), Some(7.0));
        assert_eq!(stats.max, Some(8.0));
        assert_eq!(stats.min, Some(6.0));
    }

    // ── year_counts ───────────────────────────────────────────────────────────

    #[test]
    fn test_year_counts_sorted_ascending() {
        let table = catalogue(&[
            row(Value::Int(2021), "a", Value::Missing, "movie", "x"),
            row(Value::Int(2019), "a", Value::Missing, "movie", "y"),
            row(Value::Int(2021), "a", Value::Missing, "movie", "z"),
        ]);
        let counts: Vec<(i64, u64)> = TableAggregator::year_counts(&table).into_iter().collect();
        assert_eq!(counts, vec![(2019, 1), (2021, 2)]);
    }

    #[test]
    fn test_year_counts_skips_missing_and_accepts_integral_floats() {
        let table = catalogue(&[
            row(Value::Float(2020.0), "a", Value::Missing, "movie", "x"),
            row(Value::Missing, "a", Value::Missing, "movie", "y"),
            row(text("unknown"), "a", Value::Missing, "movie", "z"),
            row(text("2020"), "a", Value::Missing, "movie", "w"),
        ]);
        let counts = TableAggregator::year_counts(&table);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&2020], 2);
    }

    // ── genre_counts ──────────────────────────────────────────────────────────

    #[test]
    fn test_genre_counts_normalizes_and_orders() {
        let table = catalogue(&[
            row(Value::Int(2020), "Comedy, Drama", Value::Missing, "movie", "a"),
            row(Value::Int(2020), " drama", Value::Missing, "movie", "b"),
            row(Value::Int(2020), "Action", Value::Missing, "movie", "c"),
        ]);
        let counts = TableAggregator::genre_counts(&table);
        assert_eq!(
            counts,
            vec![
                ("drama".to_string(), 2),
                ("action".to_string(), 1),
                ("comedy".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_genre_counts_missing_cell_is_one_nan_token() {
        let mut table = catalogue(&[row(Value::Int(2020), "Drama", Value::Missing, "movie", "a")]);
        table.push_row(vec![Value::Int(2020), Value::Missing]);
        let counts = TableAggregator::genre_counts(&table);
        assert!(counts.contains(&("nan".to_string(), 1)));
        assert!(counts.contains(&("drama".to_string(), 1)));
        assert!(!counts.iter().any(|(genre, _)| genre.is_empty()));
    }

    #[test]
    fn test_genre_counts_keeps_empty_pieces_between_separators() {
        let table = catalogue(&[row(Value::Int(2020), "Drama,,Comedy", Value::Missing, "movie", "a")]);
        let counts = TableAggregator::genre_counts(&table);
        assert!(counts.contains(&(String::new(), 1)));
        assert_eq!(counts.len(), 3);
    }

    // ── genre_rating_stats ────────────────────────────────────────────────────

    #[test]
    fn test_genre_rating_stats_groups_by_whole_string() {
        let table = catalogue(&[
            row(Value::Int(2020), "Comedy, Drama", Value::Float(7.0), "movie", "a"),
            row(Value::Int(2020), "comedy, drama ", Value::Float(9.0), "movie", "b"),
            row(Value::Int(2020), "Drama", Value::Missing, "movie", "c"),
        ]);
        let groups = TableAggregator::genre_rating_stats(&table);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["comedy, drama"].mean(), Some(8.0));
        assert_eq!(groups["drama"].rated, 0);
    }

    #[test]
    fn test_genre_rating_stats_missing_cell_groups_as_nan() {
        let mut table = catalogue(&[row(Value::Int(2020), "Drama", Value::Float(8.0), "movie", "a")]);
        table.push_row(vec![Value::Int(2020), Value::Missing, Value::Float(7.0)]);
        let groups = TableAggregator::genre_rating_stats(&table);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["nan"].mean(), Some(7.0));
        assert!(!groups.contains_key(""));
    }

    // ── type_counts / type_mean_ratings ───────────────────────────────────────

    #[test]
    fn test_type_counts_first_occurrence_order() {
        let table = catalogue(&[
            row(Value::Int(2020), "a", Value::Missing, "tv", "a"),
            row(Value::Int(2020), "a", Value::Missing, "movie", "b"),
            row(Value::Int(2020), "a", Value::Missing, "movie", "c"),
        ]);
        let counts = TableAggregator::type_counts(&table);
        assert_eq!(counts, vec![("tv".to_string(), 1), ("movie".to_string(), 2)]);
    }

    #[test]
    fn test_type_mean_ratings_keeps_unrated_types() {
        let table = catalogue(&[
            row(Value::Int(2020), "a", Value::Float(6.0), "movie", "a"),
            row(Value::Int(2020), "a", Value::Missing, "tv", "b"),
            row(Value::Int(2020), "a", Value::Float(8.0), "movie", "c"),
        ]);
        let means = TableAggregator::type_mean_ratings(&table);
        assert_eq!(
            means,
            vec![("movie".to_string(), Some(7.0)), ("tv".to_string(), None)]
        );
    }

    // ── unique_count ──────────────────────────────────────────────────────────

    #[test]
    fn test_unique_count_ignores_missing() {
        let mut table = catalogue(&[
            row(Value::Int(2020), "a", Value::Missing, "movie", "a"),
            row(Value::Int(2020), "a", Value::Missing, "movie", "a"),
            row(Value::Int(2020), "a", Value::Missing, "movie", "b"),
        ]);
        table.push_row(vec![Value::Int(2020)]);
        assert_eq!(TableAggregator::unique_count(&table, columns::URL), 2);
    }

    // ── ranked_by_rating ──────────────────────────────────────────────────────

    #[test]
    fn test_ranked_by_rating_fills_missing_and_keeps_ties_stable() {
        let table = catalogue(&[
            row(Value::Int(2020), "a", Value::Missing, "movie", "A"),
            row(Value::Int(2020), "a", Value::Float(7.0), "movie", "B"),
            row(Value::Int(2020), "a", Value::Float(7.0), "movie", "C"),
            row(Value::Int(2020), "a", Value::Float(9.5), "movie", "D"),
        ]);
        let ranked = TableAggregator::ranked_by_rating(&table);
        let titles: Vec<&str> = ranked.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "B", "C", "A"]);
        assert_eq!(ranked[3].rating, 0.0);
    }

    #[test]
    fn test_ranked_by_rating_missing_title_is_empty() {
        let mut table = catalogue(&[]);
        table.push_row(vec![Value::Int(2020), text("a"), Value::Float(5.0)]);
        let ranked = TableAggregator::ranked_by_rating(&table);
        assert_eq!(ranked[0].title, "");
        assert_eq!(ranked[0].rating, 5.0);
    }
}
