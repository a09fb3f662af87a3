//! CSV loading for flix-report.
//!
//! Reads a delimited catalogue file into a [`Table`]. Cells are typed per
//! column: a column whose every present cell is an integer becomes
//! [`Value::Int`], one whose every present cell is numeric becomes
//! [`Value::Float`], anything else keeps its trimmed text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flix_core::error::{ReportError, Result};
use flix_core::models::{Table, Value};
use tracing::{debug, warn};

/// Cell contents treated as missing, besides the empty string.
pub const NA_MARKERS: [&str; 10] = [
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Per-cell typing decision, before the column-wide pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellClass {
    Missing,
    Int(i64),
    Float(f64),
    Text,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the file at `path`. Files ending in `.tsv` are read tab-separated,
/// everything else comma-separated.
pub fn load_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_table(file, delimiter_for(path))?;
    debug!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers().len(),
        path.display()
    );
    Ok(table)
}

/// Parse delimited text with a header row from any reader.
pub fn parse_table<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    let width = headers.len();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    let mut overlong = 0usize;
    for record in rdr.records() {
        let record = record?;
        if record.len() > width {
            if overlong == 0 {
                warn!(
                    "Row {} has {} fields but the header has {}; extra fields ignored",
                    raw_rows.len() + 1,
                    record.len(),
                    width
                );
            }
            overlong += 1;
        }
        raw_rows.push(record.iter().take(width).map(str::to_string).collect());
    }
    if overlong > 1 {
        debug!("{} rows in total had extra fields", overlong);
    }

    let kinds: Vec<ColumnType> = (0..width)
        .map(|col| infer_column_type(raw_rows.iter().filter_map(|r| r.get(col))))
        .collect();

    let mut table = Table::new(headers);
    for raw in raw_rows {
        let values = raw
            .iter()
            .zip(&kinds)
            .map(|(field, kind)| convert_cell(field, *kind))
            .collect();
        table.push_row(values);
    }
    Ok(table)
}

/// Classify a single field.
///
/// Only fields containing a digit are tried as numbers, so titles such as
/// `"Infinity"` or `"NaN Story"` stay text.
pub fn classify_cell(field: &str) -> CellClass {
    let trimmed = field.trim();
    if trimmed.is_empty() || NA_MARKERS.contains(&trimmed) {
        return CellClass::Missing;
    }
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return CellClass::Text;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellClass::Int(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => CellClass::Float(f),
        _ => CellClass::Text,
    }
}

/// `b'\t'` for `.tsv` paths, `b','` otherwise.
pub fn delimiter_for(path: &Path) -> u8 {
    let is_tsv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("tsv"))
        .unwrap_or(false);
    if is_tsv {
        b'\t'
    } else {
        b','
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnType {
    Int,
    Float,
    Text,
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a String>) -> ColumnType {
    let mut kind = ColumnType::Int;
    for cell in cells {
        match classify_cell(cell) {
            CellClass::Missing | CellClass::Int(_) => {}
            CellClass::Float(_) => kind = ColumnType::Float,
            CellClass::Text => return ColumnType::Text,
        }
    }
    kind
}

fn convert_cell(field: &str, kind: ColumnType) -> Value {
    match (classify_cell(field), kind) {
        (CellClass::Missing, _) => Value::Missing,
        (_, ColumnType::Text) => Value::Text(field.trim().to_string()),
        (CellClass::Int(i), ColumnType::Int) => Value::Int(i),
        (CellClass::Int(i), ColumnType::Float) => Value::Float(i as f64),
        (CellClass::Float(f), _) => Value::Float(f),
        // A text cell always forces the column to text.
        (CellClass::Text, _) => Value::Text(field.trim().to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn parse(text: &str) -> Table {
        parse_table(text.as_bytes(), b',').unwrap()
    }

    // ── classify_cell ─────────────────────────────────────────────────────────

    #[test]
    fn test_classify_cell_missing_markers() {
        for field in ["", "   ", "NA", "N/A", "NaN", "null", "None", "#N/A"] {
            assert_eq!(classify_cell(field), CellClass::Missing, "field {field:?}");
        }
    }

    #[test]
    fn test_classify_cell_numbers() {
        assert_eq!(classify_cell("2020"), CellClass::Int(2020));
        assert_eq!(classify_cell(" -3 "), CellClass::Int(-3));
        assert_eq!(classify_cell("7.5"), CellClass::Float(7.5));
        assert_eq!(classify_cell("1e3"), CellClass::Float(1000.0));
    }

    #[test]
    fn test_classify_cell_text() {
        assert_eq!(classify_cell("Drama"), CellClass::Text);
        assert_eq!(classify_cell("inf"), CellClass::Text);
        assert_eq!(classify_cell("Infinity"), CellClass::Text);
        assert_eq!(classify_cell("1e999"), CellClass::Text);
        assert_eq!(classify_cell("2001: A Space Odyssey"), CellClass::Text);
    }

    // ── parse_table ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_table_types_columns() {
        let table = parse("year,rating,title\n2020,7.5,Alpha\n2021,8,Beta\n");
        assert_eq!(table.headers(), &["year", "rating", "title"]);
        assert_eq!(table.len(), 2);

        let years: Vec<&Value> = table.column("year").collect();
        assert_eq!(years, vec![&Value::Int(2020), &Value::Int(2021)]);

        let ratings: Vec<&Value> = table.column("rating").collect();
        assert_eq!(ratings, vec![&Value::Float(7.5), &Value::Float(8.0)]);

        let titles: Vec<&Value> = table.column("title").collect();
        assert_eq!(titles[0], &Value::Text("Alpha".to_string()));
    }

    #[test]
    fn test_parse_table_numeric_looking_text_column_stays_text() {
        let table = parse("title\n007\nHeat\n");
        let titles: Vec<&Value> = table.column("title").collect();
        assert_eq!(titles[0], &Value::Text("007".to_string()));
        assert_eq!(titles[1], &Value::Text("Heat".to_string()));
    }

    #[test]
    fn test_parse_table_missing_cells() {
        let table = parse("a,b\n1,\nNA,x\n");
        let a: Vec<&Value> = table.column("a").collect();
        assert_eq!(a, vec![&Value::Int(1), &Value::Missing]);
        let b: Vec<&Value> = table.column("b").collect();
        assert_eq!(b, vec![&Value::Missing, &Value::Text("x".to_string())]);
    }

    #[test]
    fn test_parse_table_quoted_genres_keep_commas() {
        let table = parse("genres,title\n\"Comedy, Drama\",A\n");
        let genres: Vec<&Value> = table.column("genres").collect();
        assert_eq!(genres[0], &Value::Text("Comedy, Drama".to_string()));
    }

    #[test]
    fn test_parse_table_short_and_long_rows() {
        let table = parse("a,b,c\n1\n1,2,3,4,5\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].values.len(), 3);
        assert_eq!(table.rows()[0].values[1], Value::Missing);
        assert_eq!(table.rows()[1].values.len(), 3);
        assert_eq!(table.rows()[1].values[2], Value::Int(3));
    }

    #[test]
    fn test_parse_table_trims_headers_and_bom() {
        let table = parse("\u{feff}releaseYear , title\n2020,A\n");
        assert!(table.has_column("releaseYear"));
        assert!(table.has_column("title"));
    }

    #[test]
    fn test_parse_table_header_only() {
        let table = parse("releaseYear,title\n");
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 2);
    }

    #[test]
    fn test_parse_table_empty_input() {
        let table = parse("");
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
    }

    // ── load_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_table_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "titles.csv", &["title,type", "A,movie", "B,tv"]);
        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_table_tsv_uses_tabs() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "titles.tsv", &["title\tgenres", "A\tComedy, Drama"]);
        let table = load_table(&path).unwrap();
        let genres: Vec<&Value> = table.column("genres").collect();
        assert_eq!(genres[0], &Value::Text("Comedy, Drama".to_string()));
    }

    #[test]
    fn test_load_table_nonexistent_file() {
        let err = load_table(Path::new("/tmp/does-not-exist-flix-report-xyz.csv")).unwrap_err();
        assert_eq!(err.kind(), "file_read");
    }

    #[test]
    fn test_delimiter_for() {
        assert_eq!(delimiter_for(Path::new("a.csv")), b',');
        assert_eq!(delimiter_for(Path::new("a.TSV")), b'\t');
        assert_eq!(delimiter_for(Path::new("noext")), b',');
    }
}
