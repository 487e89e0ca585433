//! CSV ingest.
//!
//! This module turns a measurement sheet exported as CSV into two parallel columns
//! of optional values, ready for `ObservationSet::build`.
//!
//! - **Strict schema** for the two requested columns (clear errors + exit code 2)
//! - **Empty cells** become absent values (the observation set drops those pairs)
//! - **Row-level validation**: unparseable rows are skipped, reported and logged
//! - **No fitting logic here**

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the two columns (aligned by row) plus row errors.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedColumns {
    pub xs: Vec<Option<f64>>,
    pub ys: Vec<Option<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load the `x_col` and `y_col` columns of a CSV file.
pub fn load_columns(path: &Path, x_col: &str, y_col: &str) -> Result<IngestedColumns, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), x_col, y_col, "reading CSV columns");
    read_columns(file, x_col, y_col)
}

/// Same as `load_columns`, from any reader.
pub fn read_columns<R: Read>(input: R, x_col: &str, y_col: &str) -> Result<IngestedColumns, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let missing: Vec<&str> = [x_col, y_col]
        .into_iter()
        .filter(|c| !header_map.contains_key(&normalize_header(c)))
        .collect();
    if !missing.is_empty() {
        let mut available: Vec<&str> = headers.iter().collect();
        available.sort_unstable();
        return Err(AppError::new(
            2,
            format!(
                "CSV is missing column(s): {}. Available: {}",
                missing.join(", "),
                available.join(", ")
            ),
        ));
    }
    let xi = header_map[&normalize_header(x_col)];
    let yi = header_map[&normalize_header(y_col)];

    let mut out = IngestedColumns {
        xs: Vec::new(),
        ys: Vec::new(),
        row_errors: Vec::new(),
        rows_read: 0,
    };

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, and lines are 1-based.
        let line = idx + 2;
        out.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                push_row_error(&mut out.row_errors, line, format!("CSV parse error: {e}"));
                continue;
            }
        };

        let x = parse_cell(&record, xi);
        let y = parse_cell(&record, yi);
        match (x, y) {
            (Ok(x), Ok(y)) => {
                out.xs.push(x);
                out.ys.push(y);
            }
            (Err(e), _) => push_row_error(&mut out.row_errors, line, format!("column '{x_col}': {e}")),
            (_, Err(e)) => push_row_error(&mut out.row_errors, line, format!("column '{y_col}': {e}")),
        }
    }

    Ok(out)
}

fn push_row_error(errors: &mut Vec<RowError>, line: usize, message: String) {
    tracing::warn!(line, %message, "skipping CSV row");
    errors.push(RowError { line, message });
}

fn parse_cell(record: &StringRecord, idx: usize) -> Result<Option<f64>, String> {
    let raw = record.get(idx).unwrap_or("");
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("'{raw}' is not a number"))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (i, h) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers.
        map.entry(normalize_header(h)).or_insert(i);
    }
    map
}

fn normalize_header(h: &str) -> String {
    h.trim().trim_start_matches('\u{feff}').to_lowercase()
}
