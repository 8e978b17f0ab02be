//! CSV ingestion.

use std::path::Path;

use crate::dataframe::DataFrame;
use crate::error::DataForgeResult;
use crate::types::{Row, Value};

use super::builder::{build, BuildOptions};

/// Read a CSV file into a [`DataFrame`].
///
/// Rules:
///
/// - The CSV must have a header row; it supplies the column names. An empty header cell names its
///   column by 1-based position.
/// - Cells are read as strings; empty cells become [`Value::Null`].
/// - `options` controls integer parsing and index extraction (see [`BuildOptions`]).
pub fn from_csv_path(path: impl AsRef<Path>, options: &BuildOptions) -> DataForgeResult<DataFrame> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    from_csv_reader(&mut rdr, options)
}

/// Read CSV text into a [`DataFrame`].
pub fn from_csv_str(input: &str, options: &BuildOptions) -> DataForgeResult<DataFrame> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());
    from_csv_reader(&mut rdr, options)
}

/// Read CSV data from an existing CSV reader.
pub fn from_csv_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &BuildOptions,
) -> DataForgeResult<DataFrame> {
    let headers = rdr.headers()?.clone();

    let mut matrix: Vec<Row> = vec![headers.iter().map(raw_cell).collect()];
    for result in rdr.records() {
        let record = result?;
        matrix.push(record.iter().map(raw_cell).collect());
    }

    build(matrix, options)
}

fn raw_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::Utf8(trimmed.to_owned())
    }
}
