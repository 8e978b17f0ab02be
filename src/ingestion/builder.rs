//! Data frame construction from a raw row matrix.

use chrono::{NaiveDate, NaiveDateTime};

use crate::dataframe::{header_name, DataFrame};
use crate::error::{DataForgeError, DataForgeResult};
use crate::types::{Row, Value};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Options applied when turning raw rows into a [`DataFrame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Column to move into the index. The column is removed from the frame.
    pub index_col: Option<String>,
    /// Convert string columns whose every non-empty cell is an integer into [`Value::Int64`].
    pub parse_integers: bool,
    /// Columns whose string cells are parsed into [`Value::Date`].
    ///
    /// Accepts `YYYY-MM-DD` (month and day may be unpadded), `YYYY/MM/DD`, and date-times with a
    /// `T` or space separator. Dates without a time are placed at midnight.
    pub parse_dates: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            index_col: None,
            parse_integers: true,
            parse_dates: Vec::new(),
        }
    }
}

/// Build a frame from `matrix`, whose first row holds the column names.
///
/// Remaining rows are aligned to the names by position. Values that are already typed pass
/// through unchanged.
///
/// # Errors
///
/// - [`DataForgeError::ColumnNotFound`] if `options.index_col` or an entry of
///   `options.parse_dates` names a column that is not in the header.
/// - [`DataForgeError::Validation`] if a cell of a `parse_dates` column is not a date.
pub fn build(mut matrix: Vec<Row>, options: &BuildOptions) -> DataForgeResult<DataFrame> {
    match matrix.split_first_mut() {
        Some((header, rows)) => {
            let width = header.len();
            for row in rows.iter_mut() {
                row.resize(width, Value::Null);
            }
            for name in &options.parse_dates {
                let col = header
                    .iter()
                    .enumerate()
                    .position(|(pos, value)| header_name(pos, value) == *name)
                    .ok_or_else(|| DataForgeError::column_not_found(name.as_str()))?;
                parse_date_column(rows, col, name)?;
            }
            if options.parse_integers {
                for col in 0..width {
                    parse_integer_column(rows, col);
                }
            }
        }
        None => {
            if let Some(name) = options.parse_dates.first() {
                return Err(DataForgeError::column_not_found(name.as_str()));
            }
        }
    }

    apply_index_col(DataFrame::from_header_rows(matrix), options)
}

/// Move `options.index_col` (if any) from the columns into the index.
pub fn apply_index_col(frame: DataFrame, options: &BuildOptions) -> DataForgeResult<DataFrame> {
    match options.index_col.as_deref() {
        Some(name) => Ok(frame.set_index(name)?.drop_series(name)),
        None => Ok(frame),
    }
}

fn parse_date_column(rows: &mut [Row], col: usize, name: &str) -> DataForgeResult<()> {
    for (idx0, row) in rows.iter_mut().enumerate() {
        if let Value::Utf8(raw) = &row[col] {
            let parsed = parse_date(raw.trim()).ok_or_else(|| {
                DataForgeError::validation(format!(
                    "row {} column '{name}': cannot parse '{raw}' as a date",
                    idx0 + 1
                ))
            })?;
            row[col] = Value::Date(parsed);
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
}

fn parse_integer_column(rows: &mut [Row], col: usize) {
    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows.iter() {
        match &row[col] {
            Value::Null => parsed.push(Value::Null),
            Value::Utf8(raw) => match raw.trim().parse::<i64>() {
                Ok(v) => parsed.push(Value::Int64(v)),
                Err(_) => return,
            },
            _ => return,
        }
    }
    if parsed.iter().all(Value::is_null) {
        return;
    }
    for (row, value) in rows.iter_mut().zip(parsed) {
        row[col] = value;
    }
}
