//! Building a data frame from index-aligned series.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::dataframe::DataFrame;
use crate::error::{DataForgeError, DataForgeResult};
use crate::lazy::LazySeq;
use crate::series::Series;
use crate::types::{Row, Value, ValueKey};

use super::frame_from_pairs;

/// Build a frame with one column per series, aligned on index labels.
///
/// `column_names` and `series` must have the same length and the names must be distinct.
///
/// The output index is the union of the input labels in first-appearance order, scanning the
/// series left to right. A column holds its series' value for each label, or [`Value::Null`] when
/// the series has no such label. If a series repeats a label, its first value is used.
pub fn merge_series<S: AsRef<str>>(
    column_names: &[S],
    series: &[Series],
) -> DataForgeResult<DataFrame> {
    if column_names.len() > series.len() {
        return Err(DataForgeError::validation(format!(
            "more column names ({}) than series ({})",
            column_names.len(),
            series.len()
        )));
    }
    if column_names.len() < series.len() {
        return Err(DataForgeError::validation(format!(
            "more series ({}) than column names ({})",
            series.len(),
            column_names.len()
        )));
    }

    let mut seen = HashSet::new();
    for name in column_names {
        if !seen.insert(name.as_ref()) {
            return Err(DataForgeError::validation(format!(
                "duplicate column name '{}'",
                name.as_ref()
            )));
        }
    }

    let columns = column_names.iter().map(|n| n.as_ref().to_owned()).collect();
    let series: Arc<[Series]> = Arc::from(series.to_vec());
    let pairs = LazySeq::from_fn(move || align(&series).into_iter());
    Ok(frame_from_pairs(columns, pairs))
}

fn align(series: &[Series]) -> Vec<(Value, Row)> {
    let width = series.len();
    let mut labels: Vec<Value> = Vec::new();
    let mut cells: Vec<Vec<Option<Value>>> = Vec::new();
    let mut positions: HashMap<ValueKey, usize> = HashMap::new();

    for (col, s) in series.iter().enumerate() {
        for (label, value) in s.index().iter().zip(s.iter()) {
            let pos = *positions.entry(label.key()).or_insert_with(|| {
                labels.push(label.clone());
                cells.push(vec![None; width]);
                labels.len() - 1
            });
            let slot = &mut cells[pos][col];
            if slot.is_none() {
                *slot = Some(value);
            }
        }
    }

    debug!(series = width, labels = labels.len(), "series merge materialized");
    labels
        .into_iter()
        .zip(cells)
        .map(|(label, row)| (label, row.into_iter().map(Option::unwrap_or_default).collect()))
        .collect()
}
