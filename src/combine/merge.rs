//! Two-frame join on a key column or on the index.

use std::collections::HashMap;

use tracing::debug;

use crate::dataframe::{cell, DataFrame};
use crate::error::{DataForgeError, DataForgeResult, JoinSide};
use crate::lazy::LazySeq;
use crate::types::{Row, Value, ValueKey};

use super::frame_from_pairs;

/// Join `left` and `right`.
///
/// With `on = Some(column)`, rows are matched on the value of `column`, which must exist in both
/// frames. The key column appears once, first, followed by the remaining left columns and then the
/// remaining right columns.
///
/// With `on = None`, rows are matched on their index labels and all left columns are followed by
/// all right columns. Names present on both sides are kept twice.
///
/// For every distinct key (left keys in first-appearance order, then right-only keys in their
/// first-appearance order) the output holds the cross product of the left and right rows with
/// that key, left-major. Keys found on one side only produce one row per source row, with
/// [`Value::Null`] in the other side's columns. Each output row keeps the index label of its left
/// source row, or of its right source row when there is no left row.
pub fn merge(left: &DataFrame, right: &DataFrame, on: Option<&str>) -> DataForgeResult<DataFrame> {
    let left_columns = left.column_names();
    let right_columns = right.column_names();

    let key = match on {
        Some(name) => {
            let left_pos = left_columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DataForgeError::join_column_not_found(name, JoinSide::Left))?;
            let right_pos = right_columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DataForgeError::join_column_not_found(name, JoinSide::Right))?;
            Some((left_pos, right_pos))
        }
        None => None,
    };

    let columns = match (on, key) {
        (Some(name), Some((left_pos, right_pos))) => std::iter::once(name.to_string())
            .chain(without(&left_columns, left_pos))
            .chain(without(&right_columns, right_pos))
            .collect(),
        _ => left_columns.iter().chain(right_columns.iter()).cloned().collect(),
    };

    let left_width = left_columns.len();
    let right_width = right_columns.len();
    let left = left.clone();
    let right = right.clone();
    let pairs = LazySeq::from_fn(move || {
        let (l, r) = match key {
            Some((left_pos, right_pos)) => (
                JoinInput::on_column(&left, left_width, left_pos),
                JoinInput::on_column(&right, right_width, right_pos),
            ),
            None => (
                JoinInput::on_index(&left, left_width),
                JoinInput::on_index(&right, right_width),
            ),
        };
        join(&l, &r, key.is_some()).into_iter()
    });

    Ok(frame_from_pairs(columns, pairs))
}

fn without(columns: &[String], pos: usize) -> impl Iterator<Item = String> + '_ {
    columns
        .iter()
        .enumerate()
        .filter(move |(i, _)| *i != pos)
        .map(|(_, c)| c.clone())
}

/// One side of a join, materialized.
struct JoinInput {
    labels: Vec<Value>,
    keys: Vec<Value>,
    payload: Vec<Row>,
    width: usize,
}

impl JoinInput {
    /// Key taken from column `pos`; the payload is the row without it.
    fn on_column(frame: &DataFrame, width: usize, pos: usize) -> Self {
        let mut keys = Vec::new();
        let mut payload = Vec::new();
        for row in frame.iter_rows() {
            keys.push(cell(&row, pos));
            payload.push(
                (0..width)
                    .filter(|&i| i != pos)
                    .map(|i| cell(&row, i))
                    .collect(),
            );
        }
        Self {
            labels: frame.index().values(),
            keys,
            payload,
            width: width - 1,
        }
    }

    /// Key taken from the index label; the payload is the full row.
    fn on_index(frame: &DataFrame, width: usize) -> Self {
        let labels = frame.index().values();
        let payload = frame
            .iter_rows()
            .map(|row| (0..width).map(|i| cell(&row, i)).collect())
            .collect();
        Self {
            keys: labels.clone(),
            labels,
            payload,
            width,
        }
    }

    fn label(&self, row: usize) -> Value {
        self.labels.get(row).cloned().unwrap_or_default()
    }

    /// Distinct keys in first-appearance order, with the row positions holding each key.
    fn groups(&self) -> (Vec<ValueKey>, HashMap<ValueKey, Vec<usize>>) {
        let mut order = Vec::new();
        let mut groups: HashMap<ValueKey, Vec<usize>> = HashMap::new();
        // Rows past the shorter of keys/payload have no data to join.
        for (pos, key) in self.keys.iter().take(self.payload.len()).enumerate() {
            let key = key.key();
            groups
                .entry(key.clone())
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(pos);
        }
        (order, groups)
    }
}

fn join(left: &JoinInput, right: &JoinInput, emit_key: bool) -> Vec<(Value, Row)> {
    let (left_order, left_groups) = left.groups();
    let (right_order, right_groups) = right.groups();

    let build = |key: &ValueKey, l: Option<usize>, r: Option<usize>| -> Row {
        let mut row = Vec::with_capacity(usize::from(emit_key) + left.width + right.width);
        if emit_key {
            row.push(key.clone().into_value());
        }
        match l {
            Some(l) => row.extend(left.payload[l].iter().cloned()),
            None => row.extend(std::iter::repeat_n(Value::Null, left.width)),
        }
        match r {
            Some(r) => row.extend(right.payload[r].iter().cloned()),
            None => row.extend(std::iter::repeat_n(Value::Null, right.width)),
        }
        row
    };

    let mut out = Vec::new();
    for key in &left_order {
        let left_rows = &left_groups[key];
        match right_groups.get(key) {
            Some(right_rows) => {
                for &l in left_rows {
                    for &r in right_rows {
                        out.push((left.label(l), build(key, Some(l), Some(r))));
                    }
                }
            }
            None => {
                for &l in left_rows {
                    out.push((left.label(l), build(key, Some(l), None)));
                }
            }
        }
    }
    for key in right_order.iter().filter(|k| !left_groups.contains_key(*k)) {
        for &r in &right_groups[key] {
            out.push((right.label(r), build(key, None, Some(r))));
        }
    }

    debug!(
        left_rows = left.payload.len(),
        right_rows = right.payload.len(),
        output_rows = out.len(),
        on_column = emit_key,
        "merge materialized"
    );
    out
}
