//! Row-wise concatenation of data frames.

use std::sync::Arc;

use tracing::debug;

use crate::dataframe::{cell, DataFrame};
use crate::index::Index;
use crate::lazy::LazySeq;
use crate::types::{Row, Value};

/// Stack `frames` top to bottom.
///
/// The output columns are the union of the input columns in first-seen order. Each input row is
/// re-laid out to that column order, with [`Value::Null`] for columns its frame does not have.
/// The output index is the concatenation of the input indices, so labels may repeat.
pub fn concat(frames: &[DataFrame]) -> DataFrame {
    let frames: Arc<[DataFrame]> = Arc::from(frames.to_vec());

    let columns = {
        let frames = Arc::clone(&frames);
        LazySeq::from_fn(move || union_columns(&frames).into_iter())
    };

    let rows = {
        let frames = Arc::clone(&frames);
        LazySeq::from_fn(move || {
            let union = union_columns(&frames);
            debug!(
                frames = frames.len(),
                columns = union.len(),
                "concat materialized"
            );
            let frames = Arc::clone(&frames);
            (0..frames.len()).flat_map(move |i| {
                let names = frames[i].column_names();
                let layout: Vec<Option<usize>> = union
                    .iter()
                    .map(|c| names.iter().position(|n| n == c))
                    .collect();
                frames[i].iter_rows().map(move |row| {
                    layout
                        .iter()
                        .map(|pos| pos.map_or(Value::Null, |p| cell(&row, p)))
                        .collect::<Row>()
                })
            })
        })
    };

    let index = {
        let frames = Arc::clone(&frames);
        Index::from_lazy(LazySeq::from_fn(move || {
            let frames = Arc::clone(&frames);
            (0..frames.len()).flat_map(move |i| frames[i].index().iter())
        }))
    };

    DataFrame::from_parts(columns, index, rows)
}

fn union_columns(frames: &[DataFrame]) -> Vec<String> {
    let mut union: Vec<String> = Vec::new();
    for frame in frames {
        for name in frame.lazy_columns().iter() {
            if !union.contains(&name) {
                union.push(name);
            }
        }
    }
    union
}

#[cfg(test)]
mod tests {
    use super::concat;
    use crate::dataframe::DataFrame;
    use crate::types::Value;

    fn i(v: i64) -> Value {
        Value::Int64(v)
    }

    fn frame(columns: [&str; 2], rows: [[i64; 2]; 2]) -> DataFrame {
        DataFrame::new(
            columns,
            rows.iter()
                .map(|r| r.iter().map(|v| Value::Int64(*v)).collect())
                .collect(),
        )
    }

    #[test]
    fn reorders_columns_to_first_seen_order() {
        let df1 = frame(["1", "2"], [[1, 2], [3, 4]]);
        let df2 = frame(["2", "1"], [[6, 5], [8, 7]]);
        let result = concat(&[df1, df2]);

        assert_eq!(result.column_names(), vec!["1", "2"]);
        assert_eq!(
            result.index().to_values(),
            vec![i(0), i(1), i(0), i(1)]
        );
        assert_eq!(
            result.to_rows(),
            vec![
                vec![i(1), i(2)],
                vec![i(3), i(4)],
                vec![i(5), i(6)],
                vec![i(7), i(8)],
            ]
        );
    }

    #[test]
    fn fills_missing_columns_with_null() {
        let df1 = frame(["1", "2"], [[1, 2], [3, 4]]);
        let df2 = frame(["2", "3"], [[6, 5], [8, 7]]);
        let result = concat(&[df1, df2]);

        assert_eq!(result.column_names(), vec!["1", "2", "3"]);
        assert_eq!(
            result.to_rows(),
            vec![
                vec![i(1), i(2), Value::Null],
                vec![i(3), i(4), Value::Null],
                vec![Value::Null, i(6), i(5)],
                vec![Value::Null, i(8), i(7)],
            ]
        );
    }

    #[test]
    fn concat_of_nothing_is_empty() {
        let result = concat(&[]);
        assert!(result.column_names().is_empty());
        assert_eq!(result.row_count(), 0);
        assert!(result.index().is_empty());
    }
}
