//! Two-dimensional, indexed, lazily evaluated tables.

use crate::error::{DataForgeError, DataForgeResult};
use crate::index::Index;
use crate::lazy::{LazySeq, SeqIter};
use crate::series::Series;
use crate::types::{Record, Row, Value};

/// An ordered set of named columns sharing one [`Index`].
///
/// Rows are stored as tuples aligned with the column order. Column names, index and rows are all
/// [`LazySeq`]s: building or transforming a frame does no work until a terminal call such as
/// [`DataFrame::to_rows`] or [`DataFrame::to_pairs`] is made, and every terminal call recomputes
/// from the sources unless the frame has been [baked](DataFrame::bake).
///
/// Column names are unique for frames built by the constructors in this module. Merging on the
/// index may produce repeated names; name lookups then resolve to the first occurrence.
#[derive(Debug, Clone)]
pub struct DataFrame {
    columns: LazySeq<String>,
    index: Index,
    rows: LazySeq<Row>,
}

impl DataFrame {
    /// Frame over eager rows with an implicit `0..n` index.
    ///
    /// Rows shorter than the column list are padded with [`Value::Null`]; longer rows are cut.
    pub fn new<I, S>(columns: I, rows: Vec<Row>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let width = columns.len();
        let rows: Vec<Row> = rows.into_iter().map(|row| fit_row(row, width)).collect();
        let rows = LazySeq::from_vec(rows);
        Self {
            columns: LazySeq::from_vec(columns),
            index: Index::positional_for(&rows),
            rows,
        }
    }

    /// Frame whose column names and rows come from factories. The index is implicit.
    pub fn from_lazy<C, CI, R, RI>(columns: C, rows: R) -> Self
    where
        C: Fn() -> CI + Send + Sync + 'static,
        CI: Iterator<Item = String> + Send + 'static,
        R: Fn() -> RI + Send + Sync + 'static,
        RI: Iterator<Item = Row> + Send + 'static,
    {
        let rows = LazySeq::from_fn(rows);
        Self {
            columns: LazySeq::from_fn(columns),
            index: Index::positional_for(&rows),
            rows,
        }
    }

    /// Assemble a frame from prepared parts.
    pub fn from_parts(columns: LazySeq<String>, index: Index, rows: LazySeq<Row>) -> Self {
        Self {
            columns,
            index,
            rows,
        }
    }

    /// Frame from name/value records.
    ///
    /// The column set is the keys of the *first* record, in its order. Later records contribute
    /// values for those columns only; missing keys become [`Value::Null`] and extra keys are
    /// ignored.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns: Vec<String> = records
            .first()
            .map(|r| r.names().map(str::to_owned).collect())
            .unwrap_or_default();
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|name| record.get(name).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self::new(columns, rows)
    }

    /// Frame from a row matrix whose first row holds the column names.
    pub fn from_header_rows(mut matrix: Vec<Row>) -> Self {
        if matrix.is_empty() {
            return Self::new(Vec::<String>::new(), Vec::new());
        }
        let header = matrix.remove(0);
        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(pos, value)| header_name(pos, value))
            .collect();
        Self::new(columns, matrix)
    }

    /// Replace the index.
    pub fn with_index(mut self, index: Index) -> Self {
        self.index = index;
        self
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.to_vec()
    }

    /// Alias of [`DataFrame::column_names`].
    pub fn columns(&self) -> Vec<String> {
        self.column_names()
    }

    /// The lazy column name sequence.
    pub fn lazy_columns(&self) -> &LazySeq<String> {
        &self.columns
    }

    /// Position of the first column called `name`.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some()
    }

    /// The shared index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Alias of [`DataFrame::index`].
    pub fn get_index(&self) -> &Index {
        &self.index
    }

    /// Materialize all rows.
    pub fn to_rows(&self) -> Vec<Row> {
        self.rows.to_vec()
    }

    /// Alias of [`DataFrame::to_rows`].
    pub fn values(&self) -> Vec<Row> {
        self.to_rows()
    }

    pub fn iter_rows(&self) -> SeqIter<Row> {
        self.rows.iter()
    }

    /// The lazy row sequence.
    pub fn lazy_rows(&self) -> &LazySeq<Row> {
        &self.rows
    }

    /// Rows as records, lazily.
    pub fn records(&self) -> LazySeq<Record> {
        let columns = self.columns.clone();
        let rows = self.rows.clone();
        LazySeq::from_fn(move || {
            let names = columns.to_vec();
            rows.iter().map(move |row| to_record(&names, row))
        })
    }

    /// `(index value, record)` pairs in order.
    pub fn to_pairs(&self) -> Vec<(Value, Record)> {
        self.index.iter().zip(self.records().iter()).collect()
    }

    /// Number of rows. Forces evaluation of the rows unless baked.
    pub fn row_count(&self) -> usize {
        self.rows.count()
    }

    /// Project one column as a [`Series`] sharing this frame's index.
    pub fn get_series(&self, name: &str) -> DataForgeResult<Series> {
        let pos = self
            .column_position(name)
            .ok_or_else(|| DataForgeError::column_not_found(name))?;
        let values = self.rows.map(move |row| cell(&row, pos));
        Ok(Series::from_lazy(self.index.clone(), values).named(name))
    }

    /// New frame indexed by the values of column `name`.
    ///
    /// The column stays in the frame. The index variant follows the column's value type.
    pub fn set_index(&self, name: &str) -> DataForgeResult<DataFrame> {
        let pos = self
            .column_position(name)
            .ok_or_else(|| DataForgeError::column_not_found(name))?;
        let index = Index::from_lazy(self.rows.map(move |row| cell(&row, pos)));
        Ok(self.clone().with_index(index))
    }

    /// New frame without column `name`. Unknown names leave the frame unchanged.
    pub fn drop_series(&self, name: &str) -> DataFrame {
        let columns = self.column_names();
        let keep: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_str() != name)
            .map(|(i, _)| i)
            .collect();
        if keep.len() == columns.len() {
            return self.clone();
        }

        let kept_names = keep.iter().map(|&i| columns[i].clone()).collect();
        let rows = self
            .rows
            .map(move |row| keep.iter().map(|&i| cell(&row, i)).collect::<Row>());
        Self::from_parts(LazySeq::from_vec(kept_names), self.index.clone(), rows)
    }

    /// Force columns, index and rows into memory. A baked frame is returned as-is.
    pub fn bake(&self) -> Self {
        if self.is_baked() {
            return self.clone();
        }
        Self {
            columns: self.columns.bake(),
            index: self.index.bake(),
            rows: self.rows.bake(),
        }
    }

    pub fn is_baked(&self) -> bool {
        self.columns.is_baked() && self.index.is_baked() && self.rows.is_baked()
    }

    /// `true` when both frames share column, index and row storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.columns.ptr_eq(&other.columns)
            && self.index.ptr_eq(&other.index)
            && self.rows.ptr_eq(&other.rows)
    }
}

/// Generated frame with columns named `"1"..=num_columns`.
///
/// Cells count up row-major from `start` in steps of `increment`, so
/// `cell(r, c) = start + (r * num_columns + c) * increment`.
pub fn matrix(num_columns: usize, num_rows: usize, start: i64, increment: i64) -> DataFrame {
    let columns = (1..=num_columns).map(|c| c.to_string()).collect::<Vec<_>>();
    let rows = LazySeq::from_fn(move || {
        (0..num_rows).map(move |r| {
            (0..num_columns)
                .map(|c| Value::Int64(start + ((r * num_columns + c) as i64) * increment))
                .collect::<Row>()
        })
    });
    DataFrame::from_parts(LazySeq::from_vec(columns), Index::implicit(num_rows), rows)
}

pub(crate) fn cell(row: &[Value], pos: usize) -> Value {
    row.get(pos).cloned().unwrap_or_default()
}

pub(crate) fn to_record(names: &[String], row: Row) -> Record {
    let mut record = Record::new();
    for (pos, name) in names.iter().enumerate() {
        record.push(name.clone(), cell(&row, pos));
    }
    record
}

/// Column name for header cell `pos`. Empty header cells are named by their 1-based position.
pub(crate) fn header_name(pos: usize, value: &Value) -> String {
    match value {
        Value::Null => (pos + 1).to_string(),
        other => other.to_string(),
    }
}

fn fit_row(mut row: Row, width: usize) -> Row {
    row.resize(width, Value::Null);
    row
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{matrix, DataFrame};
    use crate::error::ErrorKind;
    use crate::index::IndexKind;
    use crate::types::{Record, Value};

    fn sample() -> DataFrame {
        DataFrame::new(
            ["key", "val"],
            vec![
                vec![Value::from("foo"), Value::Int64(1)],
                vec![Value::from("bar"), Value::Int64(2)],
            ],
        )
    }

    #[test]
    fn rows_and_index_have_matching_length() {
        let df = sample();
        assert_eq!(df.column_names(), vec!["key", "val"]);
        assert_eq!(df.values().len(), df.get_index().to_values().len());
        assert_eq!(df.index().values(), vec![Value::Int64(0), Value::Int64(1)]);
    }

    #[test]
    fn short_rows_are_padded_with_null() {
        let df = DataFrame::new(["a", "b"], vec![vec![Value::Int64(1)]]);
        assert_eq!(df.to_rows(), vec![vec![Value::Int64(1), Value::Null]]);
    }

    #[test]
    fn lazy_frame_is_not_evaluated_until_pulled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls2 = Arc::clone(&calls);
        let df = DataFrame::from_lazy(
            || vec!["a".to_string()].into_iter(),
            move || {
                calls2.fetch_add(1, Ordering::SeqCst);
                vec![vec![Value::Int64(1)], vec![Value::Int64(2)]].into_iter()
            },
        );
        let indexed = df.set_index("a").unwrap();
        let projected = indexed.get_series("a").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(projected.values(), vec![Value::Int64(1), Value::Int64(2)]);
        assert_eq!(df.row_count(), 2);
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn set_index_keeps_the_column_and_picks_index_kind() {
        let df = DataFrame::new(
            ["id", "name"],
            vec![
                vec![Value::Int64(100), Value::from("hello")],
                vec![Value::Int64(200), Value::from("computer")],
            ],
        );
        let indexed = df.set_index("id").unwrap();
        assert_eq!(indexed.index().kind(), IndexKind::Number);
        assert_eq!(indexed.index().values(), vec![Value::Int64(100), Value::Int64(200)]);
        assert_eq!(indexed.column_names(), vec!["id", "name"]);

        let by_name = df.set_index("name").unwrap();
        assert_eq!(by_name.index().kind(), IndexKind::Generic);
    }

    #[test]
    fn set_index_on_missing_column_fails() {
        let err = sample().set_index("missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert!(err.to_string().contains("'missing'"));
    }

    #[test]
    fn drop_series_removes_only_that_column() {
        let df = sample().set_index("key").unwrap();
        let dropped = df.drop_series("key");
        assert_eq!(dropped.column_names(), vec!["val"]);
        assert_eq!(dropped.to_rows(), vec![vec![Value::Int64(1)], vec![Value::Int64(2)]]);
        assert_eq!(dropped.index().values(), vec![Value::from("foo"), Value::from("bar")]);

        let unchanged = sample().drop_series("nope");
        assert_eq!(unchanged.column_names(), vec!["key", "val"]);
    }

    #[test]
    fn projected_series_shares_the_frame_index() {
        let df = sample().set_index("key").unwrap();
        let series = df.get_series("val").unwrap();
        assert!(series.index().ptr_eq(df.index()));
        assert_eq!(series.name(), Some("val"));
        assert_eq!(
            series.to_pairs(),
            vec![
                (Value::from("foo"), Value::Int64(1)),
                (Value::from("bar"), Value::Int64(2)),
            ]
        );
        assert!(df.get_series("missing").is_err());
    }

    #[test]
    fn from_records_uses_first_record_keys() {
        let df = DataFrame::from_records(vec![
            Record::from_pairs([("Column1", "A")]),
            Record::from_pairs([("Column2", 2)]),
        ]);
        assert_eq!(df.column_names(), vec!["Column1"]);
        assert_eq!(df.to_rows(), vec![vec![Value::from("A")], vec![Value::Null]]);
    }

    #[test]
    fn from_header_rows_splits_names_from_values() {
        let df = DataFrame::from_header_rows(vec![
            vec![Value::from("Col1"), Value::from("Col2")],
            vec![Value::from("foo"), Value::from("bar")],
            vec![Value::from("hello"), Value::from("computer")],
        ]);
        assert_eq!(df.column_names(), vec!["Col1", "Col2"]);
        assert_eq!(df.index().values(), vec![Value::Int64(0), Value::Int64(1)]);
        assert_eq!(df.row_count(), 2);
    }

    #[test]
    fn empty_header_cells_are_named_by_position() {
        let df = DataFrame::from_header_rows(vec![
            vec![Value::from("id"), Value::Null, Value::from("name")],
            vec![Value::Int64(1), Value::Int64(2), Value::from("Ada")],
        ]);
        assert_eq!(df.column_names(), vec!["id", "2", "name"]);
    }

    #[test]
    fn matrix_counts_up_row_major() {
        let df = matrix(3, 4, 2, 3);
        assert_eq!(df.column_names(), vec!["1", "2", "3"]);
        let pairs = df.to_pairs();
        assert_eq!(pairs.len(), 4);
        assert_eq!(
            pairs[0],
            (Value::Int64(0), Record::from_pairs([("1", 2), ("2", 5), ("3", 8)]))
        );
        assert_eq!(
            pairs[3],
            (Value::Int64(3), Record::from_pairs([("1", 29), ("2", 32), ("3", 35)]))
        );
    }

    #[test]
    fn bake_is_idempotent() {
        let lazy = matrix(2, 2, 0, 1);
        let baked = lazy.bake();
        assert!(baked.is_baked());
        assert!(baked.bake().ptr_eq(&baked));
        assert_eq!(baked.to_rows(), lazy.to_rows());
    }
}
