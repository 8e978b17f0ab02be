//! Operations that combine several series or data frames into one.
//!
//! - [`merge()`]: join two frames on a key column or on their indices
//! - [`concat()`]: stack frames, reconciling columns by union
//! - [`zip()`] / [`zip_series()`]: position-wise combination, truncated to the shortest input
//! - [`merge_series()`]: build a frame from series aligned on their index labels
//!
//! Argument checks (missing key columns, name/series count mismatches) happen when the operation
//! is called. The aligned output itself is lazy: it is recomputed from the inputs whenever the
//! result is read, until the result is baked.
//!
//! ## Example: merge on a key column
//!
//! ```rust
//! use rust_data_forge::combine::merge;
//! use rust_data_forge::{DataFrame, Value};
//!
//! let left = DataFrame::new(
//!     ["key", "lval"],
//!     vec![vec!["foo".into(), 1.into()], vec!["foo".into(), 2.into()]],
//! );
//! let right = DataFrame::new(
//!     ["key", "rval"],
//!     vec![vec!["foo".into(), 4.into()], vec!["foo".into(), 5.into()]],
//! );
//!
//! let merged = merge(&left, &right, Some("key")).unwrap();
//! assert_eq!(merged.column_names(), vec!["key", "lval", "rval"]);
//! assert_eq!(merged.row_count(), 4);
//! assert_eq!(merged.to_rows()[1], vec![Value::from("foo"), 1.into(), 5.into()]);
//! ```

pub mod concat;
pub mod merge;
pub mod merge_series;
pub mod zip;

pub use concat::concat;
pub use merge::merge;
pub use merge_series::merge_series;
pub use zip::{zip, zip_series};

use crate::dataframe::DataFrame;
use crate::index::Index;
use crate::lazy::LazySeq;
use crate::types::{Row, Value};

/// Split a lazy `(label, row)` sequence into a frame whose index and rows both derive from it.
fn frame_from_pairs(columns: Vec<String>, pairs: LazySeq<(Value, Row)>) -> DataFrame {
    let index = Index::from_lazy(pairs.map(|(label, _)| label));
    let rows = pairs.map(|(_, row)| row);
    DataFrame::from_parts(LazySeq::from_vec(columns), index, rows)
}
