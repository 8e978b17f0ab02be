//! `rust-data-forge` is a small library of lazily evaluated, immutable [`Series`] and
//! [`DataFrame`] values, with operations that combine several of them into one.
//!
//! Every value is immutable: operations return new series or frames and never touch their
//! inputs. Most outputs are lazy. Their rows are computed when read, and recomputed on every read,
//! until [`DataFrame::bake`] (or [`Series::bake`]) materializes them once.
//!
//! ## What you can build
//!
//! - A [`Series`]: a single sequence of [`Value`]s with an [`Index`]
//! - A [`DataFrame`]: named columns over a sequence of rows, with an [`Index`]
//! - [`range`] and [`matrix`]: lazily generated test data
//!
//! Cells are dynamically typed [`Value`]s. A missing cell is [`Value::Null`].
//!
//! ## What you can do with them
//!
//! - [`merge()`]: join two frames on a column or on their indices
//! - [`concat()`]: stack frames, filling columns a frame lacks with [`Value::Null`]
//! - [`zip()`] / [`zip_series()`]: combine inputs position by position
//! - [`merge_series()`]: build a frame from named series aligned on their index
//!
//! ## Quick example: concatenate frames
//!
//! ```rust
//! use rust_data_forge::{concat, DataFrame, Value};
//!
//! let a = DataFrame::new(["A", "B"], vec![vec![1.into(), 2.into()]]);
//! let b = DataFrame::new(["B", "C"], vec![vec![3.into(), 4.into()]]);
//!
//! let stacked = concat(&[a, b]);
//! assert_eq!(stacked.column_names(), vec!["A", "B", "C"]);
//! assert_eq!(
//!     stacked.to_rows(),
//!     vec![
//!         vec![Value::Int64(1), Value::Int64(2), Value::Null],
//!         vec![Value::Null, Value::Int64(3), Value::Int64(4)],
//!     ]
//! );
//! ```
//!
//! ## Reading files
//!
//! ```no_run
//! use rust_data_forge::ingestion::{ingest_from_path, IngestionOptions};
//!
//! # fn main() -> Result<(), rust_data_forge::DataForgeError> {
//! // Auto-detects by extension (.csv/.json).
//! let df = ingest_from_path("people.csv", &IngestionOptions::default())?;
//! println!("rows={}", df.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`combine`]: merge/concat/zip/merge_series
//! - [`dataframe`], [`series`], [`index`]: the core value types
//! - [`lazy`]: the restartable sequence behind every series, index and frame
//! - [`ingestion`]: JSON/CSV adapters and the unified `ingest_from_path` entrypoint
//! - [`plugin`]: one-time process-wide extension registration
//! - [`error`]: the crate error type

pub mod combine;
pub mod dataframe;
pub mod error;
pub mod index;
pub mod ingestion;
pub mod lazy;
pub mod plugin;
pub mod series;
pub mod types;

pub use combine::{concat, merge, merge_series, zip, zip_series};
pub use dataframe::{matrix, DataFrame};
pub use error::{DataForgeError, DataForgeResult, ErrorKind, JoinSide};
pub use index::{Index, IndexKind};
pub use lazy::{LazySeq, SeqIter};
pub use plugin::{is_plugin_registered, use_plugin, Plugin};
pub use series::{range, Series};
pub use types::{Record, Row, Value};
