//! Adapters that read external data into a [`crate::DataFrame`].
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects the format by file extension (or you can override via [`IngestionOptions`])
//! - optionally moves a column into the index (see [`BuildOptions`])
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`builder`] (raw row matrix with a header row)

pub mod builder;
pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use builder::{build, BuildOptions};
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity,
    IngestionStats, StdErrObserver,
};
pub use unified::{ingest_from_path, severity_for_error, IngestionFormat, IngestionOptions};
