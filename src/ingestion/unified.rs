//! Path-based ingestion with format detection.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::dataframe::DataFrame;
use crate::error::{DataForgeError, DataForgeResult};

use super::builder::{apply_index_col, BuildOptions};
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of objects.
    Json,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling [`ingest_from_path`].
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, the format is inferred from the file extension.
    pub format: Option<IngestionFormat>,
    /// Index extraction and cell parsing.
    pub build: BuildOptions,
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity are also reported through `on_alert`.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("build", &self.build)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            build: BuildOptions::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Read a CSV or JSON file into a [`DataFrame`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` with row and column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_data_forge::ingestion::{
///     ingest_from_path, BuildOptions, IngestionOptions, IngestionSeverity, StdErrObserver,
/// };
///
/// # fn main() -> Result<(), rust_data_forge::DataForgeError> {
/// let opts = IngestionOptions {
///     build: BuildOptions {
///         index_col: Some("id".to_string()),
///         ..Default::default()
///     },
///     observer: Some(Arc::new(StdErrObserver)),
///     alert_at_or_above: IngestionSeverity::Critical,
///     ..Default::default()
/// };
///
/// let df = ingest_from_path("people.csv", &opts)?;
/// println!("rows={}", df.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> DataForgeResult<DataFrame> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => Ok(f),
        None => infer_format_from_path(path),
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format: format.as_ref().ok().copied(),
    };

    let result = format.and_then(|format| match format {
        IngestionFormat::Csv => csv::from_csv_path(path, &options.build),
        IngestionFormat::Json => {
            json::from_json_path(path).and_then(|df| apply_index_col(df, &options.build))
        }
    });

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(df) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: df.row_count(),
                    columns: df.column_names().len(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Severity reported to observers for `e`.
pub fn severity_for_error(e: &DataForgeError) -> IngestionSeverity {
    match e {
        DataForgeError::Io(_) => IngestionSeverity::Critical,
        DataForgeError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        DataForgeError::ColumnNotFound { .. }
        | DataForgeError::Validation { .. }
        | DataForgeError::Json(_)
        | DataForgeError::UnsupportedFormat { .. } => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> DataForgeResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| DataForgeError::UnsupportedFormat {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| DataForgeError::UnsupportedFormat {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}
