//! Outcome reporting for [`super::ingest_from_path`].
//!
//! Each call produces exactly one report: an [`IngestionStats`] when a frame was built, or a
//! [`DataForgeError`] with an [`IngestionSeverity`] when it was not. Failures whose severity
//! reaches the configured threshold are raised a second time through
//! [`IngestionObserver::on_alert`].

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::DataForgeError;

use super::unified::IngestionFormat;

/// How bad a failed read was. Ordered, so thresholds compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    Info,
    Warning,
    /// The source was reached but no frame could be built from it: bad JSON, a ragged CSV row, an
    /// unknown index column, an unrecognized extension.
    Error,
    /// The source itself was unreachable.
    Critical,
}

/// The source a frame was read from.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    /// `None` when no format was given and none could be inferred from the extension.
    pub format: Option<IngestionFormat>,
}

impl fmt::Display for IngestionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            Some(format) => write!(f, "format={format:?} path={}", self.path.display()),
            None => write!(f, "format=? path={}", self.path.display()),
        }
    }
}

/// Dimensions of a frame built by ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for IngestionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows={} columns={}", self.rows, self.columns)
    }
}

/// Receives one report per ingestion call. All methods default to doing nothing.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _source: &IngestionContext, _shape: IngestionStats) {}

    fn on_failure(
        &self,
        _source: &IngestionContext,
        _severity: IngestionSeverity,
        _error: &DataForgeError,
    ) {
    }

    /// Raised after `on_failure` for failures at or above the alert threshold. Forwards to
    /// `on_failure` unless overridden.
    fn on_alert(
        &self,
        source: &IngestionContext,
        severity: IngestionSeverity,
        error: &DataForgeError,
    ) {
        self.on_failure(source, severity, error)
    }
}

/// Hands each report to several observers, in registration order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }

    /// Add an observer after the existing ones.
    pub fn with(mut self, observer: Arc<dyn IngestionObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, source: &IngestionContext, shape: IngestionStats) {
        for observer in &self.observers {
            observer.on_success(source, shape);
        }
    }

    fn on_failure(&self, source: &IngestionContext, severity: IngestionSeverity, error: &DataForgeError) {
        for observer in &self.observers {
            observer.on_failure(source, severity, error);
        }
    }

    fn on_alert(&self, source: &IngestionContext, severity: IngestionSeverity, error: &DataForgeError) {
        for observer in &self.observers {
            observer.on_alert(source, severity, error);
        }
    }
}

/// Writes each report as a `[forge]` line on stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, source: &IngestionContext, shape: IngestionStats) {
        eprintln!("[forge] built frame {shape} from {source}");
    }

    fn on_failure(&self, source: &IngestionContext, severity: IngestionSeverity, error: &DataForgeError) {
        eprintln!("[forge] {severity:?}: no frame from {source}: {error}");
    }

    fn on_alert(&self, source: &IngestionContext, severity: IngestionSeverity, error: &DataForgeError) {
        eprintln!("[forge] ALERT {severity:?}: no frame from {source}: {error}");
    }
}

/// Appends each report, prefixed with a unix timestamp, to a log file.
///
/// A log file that cannot be opened or written is skipped silently; reporting never changes the
/// result of the read.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, entry: fmt::Arguments<'_>) {
        let _guard = self.lock.lock().ok();
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        if let Ok(mut log) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(log, "{stamp} {entry}");
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, source: &IngestionContext, shape: IngestionStats) {
        self.append(format_args!("ok {source} {shape}"));
    }

    fn on_failure(&self, source: &IngestionContext, severity: IngestionSeverity, error: &DataForgeError) {
        self.append(format_args!("fail severity={severity:?} {source} err={error}"));
    }

    fn on_alert(&self, source: &IngestionContext, severity: IngestionSeverity, error: &DataForgeError) {
        self.append(format_args!("ALERT severity={severity:?} {source} err={error}"));
    }
}
