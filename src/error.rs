use std::fmt;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type DataForgeResult<T> = Result<T, DataForgeError>;

/// Which input of a two-sided operation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    /// The first (left) data frame of a merge.
    Left,
    /// The second (right) data frame of a merge.
    Right,
}

impl fmt::Display for JoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Coarse classification of [`DataForgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced column or series does not exist.
    Lookup,
    /// Inputs have an invalid structure (count mismatch, duplicate names, wrong shape).
    Validation,
    /// External text input could not be parsed.
    Parse,
    /// Underlying I/O failure.
    Io,
}

/// Error type returned by data frame operations and ingestion adapters.
#[derive(Debug, Error)]
pub enum DataForgeError {
    /// A column named by the caller is not present.
    #[error("column not found: '{column}'{location}", location = side_display(.side))]
    ColumnNotFound {
        column: String,
        side: Option<JoinSide>,
    },

    /// Structural mismatch in the inputs of an operation.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Malformed JSON text. The parser error is passed through untouched.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The ingestion format could not be determined.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },
}

impl DataForgeError {
    /// Create a lookup error for a column that is missing from a single frame.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            side: None,
        }
    }

    /// Create a lookup error for a merge key missing from one side of a join.
    pub fn join_column_not_found(column: impl Into<String>, side: JoinSide) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            side: Some(side),
        }
    }

    /// Create a validation error with a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ColumnNotFound { .. } => ErrorKind::Lookup,
            Self::Validation { .. } | Self::UnsupportedFormat { .. } => ErrorKind::Validation,
            Self::Json(_) => ErrorKind::Parse,
            Self::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => ErrorKind::Io,
                _ => ErrorKind::Parse,
            },
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

fn side_display(side: &Option<JoinSide>) -> String {
    match side {
        Some(side) => format!(" in the {side} data frame"),
        None => String::new(),
    }
}
