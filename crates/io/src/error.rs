use std::fmt;
use std::path::{Path, PathBuf};

use carex_metrics::MetricsError;

/// Errors from reading inputs or writing reports.
#[derive(Debug, Clone, PartialEq)]
pub enum IoError {
    /// File could not be opened or decoded.
    Open { path: PathBuf, message: String },
    /// Workbook lacks a required sheet.
    SheetNotFound { path: PathBuf, sheet: String },
    /// Required column absent from a table. Aborts the load.
    MissingColumn { table: String, column: String },
    /// Malformed CSV record.
    Csv { path: PathBuf, message: String },
    /// Export target could not be written.
    Write { path: PathBuf, message: String },
    /// JSON serialization failed.
    Json(String),
    /// Any other engine-side failure surfaced while loading.
    Metrics(MetricsError),
}

impl IoError {
    pub(crate) fn open(path: &Path, err: impl fmt::Display) -> Self {
        Self::Open { path: path.to_path_buf(), message: err.to_string() }
    }

    pub(crate) fn write(path: &Path, err: impl fmt::Display) -> Self {
        Self::Write { path: path.to_path_buf(), message: err.to_string() }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, message } => {
                write!(f, "cannot read '{}': {message}", path.display())
            }
            Self::SheetNotFound { path, sheet } => {
                write!(f, "'{}': sheet '{sheet}' not found", path.display())
            }
            Self::MissingColumn { table, column } => {
                write!(f, "table '{table}': missing column '{column}'")
            }
            Self::Csv { path, message } => {
                write!(f, "'{}': CSV error: {message}", path.display())
            }
            Self::Write { path, message } => {
                write!(f, "cannot write '{}': {message}", path.display())
            }
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Metrics(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<MetricsError> for IoError {
    fn from(err: MetricsError) -> Self {
        match err {
            MetricsError::MissingColumn { table, column } => Self::MissingColumn { table, column },
            other => Self::Metrics(other),
        }
    }
}
