use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for imgslot operations.
#[derive(Debug, Error)]
pub enum ImgslotError {
    #[error("{what} not found: {path}")]
    NotFound { what: &'static str, path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed while scanning image directory {path}: {source}")]
    DirectoryScan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to serialize report as JSON: {0}")]
    ReportJson(#[from] serde_json::Error),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },
}
