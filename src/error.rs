//! Error handling for musekit
//!
//! Orchestration failures are reported to the operator as log lines and an
//! exit code, never as a panic or backtrace. Best-effort repair and download
//! batches fold per-item failures into outcome lists instead of returning
//! errors; the variants here cover the operations that do abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for musekit operations
pub type Result<T> = std::result::Result<T, MusekitError>;

/// Main error type for musekit operations
#[derive(Error, Debug)]
pub enum MusekitError {
    #[error("Input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to write inference config {}: {source}", path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Inference backend failed to start: {reason}")]
    BackendUnavailable { reason: String },

    #[error("No output produced in {}", result_dir.display())]
    NoOutput { result_dir: PathBuf },

    #[error("Failed to copy result {} to {}: {source}", source_path.display(), dest.display())]
    ResultCopy {
        source_path: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MusekitError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MusekitError::MissingInput { .. } => "MISSING_INPUT",
            MusekitError::ConfigWrite { .. } => "CONFIG_WRITE",
            MusekitError::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
            MusekitError::NoOutput { .. } => "NO_OUTPUT",
            MusekitError::ResultCopy { .. } => "RESULT_COPY",
            MusekitError::Yaml(_) => "YAML_ERROR",
            MusekitError::Io(_) => "IO_ERROR",
        }
    }

    /// Check whether the operator can fix this without touching the install
    pub fn is_operator_fixable(&self) -> bool {
        matches!(
            self,
            MusekitError::MissingInput { .. } | MusekitError::NoOutput { .. }
        )
    }
}
