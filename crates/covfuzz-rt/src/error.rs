//! Error types for the runtime hooks.

use std::path::PathBuf;
use thiserror::Error;

use crate::location::ParseLocationError;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors raised while recording or reading coverage
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The path of the running executable could not be resolved
    #[error("Cannot find the running executable")]
    ExecutableNotFound {
        /// Underlying error from the OS
        #[source]
        source: std::io::Error,
    },

    /// The coverage file could not be opened, removed or written
    #[error("Coverage file {path}: {source}")]
    CoverageIo {
        /// Coverage file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A coverage record could not be parsed
    #[error("Malformed coverage record on line {line}: {source}")]
    MalformedRecord {
        /// 1-based line number in the coverage file
        line: usize,
        /// Parse failure
        #[source]
        source: ParseLocationError,
    },
}

impl RuntimeError {
    /// Wrap an I/O error that happened on the given coverage file
    #[must_use]
    pub fn coverage_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CoverageIo {
            path: path.into(),
            source,
        }
    }
}
