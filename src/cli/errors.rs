//! CLI-specific error types
//!
//! Everything that escapes to `main` ends the process with a non-zero
//! exit; recoverable conditions (skippable records) never surface here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::estimator::EstimateError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON in {path} at line {line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

impl CliError {
    /// I/O failure while reading `path`
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// JSON parse failure at a 1-based line of `path`
    pub fn json(path: impl Into<PathBuf>, line: usize, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            line,
            source,
        }
    }
}
