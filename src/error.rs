//! Crate error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library's fallible operations.
///
/// The heuristics and the redaction engine are total over any line
/// sequence and never produce these; errors come from the I/O and
/// configuration edges.
#[derive(Debug, Error)]
pub enum SofcertError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input document not found: {0}")]
    MissingInput(PathBuf),

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SofcertError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
