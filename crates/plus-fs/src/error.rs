//! Error types for plus-fs

use std::path::PathBuf;

/// Result type for plus-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plus-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Failed to crawl {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
