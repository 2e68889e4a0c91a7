//! Error types for plus-cli

use std::sync::Arc;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from plus-core
    #[error(transparent)]
    Core(#[from] plus_core::Error),

    /// Error from a shared resolution pass
    #[error(transparent)]
    Shared(#[from] Arc<plus_core::Error>),

    /// JSON output failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
