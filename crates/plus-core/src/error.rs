//! Error types for plus-core

/// Result type for plus-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a project's configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The project is misconfigured; the message tells the author how to fix it
    #[error("[Wrong Usage] {message}")]
    Usage { message: String },

    /// The engine broke one of its own invariants
    #[error("[Bug] {message}")]
    Internal { message: String },

    /// A declaration file could not be loaded
    #[error("Failed to load {path}: {message}")]
    Load { path: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from plus-fs
    #[error(transparent)]
    Fs(#[from] plus_fs::Error),

    /// Definition error from plus-meta
    #[error("[Wrong Usage] {0}")]
    Meta(#[from] plus_meta::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// YAML deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn load(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether the error was caused by the project author rather than the engine.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. } | Self::Meta(_))
    }
}
