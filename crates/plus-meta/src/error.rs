//! Error types for plus-meta
//!
//! Every variant is a usage error: something the project author wrote
//! and can fix.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "{declared_by} sets the config 'meta' to a value with an invalid type `{actual}`: it should be an object instead"
    )]
    InvalidMeta { declared_by: String, actual: String },

    #[error("{declared_by} sets 'meta.{name}' {message}")]
    InvalidMetaEntry {
        declared_by: String,
        name: String,
        message: String,
    },

    #[error(
        "{defined_by} defines an unknown config '{name}'{}",
        .suggestion.as_ref().map(|s| format!(", did you mean to define '{s}' instead?")).unwrap_or_default()
    )]
    UnknownConfig {
        name: String,
        defined_by: String,
        suggestion: Option<String>,
    },

    #[error("{declared_by} sets the config {name} to {message}")]
    InvalidValue {
        name: String,
        declared_by: String,
        message: String,
    },
}

impl Error {
    /// A value rejected by a definition's validation hook.
    pub fn invalid_value(
        name: impl Into<String>,
        declared_by: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            declared_by: declared_by.into(),
            message: message.into(),
        }
    }
}
