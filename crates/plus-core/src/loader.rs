//! ModuleLoader trait and the static data-file loader

use std::collections::BTreeMap;

use async_trait::async_trait;
use plus_fs::FoundFile;
use serde_json::Value;

use crate::{Error, Result};

/// Export name of a module's default export
pub const DEFAULT_EXPORT: &str = "default";

/// Exported bindings of a loaded module, keyed by export name
pub type FileExports = BTreeMap<String, Value>;

/// Loads a declaration file and returns its exports.
///
/// Implementations may transpile and execute code; the engine only
/// needs the resulting values.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, file: &FoundFile) -> Result<FileExports>;
}

/// Loader for data-only declaration files.
///
/// Supports `.json`, `.toml`, `.yaml` and `.yml`. The parsed document
/// becomes the `default` export.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticModuleLoader;

impl StaticModuleLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse `content` according to the extension of `file`.
    pub fn parse(file: &FoundFile, content: &str) -> Result<Value> {
        let extension = file.path_absolute.extension().unwrap_or_default();
        let parsed = match extension {
            "json" => serde_json::from_str(content).map_err(|e| Error::load(&file.path_relative, e)),
            "toml" => toml::from_str(content).map_err(|e| Error::load(&file.path_relative, e)),
            "yaml" | "yml" => {
                serde_yaml::from_str(content).map_err(|e| Error::load(&file.path_relative, e))
            }
            other => Err(Error::load(
                &file.path_relative,
                format!("unsupported file type '{other}', expected json, toml or yaml"),
            )),
        }?;
        Ok(parsed)
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn load(&self, file: &FoundFile) -> Result<FileExports> {
        let content = tokio::fs::read_to_string(file.path_absolute.to_native())
            .await
            .map_err(|e| Error::load(&file.path_relative, e))?;
        let value = Self::parse(file, &content)?;
        tracing::trace!(file = %file.path_relative, "Loaded static module");
        Ok(FileExports::from([(DEFAULT_EXPORT.to_string(), value)]))
    }
}
