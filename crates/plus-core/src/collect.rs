//! Candidate collection: turning discovered files into loaded declarations
//!
//! Grouped declaration files (`+config.*`) are always loaded. Single-value
//! files (`+<name>.*`) are only loaded when their config is consumed at
//! resolution time (`config-only` without `requiresCodeFile`); otherwise
//! the file itself is the value.

use futures::future::join_all;
use plus_fs::scope::{config_name_of, is_grouped_declaration, scope_of, specificity};
use plus_fs::{FoundFile, NormalizedPath};
use plus_meta::{ConfigEnv, DefinitionTable, META_KEY, assert_config_name, type_name};
use serde_json::{Map, Value};

use crate::loader::{DEFAULT_EXPORT, FileExports, ModuleLoader};
use crate::{Error, Result};

/// A loaded grouped declaration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Root-relative path, or the import path for extension files
    pub file_path: String,
    pub file_path_absolute: NormalizedPath,
    /// The default export: config name to raw value
    pub values: Map<String, Value>,
}

impl ConfigFile {
    /// Build from a loader's output, requiring an object default export.
    pub fn from_exports(file: &FoundFile, mut exports: FileExports) -> Result<Self> {
        let default = exports.remove(DEFAULT_EXPORT).ok_or_else(|| {
            Error::usage(format!("{} doesn't have a default export", file.path_relative))
        })?;
        let Value::Object(values) = default else {
            return Err(Error::usage(format!(
                "{} should export default an object, but it exports a value with type `{}`",
                file.path_relative,
                type_name(&default)
            )));
        };
        Ok(Self {
            file_path: file.path_relative.clone(),
            file_path_absolute: file.path_absolute.clone(),
            values,
        })
    }

    pub fn scope(&self) -> String {
        scope_of(&self.file_path)
    }

    /// The `meta` object of this file, if any.
    pub fn meta(&self) -> Option<&Value> {
        self.values.get(META_KEY)
    }

    /// Config names this file sets, `meta` excluded.
    pub fn config_names(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|name| *name != META_KEY)
    }
}

/// A single-value declaration file
#[derive(Debug, Clone, PartialEq)]
pub struct ValueFile {
    pub file_path: String,
    pub file_path_absolute: NormalizedPath,
    pub config_name: String,
    /// Loaded value, present only for configs consumed at resolution time
    pub value: Option<Value>,
}

impl ValueFile {
    pub fn scope(&self) -> String {
        scope_of(&self.file_path)
    }
}

/// Discovered files split by kind
#[derive(Debug, Clone, Default)]
pub struct PlusFiles {
    pub grouped: Vec<FoundFile>,
    pub value_files: Vec<FoundFile>,
}

impl PlusFiles {
    /// Split discovered files into grouped declarations and value files.
    pub fn partition(files: impl IntoIterator<Item = FoundFile>) -> Self {
        let (grouped, value_files) = files
            .into_iter()
            .partition(|file| is_grouped_declaration(&file.path_relative));
        Self {
            grouped,
            value_files,
        }
    }
}

/// `(declared_by, meta)` pairs of `files`, shallowest scope first.
///
/// Feeding these to [`DefinitionTable::build`] lets deeper `meta`
/// declarations override shallower ones.
pub fn meta_sources<'a>(files: impl IntoIterator<Item = &'a ConfigFile>) -> Vec<(&'a str, &'a Value)> {
    let mut files: Vec<&ConfigFile> = files.into_iter().filter(|f| f.meta().is_some()).collect();
    files.sort_by_key(|file| specificity(&file.scope()));
    files
        .into_iter()
        .filter_map(|file| Some((file.file_path.as_str(), file.meta()?)))
        .collect()
}

/// Load every grouped declaration file concurrently.
///
/// All loads are started at once and awaited together; the first failure
/// (in file order) is returned once every load has settled.
pub async fn load_config_files(
    files: &[FoundFile],
    loader: &dyn ModuleLoader,
) -> Result<Vec<ConfigFile>> {
    let loads = files.iter().map(|file| async move {
        let exports = loader.load(file).await?;
        ConfigFile::from_exports(file, exports)
    });
    let config_files = join_all(loads).await.into_iter().collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = config_files.len(), "Loaded grouped declaration files");
    Ok(config_files)
}

/// Turn value files into [`ValueFile`]s, loading those consumed at resolution time.
///
/// Every value file must name a config known to `definitions` or
/// `globals`, whether or not it belongs to a page. A value file is loaded when the definition of its config, looked up in
/// `definitions` then `globals`, is `config-only` and does not require a
/// code file. Loads run concurrently.
pub async fn load_value_files(
    files: &[FoundFile],
    definitions: &DefinitionTable,
    globals: &DefinitionTable,
    loader: &dyn ModuleLoader,
) -> Result<Vec<ValueFile>> {
    let loads = files.iter().map(|file| async move {
        let config_name = config_name_of(&file.path_relative)
            .ok_or_else(|| Error::internal(format!("{} is not a plus file", file.path_relative)))?
            .to_string();
        assert_config_name(
            &config_name,
            definitions.names().chain(globals.names()),
            &file.path_relative,
        )?;
        let definition = definitions
            .get(&config_name)
            .or_else(|| globals.get(&config_name));
        let eager = definition
            .is_some_and(|def| def.env == ConfigEnv::ConfigOnly && !def.requires_code_file);

        let value = if eager {
            let mut exports = loader.load(file).await?;
            let value = exports.remove(DEFAULT_EXPORT).ok_or_else(|| {
                Error::usage(format!("{} doesn't have a default export", file.path_relative))
            })?;
            Some(value)
        } else {
            None
        };

        Ok::<_, Error>(ValueFile {
            file_path: file.path_relative.clone(),
            file_path_absolute: file.path_absolute.clone(),
            config_name,
            value,
        })
    });
    let value_files = join_all(loads).await.into_iter().collect::<Result<Vec<_>>>()?;
    tracing::debug!(
        count = value_files.len(),
        loaded = value_files.iter().filter(|f| f.value.is_some()).count(),
        "Collected value files"
    );
    Ok(value_files)
}
