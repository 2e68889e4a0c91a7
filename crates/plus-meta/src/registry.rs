//! Definition table: built-ins extended by project `meta` declarations.
//!
//! The built-in table is never mutated. Each resolution builds a fresh
//! [`DefinitionTable`] by merging the `meta` objects it finds over a copy
//! of the built-ins.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::builtins::{built_in_definitions, global_definitions};
use crate::definition::{ConfigDefinition, type_name};
use crate::{ConfigEnv, Error, Result};

/// Keys accepted inside one `meta` entry.
const META_ENTRY_KEYS: &[&str] = &["env", "requiresCodeFile", "c_code"];

/// Mapping from config name to its effective definition.
///
/// # Example
///
/// ```
/// use plus_meta::{ConfigEnv, DefinitionTable};
/// use serde_json::json;
///
/// let meta = json!({ "title": { "env": "server-and-client" } });
/// let table = DefinitionTable::build([("/pages/+config.js", &meta)]).unwrap();
/// assert_eq!(table.get("title").unwrap().env, ConfigEnv::ServerAndClient);
/// assert!(table.contains("Page"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    definitions: BTreeMap<String, ConfigDefinition>,
}

impl DefinitionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the per-page built-in definitions.
    pub fn with_builtins() -> Self {
        Self::from_entries(built_in_definitions())
    }

    /// Table holding the global definitions.
    pub fn globals() -> Self {
        Self::from_entries(global_definitions())
    }

    fn from_entries(entries: Vec<(&'static str, ConfigDefinition)>) -> Self {
        let mut table = Self::new();
        for (name, definition) in entries {
            table.insert(name, definition);
        }
        table
    }

    /// Built-ins extended by every `meta` object in `sources`, in order.
    ///
    /// `sources` yields `(declared_by, meta)` pairs; later pairs win.
    pub fn build<'a>(sources: impl IntoIterator<Item = (&'a str, &'a Value)>) -> Result<Self> {
        let mut table = Self::with_builtins();
        for (declared_by, meta) in sources {
            table.merge_meta(declared_by, meta)?;
        }
        Ok(table)
    }

    /// Register a definition, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, definition: ConfigDefinition) {
        self.definitions.insert(name.into(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&ConfigDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Config names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
        self.definitions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigDefinition)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Shallowly merge one `meta` object into the table.
    ///
    /// Keys present in an entry replace the existing definition's fields;
    /// absent keys are kept. A new name must specify `env`.
    pub fn merge_meta(&mut self, declared_by: &str, meta: &Value) -> Result<()> {
        let entries = meta.as_object().ok_or_else(|| Error::InvalidMeta {
            declared_by: declared_by.to_string(),
            actual: type_name(meta).to_string(),
        })?;

        for (name, entry) in entries {
            let partial = PartialDefinition::parse(declared_by, name, entry)?;
            let merged = match (self.definitions.get(name), partial.env) {
                (Some(existing), _) => partial.apply(existing.clone()),
                (None, Some(env)) => partial.apply(ConfigDefinition::new(env)),
                (None, None) => {
                    return Err(entry_error(
                        declared_by,
                        name,
                        "without defining its env: set 'env' to one of client-only, server-only, server-and-client, config-only",
                    ));
                }
            };
            tracing::debug!(name = %name, env = %merged.env, declared_by, "Merged meta definition");
            self.definitions.insert(name.clone(), merged);
        }
        Ok(())
    }
}

/// The fields a `meta` entry may set.
#[derive(Debug, Default)]
struct PartialDefinition {
    env: Option<ConfigEnv>,
    requires_code_file: Option<bool>,
}

impl PartialDefinition {
    fn parse(declared_by: &str, name: &str, entry: &Value) -> Result<Self> {
        let fields: &Map<String, Value> = entry.as_object().ok_or_else(|| {
            entry_error(
                declared_by,
                name,
                format!(
                    "to a value with an invalid type `{}`: it should be an object instead",
                    type_name(entry)
                ),
            )
        })?;

        let mut partial = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "env" => {
                    let env = value
                        .as_str()
                        .ok_or_else(|| {
                            entry_error(declared_by, name, "env to a non-string value")
                        })?
                        .parse::<ConfigEnv>()
                        .map_err(|e| entry_error(declared_by, name, format!("env: {e}")))?;
                    partial.env = Some(env);
                }
                "requiresCodeFile" | "c_code" => {
                    let flag = value.as_bool().ok_or_else(|| {
                        entry_error(
                            declared_by,
                            name,
                            format!("{key} to a value with an invalid type `{}`: it should be a boolean instead", type_name(value)),
                        )
                    })?;
                    partial.requires_code_file = Some(flag);
                }
                other => {
                    return Err(entry_error(
                        declared_by,
                        name,
                        format!(
                            "with an unknown key '{other}', allowed keys are {}",
                            META_ENTRY_KEYS.join(", ")
                        ),
                    ));
                }
            }
        }
        Ok(partial)
    }

    fn apply(&self, mut definition: ConfigDefinition) -> ConfigDefinition {
        if let Some(env) = self.env {
            definition.env = env;
        }
        if let Some(flag) = self.requires_code_file {
            definition.requires_code_file = flag;
        }
        definition
    }
}

fn entry_error(declared_by: &str, name: &str, message: impl Into<String>) -> Error {
    Error::InvalidMetaEntry {
        declared_by: declared_by.to_string(),
        name: name.to_string(),
        message: message.into(),
    }
}
