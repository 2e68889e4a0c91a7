//! Most-relevant selection of one config's value for one page
//!
//! Every declaration of a config that applies to the page is a candidate.
//! The candidate with the deepest scope wins; two candidates sharing the
//! deepest scope are ambiguous and rejected.

use plus_fs::NormalizedPath;
use plus_fs::scope::specificity;
use plus_meta::{ConfigDefinition, ConfigEnv, ValidateContext, type_name};
use serde::Serialize;
use serde_json::Value;

use crate::collect::{ConfigFile, ValueFile};
use crate::loader::DEFAULT_EXPORT;
use crate::reference::ImportReference;
use crate::{Error, Result};

/// A resolved value: inline data or a pointer to code
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigValue {
    Literal {
        value: Value,
    },
    CodeReference {
        /// Root-relative path of the module
        module_path: String,
        export_name: String,
    },
}

impl ConfigValue {
    pub fn literal(&self) -> Option<&Value> {
        match self {
            Self::Literal { value } => Some(value),
            Self::CodeReference { .. } => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::CodeReference { .. })
    }
}

/// The resolved outcome for one config of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigElement {
    pub env: ConfigEnv,
    #[serde(flatten)]
    pub value: ConfigValue,
    /// Human-readable location used in messages
    pub defined_at: String,
    /// The file holding the value
    pub defined_by_file: String,
    /// The grouped declaration file, when the value came from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_in: Option<String>,
}

/// One declaration of a config
#[derive(Debug, Clone, Copy)]
enum Candidate<'a> {
    Grouped { file: &'a ConfigFile, value: &'a Value },
    ValueFile(&'a ValueFile),
}

impl Candidate<'_> {
    fn file_path(&self) -> &str {
        match self {
            Self::Grouped { file, .. } => &file.file_path,
            Self::ValueFile(file) => &file.file_path,
        }
    }

    fn specificity(&self) -> usize {
        match self {
            Self::Grouped { file, .. } => specificity(&file.scope()),
            Self::ValueFile(file) => specificity(&file.scope()),
        }
    }
}

/// Resolve `name` from the declarations that apply to one page.
///
/// `config_files` and `value_files` must already be filtered to those
/// applying to the page (or to the project root, for global configs).
/// Returns `None` when no declaration sets `name`.
pub fn resolve_config_element(
    name: &str,
    definition: &ConfigDefinition,
    config_files: &[&ConfigFile],
    value_files: &[&ValueFile],
    root: &NormalizedPath,
) -> Result<Option<ConfigElement>> {
    let candidates: Vec<Candidate<'_>> = value_files
        .iter()
        .filter(|file| file.config_name == name)
        .map(|&file| Candidate::ValueFile(file))
        .chain(config_files.iter().filter_map(|&file| {
            file.values
                .get(name)
                .map(|value| Candidate::Grouped { file, value })
        }))
        .collect();

    let Some(deepest) = candidates.iter().map(Candidate::specificity).max() else {
        return Ok(None);
    };
    let winners: Vec<&Candidate<'_>> = candidates
        .iter()
        .filter(|candidate| candidate.specificity() == deepest)
        .collect();
    if let [first, second, ..] = winners.as_slice() {
        return Err(Error::usage(format!(
            "the config '{name}' is defined by both {} and {} which have the same specificity: remove one of the two definitions",
            first.file_path(),
            second.file_path()
        )));
    }
    let winner = *winners[0];
    tracing::trace!(config = name, winner = winner.file_path(), candidates = candidates.len(), "Selected candidate");

    let element = match winner {
        Candidate::ValueFile(file) => resolve_value_file(name, definition, file)?,
        Candidate::Grouped { file, value } => resolve_grouped(name, definition, file, value, root)?,
    };
    Ok(Some(element))
}

fn resolve_value_file(
    name: &str,
    definition: &ConfigDefinition,
    file: &ValueFile,
) -> Result<ConfigElement> {
    let defined_at = format!("{} > `export {DEFAULT_EXPORT}`", file.file_path);
    let value = match &file.value {
        Some(value) if !definition.requires_code_file => {
            validate(name, definition, value, &file.file_path, Some(&file.file_path))?;
            ConfigValue::Literal {
                value: value.clone(),
            }
        }
        _ => ConfigValue::CodeReference {
            module_path: file.file_path.clone(),
            export_name: DEFAULT_EXPORT.to_string(),
        },
    };
    Ok(ConfigElement {
        env: definition.env,
        value,
        defined_at,
        defined_by_file: file.file_path.clone(),
        declared_in: None,
    })
}

fn resolve_grouped(
    name: &str,
    definition: &ConfigDefinition,
    file: &ConfigFile,
    raw: &Value,
    root: &NormalizedPath,
) -> Result<ConfigElement> {
    let reference = raw.as_str().and_then(ImportReference::parse);

    if let Some(reference) = reference {
        match reference.resolve(&file.file_path_absolute, root) {
            Some(module_path) => {
                return Ok(ConfigElement {
                    env: definition.env,
                    defined_at: format!("{module_path} > `export {}`", reference.export_name),
                    value: ConfigValue::CodeReference {
                        module_path,
                        export_name: reference.export_name,
                    },
                    defined_by_file: file.file_path.clone(),
                    declared_in: Some(file.file_path.clone()),
                });
            }
            None if definition.requires_code_file => {
                return Err(Error::usage(format!(
                    "{} sets the config {name} to the import path '{}' but no file was found at that path",
                    file.file_path, reference.specifier
                )));
            }
            None => {
                tracing::debug!(config = name, specifier = %reference.specifier, "Import target not found, keeping literal");
            }
        }
    } else if definition.requires_code_file {
        return Err(Error::usage(format!(
            "{} sets the config {name} to a value with an invalid type `{}`: it should be a path to a file instead (e.g. './{name}.js' or 'import:./{name}.js:{name}')",
            file.file_path,
            type_name(raw)
        )));
    }

    validate(name, definition, raw, &file.file_path, None)?;
    Ok(ConfigElement {
        env: definition.env,
        value: ConfigValue::Literal { value: raw.clone() },
        defined_at: format!("{} > {name}", file.file_path),
        defined_by_file: file.file_path.clone(),
        declared_in: Some(file.file_path.clone()),
    })
}

fn validate(
    name: &str,
    definition: &ConfigDefinition,
    value: &Value,
    declared_by: &str,
    code_file_path: Option<&str>,
) -> Result<()> {
    let Some(validate) = &definition.validate else {
        return Ok(());
    };
    validate(&ValidateContext {
        config_name: name,
        value,
        declared_by,
        code_file_path,
    })?;
    Ok(())
}
