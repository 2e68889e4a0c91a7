//! Global configs: declared once at the project root, stored outside pages

use plus_fs::NormalizedPath;
use plus_fs::scope::is_root_scope;
use plus_meta::{DefinitionTable, ON_BEFORE_ROUTE, ON_PRERENDER_START, is_global};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::collect::{ConfigFile, ValueFile};
use crate::resolve::{ConfigElement, resolve_config_element};
use crate::warning::Warnings;
use crate::{Error, Result};

/// Global hooks, kept as code references
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageConfigGlobal {
    pub on_before_route: Option<ConfigElement>,
    pub on_prerender_start: Option<ConfigElement>,
}

/// Resolved global configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalConfig {
    pub hooks: PageConfigGlobal,
    /// Literal global values, keyed by config name
    pub settings: Map<String, Value>,
}

/// Join `items` as an English enumeration: `a, b or c`.
///
/// ```
/// use plus_core::globals::join_english;
///
/// assert_eq!(join_english(&["/+config.js"], "or"), "/+config.js");
/// assert_eq!(join_english(&["a", "b", "c"], "or"), "a, b or c");
/// ```
pub fn join_english<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [firsts @ .., last] => {
            let firsts: Vec<&str> = firsts.iter().map(AsRef::as_ref).collect();
            format!("{} {conjunction} {}", firsts.join(", "), last.as_ref())
        }
    }
}

/// Fail if any global config is declared outside the project root.
pub fn assert_global_placement(config_files: &[ConfigFile], value_files: &[ValueFile]) -> Result<()> {
    let root_files: Vec<&str> = config_files
        .iter()
        .map(|file| file.file_path.as_str())
        .filter(|path| is_root_scope(path))
        .collect();

    let misplaced_in_config_files = config_files
        .iter()
        .filter(|file| !is_root_scope(&file.file_path))
        .flat_map(|file| {
            file.config_names()
                .filter(|name| is_global(name))
                .map(move |name| (file.file_path.as_str(), name))
        });
    let misplaced_in_value_files = value_files
        .iter()
        .filter(|file| is_global(&file.config_name) && !is_root_scope(&file.file_path))
        .map(|file| (file.file_path.as_str(), file.config_name.as_str()));

    if let Some((file_path, name)) = misplaced_in_config_files.chain(misplaced_in_value_files).next() {
        let fix = if root_files.is_empty() {
            format!(
                "create a global config (e.g. /pages/+config.js or /renderer/+config.js) and define '{name}' there instead"
            )
        } else {
            format!("define '{name}' in {} instead", join_english(&root_files, "or"))
        };
        return Err(Error::usage(format!(
            "{file_path} defines the config '{name}' which is global: {fix}"
        )));
    }
    Ok(())
}

/// Resolve every global config from the root-scoped declarations.
///
/// `prerender` is also a per-page config: a boolean root value is left to
/// the pages. Other literal globals land in [`GlobalConfig::settings`]
/// with an experimental warning.
pub fn resolve_globals(
    config_files: &[ConfigFile],
    value_files: &[ValueFile],
    root: &NormalizedPath,
    warnings: &Warnings,
) -> Result<GlobalConfig> {
    assert_global_placement(config_files, value_files)?;

    let root_files: Vec<&ConfigFile> = config_files
        .iter()
        .filter(|file| is_root_scope(&file.file_path))
        .collect();
    let global_value_files: Vec<&ValueFile> = value_files
        .iter()
        .filter(|file| is_global(&file.config_name))
        .collect();

    let mut global = GlobalConfig::default();
    for (name, definition) in DefinitionTable::globals().iter() {
        let Some(element) =
            resolve_config_element(name, definition, &root_files, &global_value_files, root)?
        else {
            continue;
        };

        match name {
            ON_BEFORE_ROUTE => global.hooks.on_before_route = Some(element),
            ON_PRERENDER_START => global.hooks.on_prerender_start = Some(element),
            _ => {
                let Some(value) = element.value.literal() else {
                    return Err(Error::internal(format!(
                        "the global config '{name}' resolved to a code reference at {}",
                        element.defined_at
                    )));
                };
                if name == "prerender" && value.is_boolean() {
                    continue;
                }
                let message = format!(
                    "Being able to define config '{name}' in {} is experimental and will likely be removed. Define the config '{name}' in the build tool's options instead.",
                    element.defined_by_file
                );
                warnings.warn_once(&message, message.clone());
                global.settings.insert(name.to_string(), value.clone());
            }
        }
    }

    tracing::debug!(
        on_before_route = global.hooks.on_before_route.is_some(),
        on_prerender_start = global.hooks.on_prerender_start.is_some(),
        settings = global.settings.len(),
        "Resolved global configs"
    );
    Ok(global)
}
