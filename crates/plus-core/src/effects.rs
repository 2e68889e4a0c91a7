//! Effects: configs whose value rewrites other configs of the same page
//!
//! Effects run once per page over the resolved elements. Every effect
//! reads the elements as they were before any effect ran, and writes into
//! a new map, so the order in which effects run never matters.

use std::collections::BTreeMap;

use plus_meta::{ConfigEnv, DefinitionTable, EffectContext, META_KEY};
use serde_json::Value;

use crate::resolve::{ConfigElement, ConfigValue};
use crate::{Error, Result};

/// Resolved elements of one page, keyed by config name
pub type ConfigElements = BTreeMap<String, ConfigElement>;

/// Apply every effect of `definitions` to `elements`, returning the new elements.
pub fn apply_effects(elements: &ConfigElements, definitions: &DefinitionTable) -> Result<ConfigElements> {
    let mut modified = elements.clone();

    for (name, definition) in definitions.iter() {
        let Some(effect) = &definition.effect else {
            continue;
        };
        if definition.env != ConfigEnv::ConfigOnly {
            return Err(Error::usage(format!(
                "the config '{name}' has an effect but its env is {}: configs with an effect must be config-only",
                definition.env
            )));
        }
        let Some(source) = elements.get(name) else {
            continue;
        };
        let Some(value) = source.value.literal() else {
            continue;
        };

        let Some(overrides) = effect(&EffectContext {
            value,
            defined_at: &source.defined_at,
        })?
        else {
            continue;
        };
        tracing::debug!(config = name, overrides = overrides.len(), "Applying effect");

        for (target, override_value) in overrides {
            if target == META_KEY {
                apply_env_overrides(name, &override_value, &mut modified)?;
                continue;
            }
            let Some(old) = modified.get(&target) else {
                return Err(Error::internal(format!(
                    "the effect of '{name}' overrides '{target}' which has no resolved value"
                )));
            };
            let replaced = ConfigElement {
                env: old.env,
                value: ConfigValue::Literal {
                    value: override_value,
                },
                defined_at: format!("{} (side-effect)", source.defined_at),
                defined_by_file: source.defined_by_file.clone(),
                declared_in: source.declared_in.clone(),
            };
            modified.insert(target, replaced);
        }
    }

    Ok(modified)
}

/// Apply a `meta` override: `{ <config>: { env: <env> } }`.
fn apply_env_overrides(source: &str, meta: &Value, elements: &mut ConfigElements) -> Result<()> {
    let entries = meta.as_object().ok_or_else(|| {
        Error::internal(format!("the effect of '{source}' returned a 'meta' override that isn't an object"))
    })?;

    for (target, entry) in entries {
        let env = entry
            .as_object()
            .filter(|fields| fields.len() == 1)
            .and_then(|fields| fields.get("env"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::internal(format!(
                    "the effect of '{source}' should override meta.{target} with exactly {{ env }}"
                ))
            })?
            .parse::<ConfigEnv>()
            .map_err(|e| Error::internal(format!("the effect of '{source}' sets meta.{target}: {e}")))?;

        let element = elements.get_mut(target).ok_or_else(|| {
            Error::internal(format!(
                "the effect of '{source}' overrides the env of '{target}' which has no resolved value"
            ))
        })?;
        tracing::debug!(config = %target, from = %element.env, to = %env, "Effect overrides env");
        element.env = env;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plus_meta::ConfigDefinition;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn literal(env: ConfigEnv, value: Value, file: &str, name: &str) -> ConfigElement {
        ConfigElement {
            env,
            value: ConfigValue::Literal { value },
            defined_at: format!("{file} > {name}"),
            defined_by_file: file.to_string(),
            declared_in: Some(file.to_string()),
        }
    }

    fn page_reference() -> ConfigElement {
        ConfigElement {
            env: ConfigEnv::ServerAndClient,
            value: ConfigValue::CodeReference {
                module_path: "/pages/Page.js".to_string(),
                export_name: "default".to_string(),
            },
            defined_at: "/pages/Page.js > `export default`".to_string(),
            defined_by_file: "/pages/+config.json".to_string(),
            declared_in: Some("/pages/+config.json".to_string()),
        }
    }

    #[test]
    fn test_ssr_false_makes_page_client_only() {
        let elements = ConfigElements::from([
            ("Page".to_string(), page_reference()),
            (
                "ssr".to_string(),
                literal(ConfigEnv::ConfigOnly, json!(false), "/pages/+config.json", "ssr"),
            ),
        ]);
        let result = apply_effects(&elements, &DefinitionTable::with_builtins()).unwrap();

        assert_eq!(result["Page"].env, ConfigEnv::ClientOnly);
        assert_eq!(result["Page"].value, elements["Page"].value);
        assert_eq!(elements["Page"].env, ConfigEnv::ServerAndClient);
    }

    #[test]
    fn test_ssr_true_changes_nothing() {
        let elements = ConfigElements::from([
            ("Page".to_string(), page_reference()),
            (
                "ssr".to_string(),
                literal(ConfigEnv::ConfigOnly, json!(true), "/pages/+config.json", "ssr"),
            ),
        ]);
        let result = apply_effects(&elements, &DefinitionTable::with_builtins()).unwrap();
        assert_eq!(result, elements);
    }

    #[test]
    fn test_env_override_without_target_is_internal() {
        let elements = ConfigElements::from([(
            "ssr".to_string(),
            literal(ConfigEnv::ConfigOnly, json!(false), "/+config.json", "ssr"),
        )]);
        let err = apply_effects(&elements, &DefinitionTable::with_builtins()).unwrap_err();
        assert!(matches!(err, Error::Internal { .. }));
    }

    #[test]
    fn test_value_override_keeps_env_and_marks_side_effect() {
        let mut definitions = DefinitionTable::with_builtins();
        definitions.insert(
            "theme",
            ConfigDefinition::new(ConfigEnv::ConfigOnly).with_effect(|ctx| {
                Ok(json!({ "title": format!("themed {}", ctx.value.as_str().unwrap_or_default()) })
                    .as_object()
                    .cloned())
            }),
        );
        definitions.insert("title", ConfigDefinition::new(ConfigEnv::ServerAndClient));

        let elements = ConfigElements::from([
            (
                "theme".to_string(),
                literal(ConfigEnv::ConfigOnly, json!("dark"), "/+config.json", "theme"),
            ),
            (
                "title".to_string(),
                literal(ConfigEnv::ServerAndClient, json!("Home"), "/pages/+config.json", "title"),
            ),
        ]);
        let result = apply_effects(&elements, &definitions).unwrap();

        let title = &result["title"];
        assert_eq!(title.env, ConfigEnv::ServerAndClient);
        assert_eq!(title.value.literal(), Some(&json!("themed dark")));
        assert_eq!(title.defined_at, "/+config.json > theme (side-effect)");
    }

    #[test]
    fn test_effects_read_pre_effect_values() {
        let mut definitions = DefinitionTable::new();
        // `a` rewrites `b`, `b` rewrites `c`: `c` must see the original `b`.
        definitions.insert(
            "a",
            ConfigDefinition::new(ConfigEnv::ConfigOnly)
                .with_effect(|_| Ok(json!({ "b": "from a" }).as_object().cloned())),
        );
        definitions.insert(
            "b",
            ConfigDefinition::new(ConfigEnv::ConfigOnly)
                .with_effect(|ctx| Ok(json!({ "c": ctx.value.clone() }).as_object().cloned())),
        );
        definitions.insert("c", ConfigDefinition::new(ConfigEnv::ConfigOnly));

        let elements: ConfigElements = ["a", "b", "c"]
            .into_iter()
            .map(|name| {
                let element = literal(ConfigEnv::ConfigOnly, json!(name), "/+config.json", name);
                (name.to_string(), element)
            })
            .collect();
        let result = apply_effects(&elements, &definitions).unwrap();

        assert_eq!(result["b"].value.literal(), Some(&json!("from a")));
        assert_eq!(result["c"].value.literal(), Some(&json!("b")));
    }

    #[test]
    fn test_effect_invoked_once_and_skips_references() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut definitions = DefinitionTable::new();
        definitions.insert(
            "flag",
            ConfigDefinition::new(ConfigEnv::ConfigOnly).with_effect(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }),
        );
        definitions.insert(
            "hook",
            ConfigDefinition::new(ConfigEnv::ConfigOnly).with_effect(|_| {
                panic!("effects never run on code references");
            }),
        );

        let mut hook = page_reference();
        hook.env = ConfigEnv::ConfigOnly;
        let elements = ConfigElements::from([
            (
                "flag".to_string(),
                literal(ConfigEnv::ConfigOnly, json!(1), "/+config.json", "flag"),
            ),
            ("hook".to_string(), hook),
        ]);
        apply_effects(&elements, &definitions).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_effect_requires_config_only_env() {
        let mut definitions = DefinitionTable::with_builtins();
        definitions
            .merge_meta("/+config.json", &json!({ "ssr": { "env": "server-only" } }))
            .unwrap();
        let elements = ConfigElements::new();

        let err = apply_effects(&elements, &definitions).unwrap_err();
        assert!(err.is_usage());
    }
}
