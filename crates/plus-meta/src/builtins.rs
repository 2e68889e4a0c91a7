//! Built-in configuration definitions.

use serde_json::{Value, json};

use crate::definition::{ConfigDefinition, type_name};
use crate::{ConfigEnv, Error};

/// Config names whose presence defines a page.
pub const PAGE_DEFINING_CONFIGS: &[&str] = &["Page", "route"];

/// Reserved key under which a grouped file extends the definition table.
pub const META_KEY: &str = "meta";

/// Global config holding the `onBeforeRoute` hook.
pub const ON_BEFORE_ROUTE: &str = "onBeforeRoute";

/// Global config holding the `onPrerenderStart` hook.
pub const ON_PRERENDER_START: &str = "onPrerenderStart";

/// Names of global configs.
pub const GLOBAL_CONFIGS: &[&str] = &[
    ON_PRERENDER_START,
    ON_BEFORE_ROUTE,
    "prerender",
    "extensions",
    "disableAutoFullBuild",
    "includeAssetsImportedByServer",
    "baseAssets",
    "baseServer",
];

/// Whether `name` defines a page.
pub fn is_page_defining(name: &str) -> bool {
    PAGE_DEFINING_CONFIGS.contains(&name)
}

/// Whether `name` is restricted to project-root scope.
///
/// `prerender` is resolved globally but may also be set per page, so it
/// is not subject to the root-scope placement rule.
pub fn is_global(name: &str) -> bool {
    name != "prerender" && GLOBAL_CONFIGS.contains(&name)
}

/// The per-page built-in definitions, in declaration order.
pub fn built_in_definitions() -> Vec<(&'static str, ConfigDefinition)> {
    use ConfigEnv::*;
    vec![
        ("onRenderHtml", ConfigDefinition::code(ServerOnly)),
        ("onRenderClient", ConfigDefinition::code(ClientOnly)),
        ("Page", ConfigDefinition::code(ServerAndClient)),
        ("route", ConfigDefinition::code(Routing)),
        ("guard", ConfigDefinition::code(Routing)),
        ("onBeforeRender", ConfigDefinition::code(ServerOnly)),
        ("onHydrationEnd", ConfigDefinition::code(ClientOnly)),
        ("onPageTransitionStart", ConfigDefinition::code(ClientOnly)),
        ("onPageTransitionEnd", ConfigDefinition::code(ClientOnly)),
        (
            "passToClient",
            ConfigDefinition::new(ServerOnly).with_validate(|ctx| {
                let is_string_list = ctx
                    .value
                    .as_array()
                    .is_some_and(|items| items.iter().all(Value::is_string));
                if is_string_list {
                    Ok(())
                } else {
                    Err(Error::invalid_value(
                        ctx.config_name,
                        ctx.declared_by,
                        format!(
                            "a value with an invalid type `{}`: it should be a list of strings instead",
                            type_name(ctx.value)
                        ),
                    ))
                }
            }),
        ),
        (
            "clientRouting",
            ConfigDefinition::new(ConfigOnly).with_validate(expect_boolean),
        ),
        ("prerender", ConfigDefinition::new(ConfigOnly)),
        (
            "iKnowThePerformanceRisksOfAsyncRouteFunctions",
            ConfigDefinition::new(ServerAndClient),
        ),
        ("filesystemRoutingRoot", ConfigDefinition::new(ConfigOnly)),
        ("hydrationCanBeAborted", ConfigDefinition::new(ClientOnly)),
        (
            "ssr",
            ConfigDefinition::new(ConfigOnly)
                .with_validate(expect_boolean)
                .with_effect(|ctx| {
                    if ctx.value.as_bool() != Some(false) {
                        return Ok(None);
                    }
                    let overrides = json!({
                        "meta": { "Page": { "env": ClientOnly.as_str() } }
                    });
                    Ok(overrides.as_object().cloned())
                }),
        ),
    ]
}

/// Definitions of the global configs.
pub fn global_definitions() -> Vec<(&'static str, ConfigDefinition)> {
    use ConfigEnv::*;
    vec![
        (ON_PRERENDER_START, ConfigDefinition::code(ServerOnly)),
        (ON_BEFORE_ROUTE, ConfigDefinition::code(Routing)),
        ("prerender", ConfigDefinition::new(ConfigOnly)),
        ("extensions", ConfigDefinition::new(ConfigOnly)),
        ("disableAutoFullBuild", ConfigDefinition::new(ConfigOnly)),
        ("includeAssetsImportedByServer", ConfigDefinition::new(ConfigOnly)),
        ("baseAssets", ConfigDefinition::new(ConfigOnly)),
        ("baseServer", ConfigDefinition::new(ConfigOnly)),
    ]
}

fn expect_boolean(ctx: &crate::ValidateContext<'_>) -> crate::Result<()> {
    if ctx.value.is_boolean() {
        return Ok(());
    }
    Err(Error::invalid_value(
        ctx.config_name,
        ctx.declared_by,
        format!(
            "a value with an invalid type `{}`: it should be a boolean instead",
            type_name(ctx.value)
        ),
    ))
}
