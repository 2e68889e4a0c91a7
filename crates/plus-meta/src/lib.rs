//! Configuration definitions for plus-file projects.
//!
//! This crate holds the static rules attached to config names: the
//! built-in tables, project `meta` merging, and unknown-name detection.

pub mod builtins;
pub mod definition;
pub mod env;
pub mod error;
pub mod registry;
pub mod suggest;

pub use builtins::{
    GLOBAL_CONFIGS, META_KEY, ON_BEFORE_ROUTE, ON_PRERENDER_START, PAGE_DEFINING_CONFIGS,
    is_global, is_page_defining,
};
pub use definition::{
    ConfigDefinition, ConfigOverrides, EffectContext, EffectFn, ValidateContext, ValidateFn,
    type_name,
};
pub use env::ConfigEnv;
pub use error::{Error, Result};
pub use registry::DefinitionTable;
pub use suggest::{assert_config_name, most_similar};
