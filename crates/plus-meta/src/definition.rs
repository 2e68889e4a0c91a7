//! Configuration definitions: the static rule attached to a config name.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{ConfigEnv, Result};

/// Overrides returned by an effect.
///
/// Keys are config names; the reserved key `meta` maps config names to
/// `{ "env": <env> }` objects that rewrite the env of those configs.
pub type ConfigOverrides = Map<String, Value>;

/// Validation hook run against a resolved value.
pub type ValidateFn = Arc<dyn Fn(&ValidateContext<'_>) -> Result<()> + Send + Sync>;

/// Effect hook deriving overrides of other configs from a value.
pub type EffectFn = Arc<dyn Fn(&EffectContext<'_>) -> Result<Option<ConfigOverrides>> + Send + Sync>;

/// Arguments passed to a [`ValidateFn`].
#[derive(Debug, Clone, Copy)]
pub struct ValidateContext<'a> {
    pub config_name: &'a str,
    pub value: &'a Value,
    /// File that declared the value
    pub declared_by: &'a str,
    /// Root-relative path of the referenced code file, if the value is a reference
    pub code_file_path: Option<&'a str>,
}

/// Arguments passed to an [`EffectFn`].
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub value: &'a Value,
    pub defined_at: &'a str,
}

/// The rule attached to one configuration name.
#[derive(Clone)]
pub struct ConfigDefinition {
    pub env: ConfigEnv,
    /// The value must resolve to a reference to code, never an inline literal.
    pub requires_code_file: bool,
    pub validate: Option<ValidateFn>,
    pub effect: Option<EffectFn>,
}

impl ConfigDefinition {
    pub fn new(env: ConfigEnv) -> Self {
        Self {
            env,
            requires_code_file: false,
            validate: None,
            effect: None,
        }
    }

    /// Definition whose value must be a code reference.
    pub fn code(env: ConfigEnv) -> Self {
        Self {
            requires_code_file: true,
            ..Self::new(env)
        }
    }

    pub fn with_validate(
        mut self,
        validate: impl Fn(&ValidateContext<'_>) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(validate));
        self
    }

    pub fn with_effect(
        mut self,
        effect: impl Fn(&EffectContext<'_>) -> Result<Option<ConfigOverrides>> + Send + Sync + 'static,
    ) -> Self {
        self.effect = Some(Arc::new(effect));
        self
    }
}

impl std::fmt::Debug for ConfigDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigDefinition")
            .field("env", &self.env)
            .field("requires_code_file", &self.requires_code_file)
            .field("validate", &self.validate.is_some())
            .field("effect", &self.effect.is_some())
            .finish()
    }
}

/// JSON-ish name of a value's type, used in usage messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
