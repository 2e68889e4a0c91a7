//! Import references: strings that point at code instead of holding a value
//!
//! Two forms are recognized:
//!
//! - `import:<path>:<export>`, the export name following the last `:`
//! - a relative path starting with `./` or `../`, meaning its default export

use std::sync::LazyLock;

use plus_fs::{NormalizedPath, resolve_module};
use regex::Regex;

use crate::loader::DEFAULT_EXPORT;

static IMPORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^import:(.+):([A-Za-z_$][A-Za-z0-9_$]*)$").unwrap());

static RELATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\.\.?/").unwrap());

/// A parsed import reference, not yet resolved on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    pub specifier: String,
    pub export_name: String,
}

impl ImportReference {
    /// Parse `value` as an import reference.
    ///
    /// ```
    /// use plus_core::reference::ImportReference;
    ///
    /// let reference = ImportReference::parse("import:./Layout.js:Layout").unwrap();
    /// assert_eq!(reference.specifier, "./Layout.js");
    /// assert_eq!(reference.export_name, "Layout");
    ///
    /// assert!(ImportReference::parse("Hello world").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(captures) = IMPORT_PATTERN.captures(value) {
            return Some(Self {
                specifier: captures[1].to_string(),
                export_name: captures[2].to_string(),
            });
        }
        if RELATIVE_PATTERN.is_match(value) {
            return Some(Self {
                specifier: value.to_string(),
                export_name: DEFAULT_EXPORT.to_string(),
            });
        }
        None
    }

    /// Resolve the specifier on disk.
    ///
    /// Relative specifiers resolve against the directory of `declared_in`;
    /// specifiers starting with `/` resolve against `root`. Returns the
    /// root-relative path of the module, or its absolute path when it lives
    /// outside the root.
    pub fn resolve(&self, declared_in: &NormalizedPath, root: &NormalizedPath) -> Option<String> {
        let base_dir = if self.specifier.starts_with('/') {
            root.clone()
        } else {
            declared_in.parent()?
        };
        let resolved = resolve_module(&base_dir, &self.specifier)?;
        let module_path = resolved
            .relative_to(root)
            .unwrap_or_else(|| resolved.as_str().to_string());
        tracing::trace!(specifier = %self.specifier, module_path = %module_path, "Resolved import");
        Some(module_path)
    }
}
