//! Project settings (`plusconf.toml`) and per-resolution options
//!
//! Settings are optional: a project without `plusconf.toml` resolves with
//! the defaults.

use std::time::Duration;

use plus_fs::{FoundFile, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Name of the settings file at the project root
pub const SETTINGS_FILE: &str = "plusconf.toml";

fn default_slow_crawl_warning_ms() -> u64 {
    2000
}

/// Settings parsed from `plusconf.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Directory names skipped while crawling
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Crawls slower than this emit a warning in dev mode
    #[serde(default = "default_slow_crawl_warning_ms")]
    pub slow_crawl_warning_ms: u64,

    /// Add-ons shipping pre-built declaration files
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            slow_crawl_warning_ms: default_slow_crawl_warning_ms(),
            extensions: Vec::new(),
        }
    }
}

impl ProjectSettings {
    /// Parse settings from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use plus_core::ProjectSettings;
    ///
    /// let settings = ProjectSettings::parse(r#"
    /// ignore = ["dist"]
    ///
    /// [[extensions]]
    /// name = "ui-kit"
    /// "#).unwrap();
    ///
    /// assert_eq!(settings.ignore, vec!["dist"]);
    /// assert_eq!(settings.slow_crawl_warning_ms, 2000);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let settings: ProjectSettings = toml::from_str(content)?;
        Ok(settings)
    }

    /// Load `plusconf.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        if !path.is_file() {
            tracing::debug!(path = %path, "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path.to_native())?;
        let settings = Self::parse(&content)?;
        tracing::debug!(path = %path, extensions = settings.extensions.len(), "Loaded settings");
        Ok(settings)
    }

    pub fn slow_crawl_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_crawl_warning_ms)
    }
}

/// An add-on contributing declaration files from outside the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    #[serde(default)]
    pub config_files: Vec<ExtensionConfigFile>,
}

/// One distributable declaration file of an [`Extension`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionConfigFile {
    /// Root-relative identity of the file, e.g. `/ui-kit/+config.json`
    pub import_path: String,
    /// Where the file actually lives
    pub file_path: String,
}

impl Extension {
    /// Declaration files of this extension, skipping entries that are not `+` files.
    pub fn plus_files(&self) -> impl Iterator<Item = FoundFile> + '_ {
        self.config_files.iter().filter_map(|file| {
            let base_name = file.import_path.rsplit('/').next().unwrap_or_default();
            if !base_name.starts_with(plus_fs::constants::PLUS_PREFIX) {
                tracing::debug!(
                    extension = %self.name,
                    import_path = %file.import_path,
                    "Skipping extension file that is not a plus file"
                );
                return None;
            }
            Some(FoundFile::new(
                file.import_path.clone(),
                NormalizedPath::new(&file.file_path),
            ))
        })
    }
}

/// Inputs of one resolution
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub root: NormalizedPath,
    pub is_dev: bool,
    /// Extensions supplied programmatically, in addition to those in `settings`
    pub extensions: Vec<Extension>,
    pub settings: ProjectSettings,
}

impl ResolveOptions {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            is_dev: false,
            extensions: Vec::new(),
            settings: ProjectSettings::default(),
        }
    }

    /// Options for `root` with settings read from its `plusconf.toml`.
    pub fn load(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        let settings = ProjectSettings::load(&root)?;
        Ok(Self {
            settings,
            ..Self::new(root)
        })
    }

    pub fn dev(mut self, is_dev: bool) -> Self {
        self.is_dev = is_dev;
        self
    }

    pub fn with_settings(mut self, settings: ProjectSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Every extension: those from settings first, then programmatic ones.
    pub fn all_extensions(&self) -> impl Iterator<Item = &Extension> {
        self.settings.extensions.iter().chain(&self.extensions)
    }
}
