//! [`TestProject`] builder for config resolution scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use plus_fs::NormalizedPath;
use plus_fs::resolve::canonical;
use serde_json::Value;
use tempfile::TempDir;

/// A temporary project directory with helpers for laying out declaration
/// files.
///
/// Paths passed to the helpers are relative to the project root; a leading
/// `/` is accepted so that tests can use the same root-relative paths the
/// engine reports.
///
/// # Example
///
/// ```rust,no_run
/// use plus_test_utils::TestProject;
/// use serde_json::json;
///
/// let project = TestProject::new();
/// project
///     .json("/pages/+config.json", json!({ "Page": "./Page.js" }))
///     .touch("/pages/Page.js");
/// project.assert_file_exists("/pages/Page.js");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The canonical root, matching the paths reported by discovery.
    pub fn normalized_root(&self) -> NormalizedPath {
        canonical(NormalizedPath::new(self.root()))
    }

    /// Absolute path of `path` inside the project.
    pub fn path(&self, path: &str) -> PathBuf {
        self.root().join(path.trim_start_matches('/'))
    }

    /// Write `content` to `path`, creating parent directories.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        let full_path = self.path(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", full_path.display()));
        self
    }

    /// Write `value` as pretty JSON to `path`.
    pub fn json(&self, path: &str, value: Value) -> &Self {
        let content = serde_json::to_string_pretty(&value).unwrap();
        self.write(path, &content)
    }

    /// Create an empty file, e.g. a code module targeted by an import.
    pub fn touch(&self, path: &str) -> &Self {
        self.write(path, "")
    }

    /// Write `plusconf.toml` at the root.
    pub fn settings(&self, content: &str) -> &Self {
        self.write("plusconf.toml", content)
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
