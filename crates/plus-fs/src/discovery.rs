//! Discovery of `+` declaration files under a project root.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::constants::{ALWAYS_IGNORED_DIRS, PLUS_PREFIX};
use crate::{Error, NormalizedPath, Result};

/// A discovered declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoundFile {
    /// Path relative to the project root, always starting with `/`.
    pub path_relative: String,
    /// Absolute path used for loading.
    pub path_absolute: NormalizedPath,
}

impl FoundFile {
    pub fn new(path_relative: impl Into<String>, path_absolute: impl Into<NormalizedPath>) -> Self {
        Self {
            path_relative: path_relative.into(),
            path_absolute: path_absolute.into(),
        }
    }
}

/// Result of a crawl, with the time it took.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub files: Vec<FoundFile>,
    pub elapsed: Duration,
}

/// Find every file whose name starts with `+` below `root`.
///
/// Dot-directories, `node_modules` and every directory named in `ignore`
/// are skipped. Results are sorted by relative path so that a crawl is
/// deterministic across platforms.
pub fn find_plus_files(root: &NormalizedPath, ignore: &[String]) -> Result<Discovery> {
    let started = Instant::now();
    let native_root = root.to_native();
    if !native_root.is_dir() {
        return Err(Error::RootNotFound {
            path: native_root,
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(&native_root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry, ignore));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();
            Error::Walk {
                path,
                message: e.to_string(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_plus_file = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(PLUS_PREFIX));
        if !is_plus_file {
            continue;
        }
        let path_absolute = NormalizedPath::new(entry.path());
        let Some(path_relative) = path_absolute.relative_to(root) else {
            tracing::debug!(path = %path_absolute, "Skipping file outside of the project root");
            continue;
        };
        files.push(FoundFile {
            path_relative,
            path_absolute,
        });
    }

    files.sort_by(|a, b| a.path_relative.cmp(&b.path_relative));
    let elapsed = started.elapsed();
    tracing::debug!(count = files.len(), ?elapsed, root = %root, "Crawled plus files");
    Ok(Discovery { files, elapsed })
}

fn is_ignored(entry: &DirEntry, ignore: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    name.starts_with('.')
        || ALWAYS_IGNORED_DIRS.contains(&name)
        || ignore.iter().any(|dir| dir == name)
}
