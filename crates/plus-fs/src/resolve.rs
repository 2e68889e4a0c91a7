//! Module path resolution with implicit extension probing.

use crate::NormalizedPath;
use crate::constants::MODULE_EXTENSIONS;

/// Resolve `specifier` against `base_dir` the way a bundler would.
///
/// Probes, in order: the exact path, the path with each of
/// [`MODULE_EXTENSIONS`] appended, and `index.<ext>` inside the path
/// when it is a directory. Returns `None` when nothing matches.
pub fn resolve_module(base_dir: &NormalizedPath, specifier: &str) -> Option<NormalizedPath> {
    let candidate = base_dir.join(specifier);
    if candidate.is_file() {
        return Some(canonical(candidate));
    }

    for ext in MODULE_EXTENSIONS {
        let with_ext = NormalizedPath::new(format!("{}.{}", candidate.as_str(), ext));
        if with_ext.is_file() {
            return Some(canonical(with_ext));
        }
    }

    if candidate.is_dir() {
        for ext in MODULE_EXTENSIONS {
            let index = candidate.join(&format!("index.{ext}"));
            if index.is_file() {
                return Some(canonical(index));
            }
        }
    }

    tracing::trace!(base = %base_dir, specifier, "Module not found");
    None
}

/// Canonicalize without UNC prefixes on Windows, keeping the input when
/// canonicalization fails.
pub fn canonical(path: NormalizedPath) -> NormalizedPath {
    match dunce::canonicalize(path.to_native()) {
        Ok(resolved) => NormalizedPath::new(resolved),
        Err(_) => path,
    }
}
