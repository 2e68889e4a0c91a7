//! Scope and page identity derived from root-relative file paths.
//!
//! All functions here are pure: they operate on root-relative,
//! forward-slash paths such as `/pages/about/+config.js` and never touch
//! the filesystem.
//!
//! A file's *scope* is the directory it governs. It is the file's
//! directory with any `renderer` segment removed, so that
//! `/pages/about/renderer/+onRenderHtml.js` governs `/pages/about`.

use crate::constants::{
    ERROR_PAGE_MARKER, GROUPED_CONFIG_NAME, PLUS_PREFIX, RENDERER_DIR, ROUTE_GROUP_PREFIX,
    ROUTE_IGNORED_DIRS,
};

/// The directory governed by the file at `file_path`.
///
/// ```
/// use plus_fs::scope::scope_of;
///
/// assert_eq!(scope_of("/pages/about/+config.js"), "/pages/about");
/// assert_eq!(scope_of("/renderer/+onRenderHtml.js"), "/");
/// ```
pub fn scope_of(file_path: &str) -> String {
    let dir = match file_path.rfind('/') {
        Some(idx) => &file_path[..idx],
        None => "",
    };
    let segments: Vec<&str> = dir
        .split('/')
        .filter(|s| !s.is_empty() && *s != RENDERER_DIR)
        .collect();
    format!("/{}", segments.join("/"))
}

/// Whether a declaration scoped at `scope` applies to the page living in
/// `page_dir`, i.e. `page_dir` equals `scope` or is one of its descendants.
pub fn applies_to(scope: &str, page_dir: &str) -> bool {
    if scope == "/" {
        return true;
    }
    match page_dir.strip_prefix(scope) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Number of segments in `scope`; deeper scopes are more specific.
pub fn specificity(scope: &str) -> usize {
    scope.split('/').filter(|s| !s.is_empty()).count()
}

/// Identity of the page defined by `file_path`.
///
/// Every declaration and value file in the same directory (or its
/// `renderer/` subdirectory) maps to the same id.
pub fn page_id(file_path: &str) -> String {
    scope_of(file_path)
}

/// URL-style route derived from the directory structure.
///
/// Segments named `pages`, `src` or `index` and route groups such as
/// `(marketing)` are dropped.
///
/// ```
/// use plus_fs::scope::route_from_filesystem;
///
/// assert_eq!(route_from_filesystem("/pages/(marketing)/about/+Page.js"), "/about");
/// assert_eq!(route_from_filesystem("/pages/+config.js"), "/");
/// ```
pub fn route_from_filesystem(file_path: &str) -> String {
    let dir = page_id(file_path);
    let segments: Vec<&str> = dir
        .split('/')
        .filter(|s| !s.is_empty())
        .filter(|s| !ROUTE_IGNORED_DIRS.contains(s))
        .filter(|s| !s.starts_with(ROUTE_GROUP_PREFIX))
        .collect();
    format!("/{}", segments.join("/"))
}

/// Whether `route` designates an error page.
pub fn is_error_page(route: &str) -> bool {
    route.split('/').any(|segment| segment == ERROR_PAGE_MARKER)
}

/// Whether the file lives at project-root scope: its filesystem route is `/`.
pub fn is_root_scope(file_path: &str) -> bool {
    route_from_filesystem(file_path) == "/"
}

/// The config name encoded in a `+` file name: `+title.server.js` -> `title`.
///
/// Returns `None` when the file name does not start with `+`.
pub fn config_name_of(file_path: &str) -> Option<&str> {
    let file_name = file_path.rsplit('/').next()?;
    let stem = file_name.split('.').next()?;
    stem.strip_prefix(PLUS_PREFIX)
}

/// Whether the file is a grouped declaration file (`+config.*`).
pub fn is_grouped_declaration(file_path: &str) -> bool {
    config_name_of(file_path) == Some(GROUPED_CONFIG_NAME)
}
