//! Reserved file and directory names of the `+` file convention.

/// Prefix shared by every declaration file (`+config.js`, `+Page.tsx`, ...).
pub const PLUS_PREFIX: char = '+';

/// Config name carried by grouped declaration files (`+config.*`).
pub const GROUPED_CONFIG_NAME: &str = "config";

/// Directory that governs its parent directory instead of itself.
pub const RENDERER_DIR: &str = "renderer";

/// Route segment that marks an error page.
pub const ERROR_PAGE_MARKER: &str = "_error";

/// Prefix of route-group directories (`(marketing)`), which never appear in routes.
pub const ROUTE_GROUP_PREFIX: char = '(';

/// Directories that organise files without contributing a route segment.
pub const ROUTE_IGNORED_DIRS: &[&str] = &["pages", "src", "index"];

/// Directories never crawled for declaration files.
pub const ALWAYS_IGNORED_DIRS: &[&str] = &["node_modules"];

/// Extensions probed, in order, when resolving an import specifier.
pub const MODULE_EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "mjs", "cjs", "vue", "svelte", "md", "mdx", "json",
];
