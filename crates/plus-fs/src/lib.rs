//! Filesystem layer for plus-config
//!
//! Provides normalized paths, the pure scope/route functions of the `+`
//! file convention, crawling for declaration files and module resolution.

pub mod constants;
pub mod discovery;
pub mod error;
pub mod path;
pub mod resolve;
pub mod scope;

pub use discovery::{Discovery, FoundFile, find_plus_files};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use resolve::resolve_module;
