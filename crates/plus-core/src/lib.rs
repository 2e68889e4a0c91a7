//! Config resolution engine for plus-file projects
//!
//! Given a project whose configuration is scattered across directory-scoped
//! `+config.*` and `+<name>.*` files, this crate computes the final
//! configuration of every page:
//!
//! - **Collection**: crawl, load grouped declarations concurrently, load
//!   value files consumed at resolution time
//! - **Definitions**: built-ins extended by `meta` declarations
//! - **Resolution**: the deepest declaration wins; equal depth is an error
//! - **Effects**: one config rewriting others, in a single pass
//! - **Globals**: root-only configs stored outside pages
//! - **Caching**: a generation cache sharing in-flight passes
//!
//! # Architecture
//!
//! ```text
//!              plus-cli
//!                 |
//!             plus-core
//!                 |
//!         +-------+-------+
//!         |               |
//!      plus-fs        plus-meta
//! ```
//!
//! # Example
//!
//! ```no_run
//! use plus_core::{ResolveOptions, StaticModuleLoader, Warnings, load_config_data};
//!
//! # async fn example() -> plus_core::Result<()> {
//! let options = ResolveOptions::load("/path/to/project")?;
//! let data = load_config_data(&options, &StaticModuleLoader::new(), &Warnings::new()).await?;
//! for page in &data.pages {
//!     println!("{} -> {:?}", page.page_id, page.route_filesystem);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod collect;
pub mod effects;
pub mod engine;
pub mod error;
pub mod globals;
pub mod loader;
pub mod pages;
pub mod reference;
pub mod resolve;
pub mod settings;
pub mod warning;

pub use cache::{ConfigDataCache, SharedResult};
pub use collect::{ConfigFile, PlusFiles, ValueFile};
pub use effects::{ConfigElements, apply_effects};
pub use engine::{ConfigData, PageConfigData, load_config_data, load_root_definitions};
pub use error::{Error, Result};
pub use globals::{GlobalConfig, PageConfigGlobal};
pub use loader::{FileExports, ModuleLoader, StaticModuleLoader};
pub use pages::{PageIdentity, determine_pages};
pub use resolve::{ConfigElement, ConfigValue, resolve_config_element};
pub use settings::{Extension, ExtensionConfigFile, ProjectSettings, ResolveOptions};
pub use warning::Warnings;
