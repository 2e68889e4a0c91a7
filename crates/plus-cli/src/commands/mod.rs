//! Command implementations for plus-cli

pub mod definitions;
pub mod pages;
pub mod resolve;

pub use definitions::run_definitions;
pub use pages::run_pages;
pub use resolve::run_resolve;
