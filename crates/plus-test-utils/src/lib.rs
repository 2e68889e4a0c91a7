//! Shared test utilities for the plus-config workspace.
//!
//! This crate provides project fixtures for crate test suites. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder laying out `+` files in a tempdir

pub mod project;

pub use project::TestProject;
