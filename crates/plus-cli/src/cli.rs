//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// plusconf - Resolve the configuration of plus-file projects
#[derive(Parser, Debug)]
#[command(name = "plusconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the configuration of every page
    ///
    /// Examples:
    ///   plusconf resolve                 # Resolve the current directory
    ///   plusconf resolve my-app --json   # Print the full result as JSON
    Resolve {
        /// Project root
        #[arg(default_value = ".", env = "PLUSCONF_ROOT")]
        root: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Resolve in dev mode (failures are not logged as build errors)
        #[arg(long)]
        dev: bool,
    },

    /// List the pages of a project and their filesystem routes
    Pages {
        /// Project root
        #[arg(default_value = ".", env = "PLUSCONF_ROOT")]
        root: PathBuf,
    },

    /// List the config definitions in effect at the project root
    Definitions {
        /// Project root
        #[arg(default_value = ".", env = "PLUSCONF_ROOT")]
        root: PathBuf,
    },
}
