//! plusconf CLI
//!
//! Resolves and inspects the configuration of plus-file projects.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(execute_command(cmd))
        }
        None => {
            println!(
                "{} Config resolution for plus-file projects",
                "plusconf".green().bold()
            );
            println!();
            println!("Run {} for available commands.", "plusconf --help".cyan());
            Ok(())
        }
    }
}

/// Warnings always reach stderr; `--verbose` adds the engine's debug logs.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    if initialized.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve { root, json, dev } => commands::run_resolve(&root, json, dev).await,
        Commands::Pages { root } => commands::run_pages(&root).await,
        Commands::Definitions { root } => commands::run_definitions(&root).await,
    }
}
