//! Definitions command implementation

use std::path::Path;

use colored::Colorize;
use plus_core::{ResolveOptions, StaticModuleLoader, Warnings, load_root_definitions};
use plus_meta::{ConfigDefinition, DefinitionTable};

use crate::error::Result;

/// Run the definitions command
pub async fn run_definitions(root: &Path) -> Result<()> {
    let options = ResolveOptions::load(root)?;
    let definitions =
        load_root_definitions(&options, &StaticModuleLoader::new(), &Warnings::new()).await?;

    println!("{}", "Page Configs".bold());
    for (name, definition) in definitions.iter() {
        print_definition(name, definition);
    }
    println!();

    println!("{}", "Global Configs".bold());
    for (name, definition) in DefinitionTable::globals().iter() {
        print_definition(name, definition);
    }
    Ok(())
}

fn print_definition(name: &str, definition: &ConfigDefinition) {
    let mut traits = Vec::new();
    if definition.requires_code_file {
        traits.push("code file");
    }
    if definition.effect.is_some() {
        traits.push("effect");
    }
    if definition.validate.is_some() {
        traits.push("validated");
    }
    println!(
        "  {:<20} {:<18} {}",
        name.green(),
        definition.env.as_str().cyan(),
        traits.join(", ").dimmed()
    );
}
