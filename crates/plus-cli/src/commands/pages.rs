//! Pages command implementation

use std::path::Path;

use colored::Colorize;
use plus_core::{ResolveOptions, StaticModuleLoader, Warnings, load_config_data};

use crate::error::Result;

/// Run the pages command
pub async fn run_pages(root: &Path) -> Result<()> {
    let options = ResolveOptions::load(root)?;
    let data = load_config_data(&options, &StaticModuleLoader::new(), &Warnings::new()).await?;

    println!("{}", "Pages".bold());
    println!();
    for page in &data.pages {
        let route = match &page.route_filesystem {
            Some(route) => route.cyan(),
            None => "(error page)".magenta(),
        };
        println!(
            "  {:<24} {:<20} {}",
            page.page_id.green(),
            route,
            page.route_filesystem_defined_by.dimmed()
        );
    }
    println!();
    println!("{} {} pages.", "Total:".dimmed(), data.pages.len());
    Ok(())
}
