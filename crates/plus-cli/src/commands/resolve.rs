//! Resolve command implementation

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use plus_core::{ConfigData, ConfigDataCache, ConfigElement, ConfigValue, ResolveOptions, StaticModuleLoader};

use crate::error::Result;

/// Run the resolve command
pub async fn run_resolve(root: &Path, json: bool, dev: bool) -> Result<()> {
    let options = ResolveOptions::load(root)?.dev(dev);
    let cache = ConfigDataCache::new(options, Arc::new(StaticModuleLoader::new()));
    let data = cache.get(false).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*data)?);
    } else {
        print_config_data(&data);
    }
    Ok(())
}

fn print_config_data(data: &ConfigData) {
    if data.pages.is_empty() {
        println!("{}", "No pages found".yellow());
        println!();
        println!(
            "Add a {} file to a directory to define a page.",
            "+config.json".cyan()
        );
    }

    for page in &data.pages {
        let route = match &page.route_filesystem {
            Some(route) => route.cyan(),
            None => "(error page)".magenta(),
        };
        println!("{} {}", page.page_id.bold(), route);
        if !page.config_files.is_empty() {
            println!("  {} {}", "from".dimmed(), page.config_files.join(", ").dimmed());
        }
        for (name, element) in &page.elements {
            print_element(name, element);
        }
        println!();
    }

    let hooks = [
        ("onBeforeRoute", &data.global.on_before_route),
        ("onPrerenderStart", &data.global.on_prerender_start),
    ];
    if hooks.iter().any(|(_, element)| element.is_some()) || !data.project_settings.is_empty() {
        println!("{}", "Global".bold());
        for (name, element) in hooks {
            if let Some(element) = element {
                print_element(name, element);
            }
        }
        for (name, value) in &data.project_settings {
            println!("  {:<20} {}", name.green(), value);
        }
    }
}

fn print_element(name: &str, element: &ConfigElement) {
    let value = match &element.value {
        ConfigValue::Literal { value } => value.to_string(),
        ConfigValue::CodeReference {
            module_path,
            export_name,
        } => format!("import {{ {export_name} }} from '{module_path}'"),
    };
    println!(
        "  {:<20} {} {} {}",
        name.green(),
        value,
        format!("[{}]", element.env.as_str()).dimmed(),
        element.defined_at.dimmed()
    );
}
