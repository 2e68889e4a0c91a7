//! One resolution pass over a project
//!
//! A pass crawls the project, loads the declaration files, resolves the
//! globals, enumerates pages and resolves every config of every page.
//! Nothing is reused between passes; see [`crate::cache`] for reuse.

use plus_fs::resolve::canonical;
use plus_fs::scope::{applies_to, is_root_scope};
use plus_fs::{FoundFile, NormalizedPath};
use plus_meta::{DefinitionTable, assert_config_name, is_global};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::collect::{ConfigFile, PlusFiles, ValueFile, load_config_files, load_value_files, meta_sources};
use crate::effects::{ConfigElements, apply_effects};
use crate::globals::{PageConfigGlobal, resolve_globals};
use crate::loader::ModuleLoader;
use crate::pages::{PageIdentity, determine_pages};
use crate::resolve::resolve_config_element;
use crate::settings::ResolveOptions;
use crate::warning::Warnings;
use crate::{Error, Result};

/// Dedup key of the slow crawl warning
pub const SLOW_CRAWL_WARNING: &str = "slow-plus-files-search";

/// Resolved configuration of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageConfigData {
    pub page_id: String,
    pub is_error_page: bool,
    /// `None` for error pages
    pub route_filesystem: Option<String>,
    pub route_filesystem_defined_by: String,
    /// Grouped declaration files applying to the page, in discovery order
    pub config_files: Vec<String>,
    pub elements: ConfigElements,
}

/// Output of a resolution pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigData {
    pub pages: Vec<PageConfigData>,
    pub global: PageConfigGlobal,
    /// Literal global values not tied to any page
    pub project_settings: Map<String, Value>,
}

impl ConfigData {
    pub fn page(&self, page_id: &str) -> Option<&PageConfigData> {
        self.pages.iter().find(|page| page.page_id == page_id)
    }
}

/// Run one resolution pass.
///
/// Outside dev mode a failure is logged before it is returned, so that a
/// build prints it even when the caller only looks at the exit status.
pub async fn load_config_data(
    options: &ResolveOptions,
    loader: &dyn ModuleLoader,
    warnings: &Warnings,
) -> Result<ConfigData> {
    let result = resolve_project(options, loader, warnings).await;
    if let Err(err) = &result {
        if options.is_dev {
            tracing::debug!(error = %err, "Resolution failed");
        } else {
            tracing::error!("{}", err);
        }
    }
    result
}

/// Definitions in effect at the project root: built-ins plus root `meta`.
pub async fn load_root_definitions(
    options: &ResolveOptions,
    loader: &dyn ModuleLoader,
    warnings: &Warnings,
) -> Result<DefinitionTable> {
    let root = canonical(options.root.clone());
    let files = find_plus_files(&root, options, warnings).await?;
    let config_files = load_config_files(&PlusFiles::partition(files).grouped, loader).await?;
    let root_files = config_files
        .iter()
        .filter(|file| is_root_scope(&file.file_path));
    Ok(DefinitionTable::build(meta_sources(root_files))?)
}

/// Crawl the project and append extension files.
pub async fn find_plus_files(
    root: &NormalizedPath,
    options: &ResolveOptions,
    warnings: &Warnings,
) -> Result<Vec<FoundFile>> {
    let crawl_root = root.clone();
    let ignore = options.settings.ignore.clone();
    let discovery = tokio::task::spawn_blocking(move || plus_fs::find_plus_files(&crawl_root, &ignore))
        .await
        .map_err(|e| Error::internal(format!("file discovery task failed: {e}")))??;

    if options.is_dev && discovery.elapsed > options.settings.slow_crawl_threshold() {
        warnings.warn_once(
            SLOW_CRAWL_WARNING,
            format!(
                "Crawling your + files took an unexpected long time ({}ms); consider adding large directories to `ignore` in plusconf.toml",
                discovery.elapsed.as_millis()
            ),
        );
    }

    let mut files = discovery.files;
    for extension in options.all_extensions() {
        files.extend(extension.plus_files());
    }
    Ok(files)
}

async fn resolve_project(
    options: &ResolveOptions,
    loader: &dyn ModuleLoader,
    warnings: &Warnings,
) -> Result<ConfigData> {
    let root = canonical(options.root.clone());
    let files = PlusFiles::partition(find_plus_files(&root, options, warnings).await?);
    tracing::debug!(
        root = %root,
        grouped = files.grouped.len(),
        value_files = files.value_files.len(),
        "Found plus files"
    );

    let config_files = load_config_files(&files.grouped, loader).await?;
    let value_files = {
        let definitions = DefinitionTable::build(meta_sources(&config_files))?;
        load_value_files(&files.value_files, &definitions, &DefinitionTable::globals(), loader).await?
    };

    let global = resolve_globals(&config_files, &value_files, &root, warnings)?;

    let pages = determine_pages(&config_files, &value_files)?
        .iter()
        .map(|page| resolve_page(page, &config_files, &value_files, &root))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(pages = pages.len(), "Resolved config data");
    Ok(ConfigData {
        pages,
        global: global.hooks,
        project_settings: global.settings,
    })
}

fn resolve_page(
    page: &PageIdentity,
    config_files: &[ConfigFile],
    value_files: &[ValueFile],
    root: &NormalizedPath,
) -> Result<PageConfigData> {
    let relevant_config_files: Vec<&ConfigFile> = config_files
        .iter()
        .filter(|file| applies_to(&file.scope(), &page.page_id))
        .collect();
    let relevant_value_files: Vec<&ValueFile> = value_files
        .iter()
        .filter(|file| applies_to(&file.scope(), &page.page_id))
        .filter(|file| !is_global(&file.config_name))
        .collect();

    let definitions = DefinitionTable::build(meta_sources(relevant_config_files.iter().copied()))?;
    let globals = DefinitionTable::globals();
    let known = definitions.names().chain(globals.names());
    for file in &relevant_config_files {
        for name in file.config_names() {
            assert_config_name(name, known.clone(), &file.file_path)?;
        }
    }
    for file in &relevant_value_files {
        assert_config_name(&file.config_name, known.clone(), &file.file_path)?;
    }

    let mut elements = ConfigElements::new();
    for (name, definition) in definitions.iter() {
        let element = resolve_config_element(
            name,
            definition,
            &relevant_config_files,
            &relevant_value_files,
            root,
        )?;
        if let Some(element) = element {
            elements.insert(name.to_string(), element);
        }
    }
    let elements = apply_effects(&elements, &definitions)?;

    let is_error_page = page.is_error_page();
    tracing::debug!(page_id = %page.page_id, configs = elements.len(), is_error_page, "Resolved page");
    Ok(PageConfigData {
        page_id: page.page_id.clone(),
        is_error_page,
        route_filesystem: (!is_error_page).then(|| page.route_filesystem.clone()),
        route_filesystem_defined_by: page.route_filesystem_defined_by.clone(),
        config_files: relevant_config_files
            .iter()
            .map(|file| file.file_path.clone())
            .collect(),
        elements,
    })
}
