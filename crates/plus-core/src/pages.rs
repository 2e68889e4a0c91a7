//! Page identity: which directories define pages, and their routes.

use std::collections::BTreeMap;

use plus_fs::scope::{is_error_page, page_id, route_from_filesystem};
use plus_meta::is_page_defining;
use serde::Serialize;

use crate::collect::{ConfigFile, ValueFile};
use crate::{Error, Result};

/// A page found in the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageIdentity {
    pub page_id: String,
    pub route_filesystem: String,
    /// The file that first established `route_filesystem`
    pub route_filesystem_defined_by: String,
    /// The grouped declaration file living at the page's own directory
    pub config_file: Option<String>,
}

impl PageIdentity {
    pub fn is_error_page(&self) -> bool {
        is_error_page(&self.route_filesystem)
    }
}

/// Enumerate pages from the files that set a page-defining config.
///
/// Pages are deduplicated by id and returned sorted by id.
pub fn determine_pages(
    config_files: &[ConfigFile],
    value_files: &[ValueFile],
) -> Result<Vec<PageIdentity>> {
    let mut pages: BTreeMap<String, PageIdentity> = BTreeMap::new();

    let defining_value_files = value_files
        .iter()
        .filter(|file| is_page_defining(&file.config_name))
        .map(|file| file.file_path.as_str());
    let defining_config_files = config_files
        .iter()
        .filter(|file| file.config_names().any(is_page_defining))
        .map(|file| file.file_path.as_str());

    for file_path in defining_value_files.chain(defining_config_files) {
        let id = page_id(file_path);
        let route = route_from_filesystem(file_path);

        if let Some(existing) = pages.get(&id) {
            if existing.route_filesystem != route {
                return Err(Error::internal(format!(
                    "page {id} has the route {} according to {} but {route} according to {file_path}",
                    existing.route_filesystem, existing.route_filesystem_defined_by
                )));
            }
            continue;
        }

        let config_file = config_files
            .iter()
            .find(|file| page_id(&file.file_path) == id)
            .map(|file| file.file_path.clone());
        tracing::debug!(page_id = %id, route = %route, defined_by = file_path, "Found page");
        pages.insert(
            id.clone(),
            PageIdentity {
                page_id: id,
                route_filesystem: route,
                route_filesystem_defined_by: file_path.to_string(),
                config_file,
            },
        );
    }

    Ok(pages.into_values().collect())
}
