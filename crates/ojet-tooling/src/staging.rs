//! Removal of generated content (`clean app`, `strip`)

use crate::error::Result;
use ojet_core::Project;
use std::path::Path;
use tracing::{debug, info};

/// Config key that replaces the default strip list
pub const STRIP_LIST_KEY: &str = "stripList";

/// Cordova output directories removed from the hybrid project
const HYBRID_GENERATED: [&str; 3] = ["platforms", "plugins", "www"];

async fn remove_path(path: &Path) -> Result<bool> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(path).await?,
        Ok(_) => tokio::fs::remove_file(path).await?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    }
    debug!("Removed {}", path.display());
    Ok(true)
}

/// Delete the web staging directory; returns whether anything was removed
pub async fn clean_staging(project: &Project) -> Result<bool> {
    let dir = project.staging_web_dir();
    let removed = remove_path(&dir).await?;
    if removed {
        info!("Cleaned {}", dir.display());
    }
    Ok(removed)
}

/// Generated paths under the project's configured staging and exchange directories
pub fn default_strip_list(project: &Project) -> Vec<String> {
    let paths = &project.config().paths;
    let mut list = vec![
        "node_modules".to_string(),
        paths.staging.web.clone(),
        paths.source.exchange_components.clone(),
    ];
    list.extend(
        HYBRID_GENERATED
            .iter()
            .map(|dir| format!("{}/{}", paths.staging.hybrid.trim_end_matches('/'), dir)),
    );
    list
}

/// Entries `strip` removes, relative to the project root
pub fn strip_list(project: &Project) -> Vec<String> {
    match project
        .config()
        .extra
        .get(STRIP_LIST_KEY)
        .and_then(|v| v.as_array())
    {
        Some(list) => list
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        None => default_strip_list(project),
    }
}

/// Remove everything in the strip list; returns the removed entries
pub async fn strip(project: &Project) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for entry in strip_list(project) {
        if remove_path(&project.root().join(&entry)).await? {
            removed.push(entry);
        }
    }
    info!("Stripped {} entries", removed.len());
    Ok(removed)
}
