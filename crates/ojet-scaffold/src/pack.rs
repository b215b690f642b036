//! `create pack` generator

use crate::engine::{TemplateEngine, TemplateSource};
use crate::error::{Error, Result};
use crate::tokens::TokenSet;
use crate::tsconfig;
use ojet_core::naming::validate_pack_name;
use ojet_core::Project;
use std::path::PathBuf;
use tracing::info;

/// Generate an empty pack under the project's components directory
pub async fn create_pack(project: &Project, name: &str) -> Result<PathBuf> {
    validate_pack_name(name)?;

    let dir = project.components_dir().join(name);
    if tokio::fs::try_exists(&dir).await? {
        return Err(Error::already_exists(name, dir.display().to_string()));
    }

    TemplateEngine::new(TokenSet::for_pack(name))
        .render(&TemplateSource::Embedded("pack".to_string()), &dir)?;
    tsconfig::add_path_mapping(project, name, &dir)?;

    info!("Created pack '{}'", name);
    Ok(dir)
}
