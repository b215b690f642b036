//! `create theme` generator (minimal skeleton)

use crate::engine::{TemplateEngine, TemplateSource};
use crate::error::{Error, Result};
use crate::tokens::TokenSet;
use ojet_core::naming::validate_pack_name;
use ojet_core::Project;
use std::path::PathBuf;
use tracing::info;

/// Generate `src/themes/<name>` with a theme.json and an empty variables file
pub async fn create_theme(project: &Project, name: &str) -> Result<PathBuf> {
    validate_pack_name(name)?;

    let dir = project.themes_dir().join(name);
    if tokio::fs::try_exists(&dir).await? {
        return Err(Error::already_exists(name, dir.display().to_string()));
    }

    TemplateEngine::new(TokenSet::for_theme(name))
        .render(&TemplateSource::Embedded("theme".to_string()), &dir)?;

    info!("Created theme '{}'", name);
    Ok(dir)
}
