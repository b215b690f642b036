//! `package component|pack <name>...`

use anyhow::{bail, Context as _, Result};
use ojet_exchange::{archive, ComponentIdent};

use super::Context;
use crate::output;
use crate::router::Invocation;

/// Output directory for packaged components, relative to the app root
pub const DIST_DIR: &str = "dist";

pub async fn run(ctx: &Context, inv: &Invocation) -> Result<()> {
    if inv.params.is_empty() {
        bail!("Missing component name for 'package {}'", inv.scope.unwrap_or_default());
    }
    let project = ctx.project().await?;
    let out_dir = project.root().join(DIST_DIR);

    for name in &inv.params {
        ComponentIdent::validate_name(name)?;
        let dir = project.components_dir().join(name);
        if !dir.is_dir() {
            bail!("Component '{}' not found in {}", name, project.components_dir().display());
        }
        let path = archive::package(&dir, &out_dir)
            .await
            .with_context(|| format!("Failed to package '{}'", name))?;
        output::success(&format!("Packaged {} to {}", name, path.display()));
    }
    Ok(())
}
