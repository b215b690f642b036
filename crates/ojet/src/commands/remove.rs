//! `remove component|pack|platform|plugin`

use anyhow::{bail, Result};
use ojet_exchange::{ComponentInstaller, FixedResolver, Decision};

use super::add::parse_platforms;
use super::Context;
use crate::output;
use crate::router::Invocation;

pub async fn components(ctx: &Context, inv: &Invocation) -> Result<()> {
    if inv.params.is_empty() {
        bail!("Missing component name for 'remove {}'", inv.scope.unwrap_or_default());
    }
    let project = ctx.project().await?;
    // Removal never downloads, so neither a client nor a prompt is needed
    let mut installer =
        ComponentInstaller::new(project, None, Box::new(FixedResolver(Decision::Cancel)));

    let report = installer.remove(&inv.params).await?;
    for name in &report.not_found {
        output::warning(&format!("Component '{}' is not installed", name));
    }
    if !report.removed.is_empty() {
        output::success(&format!("Removed {}", report.removed.join(", ")));
    }
    Ok(())
}

pub async fn platforms(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let platforms = parse_platforms(inv.params.iter().map(String::as_str))?;
    if platforms.is_empty() {
        bail!("Missing platform for 'remove platform'");
    }
    ctx.hybrid().remove_platforms(&project, &platforms).await?;
    output::success("Platforms removed");
    Ok(())
}

pub async fn plugins(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    if inv.params.is_empty() {
        bail!("Missing plugin for 'remove plugin'");
    }
    ctx.hybrid().remove_plugins(&project, &inv.params).await?;
    output::success("Plugins removed");
    Ok(())
}
