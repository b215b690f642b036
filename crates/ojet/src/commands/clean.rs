//! `clean app|platform` and `strip`

use anyhow::{bail, Result};
use ojet_tooling::staging;
use ojet_tooling::Platform;

use super::Context;
use crate::output;
use crate::router::Invocation;

pub async fn app(ctx: &Context) -> Result<()> {
    let project = ctx.project().await?;
    if staging::clean_staging(&project).await? {
        output::success("Removed build output");
    } else {
        output::info("Nothing to clean");
    }
    Ok(())
}

pub async fn platform(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let Some(name) = inv.params.first() else {
        bail!("Missing platform for 'clean platform'");
    };
    let platform: Platform = name.parse()?;
    ctx.hybrid().clean(&project, platform).await?;
    output::success(&format!("Cleaned {}", platform));
    Ok(())
}

pub async fn strip(ctx: &Context) -> Result<()> {
    let project = ctx.project().await?;
    let removed = staging::strip(&project).await?;
    if removed.is_empty() {
        output::info("Nothing to strip");
    } else {
        output::success(&format!("Removed {}", removed.join(", ")));
    }
    Ok(())
}
