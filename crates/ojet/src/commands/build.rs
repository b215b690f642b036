//! `build` and `serve`, delegated to the tooling package

use anyhow::{Context as _, Result};
use ojet_tooling::{BuildServeDelegate, NodeTooling};

use super::Context;
use crate::output;
use crate::router::Invocation;

fn delegate(ctx: &Context) -> BuildServeDelegate {
    BuildServeDelegate::new(Box::new(NodeTooling::from_settings(
        ctx.runner.clone(),
        &ctx.settings,
    )))
}

pub async fn build(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let component = match inv.scope {
        Some("component") => Some(inv.required_param("component name")?.to_string()),
        _ => None,
    };

    let config = delegate(ctx)
        .build(&project, component, &inv.options)
        .await
        .context("Build failed")?;

    let target = config
        .component
        .as_deref()
        .map(|c| format!("component '{}'", c))
        .unwrap_or_else(|| "app".to_string());
    output::success(&format!(
        "Build of {} for {} ({:?}) finished",
        target, config.platform, config.build_type
    ));
    Ok(())
}

pub async fn serve(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    delegate(ctx)
        .serve(&project, &inv.options)
        .await
        .context("Serve failed")?;
    Ok(())
}
