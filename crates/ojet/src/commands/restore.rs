//! `restore`: npm packages, exchange components, then Cordova platforms and plugins

use anyhow::{Context as _, Result};
use ojet_exchange::ComponentInstaller;
use ojet_tooling::install_packages;

use super::add::{conflict_resolver, report_install};
use super::Context;
use crate::output;
use crate::router::Invocation;

pub async fn run(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;

    let installer_name = ctx.installer(Some(&project), inv);
    install_packages(ctx.runner.as_ref(), project.root(), &installer_name)
        .await
        .context("Package installation failed")?;

    let project = if project.config().composites.is_empty() {
        project
    } else {
        let client = ctx.exchange_client(&project)?;
        let mut installer = ComponentInstaller::new(project, client, conflict_resolver(inv)?);
        let report = installer.restore().await?;
        report_install(&report)?;
        installer.into_project()
    };

    if project.is_hybrid() {
        ctx.hybrid().prepare(&project).await?;
    }

    output::success("Restore complete");
    Ok(())
}
