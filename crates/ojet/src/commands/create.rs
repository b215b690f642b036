//! `create app|component|pack|theme`

use anyhow::{Context as _, Result};
use ojet_scaffold::{
    create_app, create_component, create_pack, create_theme, AppOptions, ComponentOptions,
};
use ojet_tooling::install_packages;

use super::Context;
use crate::output;
use crate::router::Invocation;

pub async fn app(ctx: &Context, inv: &Invocation) -> Result<()> {
    let name = inv.required_param("app name")?;
    let target = ctx.cwd.join(name);

    let options = AppOptions {
        template: inv.option("template").unwrap_or("blank").to_string(),
        typescript: inv.flag("typescript"),
        installer: inv.option("installer").map(str::to_string),
    };

    let spinner = output::spinner(&format!("Creating app '{}'...", name));
    let created = create_app(&target, &options).await;
    spinner.finish_and_clear();
    let created = created.with_context(|| format!("Failed to create app '{}'", name))?;

    if inv.flag("skip-install") {
        output::info("Skipping package installation (--skip-install)");
    } else {
        let installer = ctx.installer(Some(&created.project), inv);
        install_packages(ctx.runner.as_ref(), created.root(), &installer)
            .await
            .context("Package installation failed")?;
    }

    output::success(&format!(
        "Created app '{}' in {}",
        created.name,
        created.root().display()
    ));
    output::info(&format!("  cd {} && ojet serve", name));
    Ok(())
}

pub async fn component(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let options = ComponentOptions {
        name: inv.required_param("component name")?.to_string(),
        pack: inv.option("pack").map(str::to_string),
        component_type: inv.option("type").unwrap_or("composite").parse()?,
    };

    let dir = create_component(&project, &options).await?;
    output::success(&format!(
        "Created {} component '{}' in {}",
        options.component_type,
        options.full_name(),
        dir.display()
    ));
    Ok(())
}

pub async fn pack(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let name = inv.required_param("pack name")?;
    let dir = create_pack(&project, name).await?;
    output::success(&format!("Created pack '{}' in {}", name, dir.display()));
    Ok(())
}

pub async fn theme(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let name = inv.required_param("theme name")?;
    let dir = create_theme(&project, name).await?;
    output::success(&format!("Created theme '{}' in {}", name, dir.display()));
    Ok(())
}
