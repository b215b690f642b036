//! `publish` and `label`

use anyhow::{bail, Context as _, Result};
use ojet_exchange::{label_component, publish_component, ComponentIdent};

use super::Context;
use crate::output;
use crate::router::Invocation;

pub async fn publish(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let name = inv.required_param("component name")?;
    let client = ctx.require_exchange_client(&project)?;
    ComponentIdent::validate_name(name)?;
    let credentials = ctx.credentials(inv)?;

    let dir = project.components_dir().join(name);
    let spinner = output::spinner(&format!("Publishing {}...", name));
    let published = publish_component(&client, &dir, &credentials).await;
    spinner.finish_and_clear();
    let published = published.with_context(|| format!("Failed to publish '{}'", name))?;

    output::success(&format!(
        "Published {}@{} ({})",
        published.name, published.version, published.file_name
    ));
    Ok(())
}

pub async fn label(ctx: &Context, inv: &Invocation) -> Result<()> {
    let [ident, label] = inv.params.as_slice() else {
        bail!("Usage: ojet label {} <name@version> <label>", inv.scope.unwrap_or_default());
    };
    let ident = ComponentIdent::parse(ident)?;
    let Some(version) = ident.version.as_deref() else {
        bail!("A version is required to label '{}', e.g. {}@1.0.0", ident.name, ident.name);
    };

    let project = ctx.project_or_default().await?;
    let client = ctx.require_exchange_client(&project)?;
    let credentials = ctx.credentials(inv)?;

    label_component(&client, &credentials, &ident.name, version, label).await?;
    output::success(&format!("Labelled {} as '{}'", ident, label));
    Ok(())
}
