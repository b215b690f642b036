//! `configure --exchange-url=<url>`

use anyhow::{bail, Context as _, Result};
use url::Url;

use super::Context;
use crate::output;
use crate::router::Invocation;

pub async fn run(ctx: &Context, inv: &Invocation) -> Result<()> {
    let Some(raw) = inv.option("exchange-url") else {
        bail!("Nothing to configure. Usage: ojet configure --exchange-url=<url>");
    };

    let url = Url::parse(raw).with_context(|| format!("Invalid exchange URL '{}'", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Exchange URL must use http or https: {}", raw);
    }

    let mut project = ctx.project().await?;
    project.config_mut().exchange_url = Some(raw.to_string());
    project.save().await?;

    output::success(&format!("Exchange URL set to {}", raw));
    Ok(())
}
