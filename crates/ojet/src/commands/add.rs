//! `add component|pack|hybrid|platform|plugin`

use anyhow::{anyhow, bail, Result};
use ojet_exchange::{ComponentInstaller, ConflictResolver, Decision, FixedResolver, InstallReport};
use ojet_tooling::Platform;

use super::Context;
use crate::output;
use crate::prompt::TerminalResolver;
use crate::router::Invocation;

/// `--on-conflict` policy, or an interactive prompt
pub fn conflict_resolver(inv: &Invocation) -> Result<Box<dyn ConflictResolver>> {
    match inv.option("on-conflict") {
        Some(policy) => {
            let decision: Decision = policy.parse().map_err(anyhow::Error::msg)?;
            Ok(Box::new(FixedResolver(decision)))
        }
        None => Ok(Box::new(TerminalResolver)),
    }
}

/// Print an install report; failed installs turn into an error
pub fn report_install(report: &InstallReport) -> Result<()> {
    for name in &report.installed {
        output::info(&format!("  installed {}", name));
    }
    for name in &report.skipped {
        output::info(&format!("  {} is already installed", name));
    }
    for name in &report.kept {
        output::info(&format!("  kept local {}", name));
    }
    for failed in &report.failed {
        output::warning(&format!("{}: {}", failed.ident, failed.error));
    }

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} component(s) failed to install",
            report.failed.len()
        ))
    }
}

pub async fn components(ctx: &Context, inv: &Invocation) -> Result<()> {
    if inv.params.is_empty() {
        bail!("Missing component name for 'add {}'", inv.scope.unwrap_or_default());
    }
    let project = ctx.project().await?;
    let client = ctx.exchange_client(&project)?;
    let mut installer = ComponentInstaller::new(project, client, conflict_resolver(inv)?);

    let report = installer.add(&inv.params).await?;
    report_install(&report)?;
    output::success(&format!(
        "Added {}",
        inv.params.join(", ")
    ));
    Ok(())
}

/// Parse a comma- or space-separated platform list
pub fn parse_platforms<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<Vec<Platform>> {
    let mut platforms = Vec::new();
    for value in values {
        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let platform: Platform = part.parse()?;
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
    }
    Ok(platforms)
}

/// `org.oraclejet.<name without separators>`
fn default_app_id(app_name: &str) -> String {
    let suffix: String = app_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    format!("org.oraclejet.{}", suffix)
}

pub async fn hybrid(ctx: &Context, inv: &Invocation) -> Result<()> {
    let mut project = ctx.project().await?;
    let dir_name = project
        .root()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string());

    let app_name = inv.option("appname").unwrap_or(&dir_name).to_string();
    let app_id = inv
        .option("appid")
        .map(str::to_string)
        .unwrap_or_else(|| default_app_id(&app_name));
    let platforms = parse_platforms(inv.option("platforms"))?;

    ctx.hybrid()
        .add_hybrid(&mut project, &app_id, &app_name, &platforms)
        .await?;
    output::success(&format!("Added hybrid support ({})", app_id));
    Ok(())
}

pub async fn platforms(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let platforms = parse_platforms(inv.params.iter().map(String::as_str))?;
    if platforms.is_empty() {
        bail!("Missing platform for 'add platform'");
    }
    ctx.hybrid().add_platforms(&project, &platforms).await?;
    output::success("Platforms added");
    Ok(())
}

pub async fn plugins(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    if inv.params.is_empty() {
        bail!("Missing plugin for 'add plugin'");
    }
    ctx.hybrid().add_plugins(&project, &inv.params).await?;
    output::success("Plugins added");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platforms_dedupes() {
        let platforms = parse_platforms(["android,ios", "android"]).unwrap();
        assert_eq!(platforms, vec![Platform::Android, Platform::Ios]);
        assert!(parse_platforms(["blackberry"]).is_err());
        assert!(parse_platforms(None).unwrap().is_empty());
    }

    #[test]
    fn test_default_app_id() {
        assert_eq!(default_app_id("My-App 2"), "org.oraclejet.myapp2");
    }
}
