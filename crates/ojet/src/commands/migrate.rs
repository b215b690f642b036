//! `migrate`: bring an older oraclejetconfig.json up to the current layout

use anyhow::{bail, Result};
use ojet_core::ProjectConfig;
use semver::Version;

use super::Context;
use crate::output;

/// Key older generators used for the exchange URL
const LEGACY_EXCHANGE_KEY: &str = "exchangeUrl";

/// Apply migrations in place and describe what changed
pub fn migrate_config(config: &mut ProjectConfig) -> Vec<String> {
    let mut changes = Vec::new();

    if let Some(value) = config.extra.remove(LEGACY_EXCHANGE_KEY) {
        match value.as_str() {
            Some(url) if config.exchange_url.is_none() => {
                config.exchange_url = Some(url.to_string());
                changes.push(format!("renamed '{}' to 'exchange-url'", LEGACY_EXCHANGE_KEY));
            }
            _ => changes.push(format!("dropped obsolete '{}'", LEGACY_EXCHANGE_KEY)),
        }
    }

    let current = env!("CARGO_PKG_VERSION");
    if config.generator_version.as_deref() != Some(current) {
        changes.push(format!(
            "generatorVersion {} -> {}",
            config.generator_version.as_deref().unwrap_or("unset"),
            current
        ));
        config.generator_version = Some(current.to_string());
    }

    changes
}

/// Whether `recorded` comes from a newer generator than this binary
pub fn written_by_newer(recorded: Option<&str>) -> bool {
    let current = Version::parse(env!("CARGO_PKG_VERSION"));
    match (recorded.map(Version::parse), current) {
        (Some(Ok(recorded)), Ok(current)) => recorded > current,
        _ => false,
    }
}

pub async fn run(ctx: &Context) -> Result<()> {
    let mut project = ctx.project().await?;
    if written_by_newer(project.config().generator_version.as_deref()) {
        bail!(
            "oraclejetconfig.json was written by ojet {}, newer than this version ({})",
            project.config().generator_version.as_deref().unwrap_or_default(),
            env!("CARGO_PKG_VERSION")
        );
    }
    let changes = migrate_config(project.config_mut());
    // Saving also writes any path defaults the old file was missing
    project.save().await?;

    if changes.is_empty() {
        output::success("oraclejetconfig.json is up to date");
    } else {
        for change in &changes {
            output::info(&format!("  {}", change));
        }
        output::success("Migrated oraclejetconfig.json");
    }
    Ok(())
}
