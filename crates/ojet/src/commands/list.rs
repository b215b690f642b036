//! `list component|pack|platform|plugin`

use anyhow::Result;
use ojet_exchange::{ComponentInstaller, Decision, FixedResolver};
use ojet_tooling::ListKind;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::output;
use crate::router::Invocation;

#[derive(Tabled)]
struct ComponentRow {
    name: String,
    installed: String,
    declared: String,
    #[tabled(rename = "type")]
    kind: String,
}

pub async fn components(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let installer =
        ComponentInstaller::new(project, None, Box::new(FixedResolver(Decision::Cancel)));

    let want_packs = inv.scope == Some("pack");
    let rows: Vec<ComponentRow> = installer
        .list()
        .await?
        .into_iter()
        .filter(|c| !want_packs || c.is_pack)
        .map(|c| ComponentRow {
            name: c.name,
            installed: c.installed_version.unwrap_or_else(|| "missing".to_string()),
            declared: c.declared_version.unwrap_or_else(|| "-".to_string()),
            kind: if c.is_pack { "pack" } else { "component" }.to_string(),
        })
        .collect();

    if rows.is_empty() {
        output::info("No exchange components installed");
        return Ok(());
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}

pub async fn hybrid(ctx: &Context, inv: &Invocation) -> Result<()> {
    let project = ctx.project().await?;
    let kind = match inv.scope {
        Some("plugin") => ListKind::Plugin,
        _ => ListKind::Platform,
    };

    let entries = ctx.hybrid().list(&project, kind).await?;
    if entries.is_empty() {
        output::info(&format!("No {}s installed", kind));
        return Ok(());
    }
    output::header(&format!("Installed {}s", kind));
    for entry in entries {
        println!("  {}", entry);
    }
    Ok(())
}
