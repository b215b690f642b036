//! `search exchange <keyword>`

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::output;
use crate::router::Invocation;

#[derive(Tabled)]
struct SearchRow {
    name: String,
    version: String,
    #[tabled(rename = "display name")]
    display_name: String,
    description: String,
}

pub async fn run(ctx: &Context, inv: &Invocation) -> Result<()> {
    let keyword = inv.required_param("search keyword")?;
    let project = ctx.project_or_default().await?;
    let client = ctx.require_exchange_client(&project)?;

    let spinner = output::spinner(&format!("Searching for '{}'...", keyword));
    let results = client.search(keyword).await;
    spinner.finish_and_clear();
    let results = results?;

    if results.is_empty() {
        output::info(&format!("No components match '{}'", keyword));
        return Ok(());
    }

    let rows: Vec<SearchRow> = results
        .into_iter()
        .map(|c| SearchRow {
            name: c.name,
            version: c.version,
            display_name: c.display_name.unwrap_or_default(),
            description: c.description.unwrap_or_default(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    Ok(())
}
