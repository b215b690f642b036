//! CLI command implementations

mod add;
mod build;
mod clean;
mod configure;
mod context;
mod create;
mod help;
mod list;
mod migrate;
mod package;
mod publish;
mod remove;
mod restore;
mod search;

use crate::router::{self, Invocation};
use anyhow::{bail, Result};
use tracing::debug;

pub use context::Context;

/// Route raw arguments to the matching handler
pub async fn run(args: Vec<String>) -> Result<()> {
    let invocation = router::parse(&args)?;
    debug!("Routing {:?}", invocation);

    if invocation.task == "help" {
        return help::run(&invocation);
    }

    let ctx = Context::load()?;
    dispatch(&ctx, &invocation).await
}

async fn dispatch(ctx: &Context, inv: &Invocation) -> Result<()> {
    match (inv.task, inv.scope.unwrap_or_default()) {
        ("create", "app") => create::app(ctx, inv).await,
        ("create", "component") => create::component(ctx, inv).await,
        ("create", "pack") => create::pack(ctx, inv).await,
        ("create", "theme") => create::theme(ctx, inv).await,

        ("add", "component" | "pack") => add::components(ctx, inv).await,
        ("add", "hybrid") => add::hybrid(ctx, inv).await,
        ("add", "platform") => add::platforms(ctx, inv).await,
        ("add", "plugin") => add::plugins(ctx, inv).await,

        ("remove", "component" | "pack") => remove::components(ctx, inv).await,
        ("remove", "platform") => remove::platforms(ctx, inv).await,
        ("remove", "plugin") => remove::plugins(ctx, inv).await,

        ("build", _) => build::build(ctx, inv).await,
        ("serve", _) => build::serve(ctx, inv).await,

        ("list", "component" | "pack") => list::components(ctx, inv).await,
        ("list", "platform" | "plugin") => list::hybrid(ctx, inv).await,

        ("publish", _) => publish::publish(ctx, inv).await,
        ("label", _) => publish::label(ctx, inv).await,
        ("search", _) => search::run(ctx, inv).await,
        ("package", _) => package::run(ctx, inv).await,
        ("restore", _) => restore::run(ctx, inv).await,
        ("configure", _) => configure::run(ctx, inv).await,

        ("clean", "app") => clean::app(ctx).await,
        ("clean", "platform") => clean::platform(ctx, inv).await,
        ("strip", _) => clean::strip(ctx).await,

        ("migrate", _) => migrate::run(ctx).await,

        (task, scope) => bail!("No handler for '{} {}'", task, scope),
    }
}
