//! Run command implementation - force a single migration

use anyhow::{Context, Result};
use wp_core::{find_by_id, Direction, Engine};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{print_status, report_step};
use crate::context::RuntimeContext;

/// Parse a `<up|down>.<id>[.<name>]` migration reference
fn parse_target(target: &str) -> Result<(Direction, &str, &str)> {
    let usage = "target must follow `<up|down>.<id>[.<name>]`, e.g. `up.1.add_users`";
    let mut parts = target.splitn(3, '.');
    let direction = match parts.next() {
        Some("up") => Direction::Up,
        Some("down") => Direction::Down,
        _ => anyhow::bail!("Invalid target '{}': {}", target, usage),
    };
    let id = parts
        .next()
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .with_context(|| format!("Invalid target '{}': {}", target, usage))?;
    let label = parts.next().unwrap_or("");
    Ok((direction, id, label))
}

/// Execute the run command
pub(crate) async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let (direction, id, label) = parse_target(&args.target)?;

    let mut ctx = RuntimeContext::new(global).await?;
    let index = find_by_id(&ctx.catalog, id, label)?;
    ctx.verbose(&format!(
        "forcing {} of {}",
        direction.as_str(),
        ctx.catalog[index].short_name()
    ));

    let engine = Engine::new(ctx.executor.as_ref(), &ctx.store);
    let outcome = engine
        .run_single(&mut ctx.history, &ctx.catalog, index, direction)
        .await?;
    report_step(&outcome);
    print_status(&ctx.history, &ctx.catalog);
    Ok(())
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
