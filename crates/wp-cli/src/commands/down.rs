//! Down command implementation

use anyhow::Result;
use wp_core::Engine;

use crate::cli::GlobalArgs;
use crate::commands::common::{print_status, report_step};
use crate::context::RuntimeContext;

/// Execute the down command: revert the current head migration
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let mut ctx = RuntimeContext::new(global).await?;
    let engine = Engine::new(ctx.executor.as_ref(), &ctx.store);

    let outcome = engine.retreat(&mut ctx.history, &ctx.catalog).await?;
    report_step(&outcome);
    print_status(&ctx.history, &ctx.catalog);
    Ok(())
}
