//! Reset command implementation

use anyhow::Result;
use wp_core::HistoryStore;

use crate::cli::GlobalArgs;
use crate::commands::common::print_status;
use crate::context::{confirm, RuntimeContext};

/// Execute the reset command: clear local bookkeeping.
///
/// This never runs a reverse script; it only forgets which migrations
/// this machine believes are applied.
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let mut ctx = RuntimeContext::new(global).await?;

    let question = format!(
        " ** This will clear the migration history saved in `{}`.\n \
         ** No down scripts will run. Are you sure?",
        ctx.store.path().display()
    );
    if !confirm(&question, global.yes)? {
        println!("** Reset cancelled");
        return Ok(());
    }

    ctx.history.clear();
    ctx.store.save(&ctx.history)?;
    println!("** Migration history cleared");
    print_status(&ctx.history, &ctx.catalog);
    Ok(())
}
