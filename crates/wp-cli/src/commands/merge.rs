//! Merge command implementation

use anyhow::Result;
use wp_core::{Engine, MergeOutcome};

use crate::cli::GlobalArgs;
use crate::commands::common::print_status;
use crate::context::RuntimeContext;

/// Execute the merge command: roll back to the last aligned migration,
/// then replay forward toward the pre-merge head
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let mut ctx = RuntimeContext::new(global).await?;
    let engine = Engine::new(ctx.executor.as_ref(), &ctx.store);

    match engine.reconcile(&mut ctx.history, &ctx.catalog).await? {
        MergeOutcome::AlreadyAligned => {
            println!("** History already aligned with the catalog; nothing to do");
        }
        MergeOutcome::Reconciled {
            rolled_back,
            replayed,
            head_restored,
        } => {
            println!(
                "** Merge complete: rolled back {}, replayed {}",
                rolled_back, replayed
            );
            if !head_restored {
                println!(
                    "** The previous head is no longer in the catalog; \
                     stopped at the latest available migration"
                );
            }
        }
    }
    print_status(&ctx.history, &ctx.catalog);
    Ok(())
}
