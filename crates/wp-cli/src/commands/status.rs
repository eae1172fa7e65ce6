//! Status command implementation

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs, StatusFormat};
use crate::commands::common::print_status;
use crate::context::RuntimeContext;

/// One catalog entry in the JSON report
#[derive(Debug, Serialize)]
struct AvailableEntry {
    name: String,
    sequence_id: String,
    created_at: NaiveDateTime,
    applied: bool,
}

/// JSON status report
#[derive(Debug, Serialize)]
struct StatusReport {
    project: String,
    applied: Vec<String>,
    available: Vec<AvailableEntry>,
}

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;
    match args.format {
        StatusFormat::Text => print_status(&ctx.history, &ctx.catalog),
        StatusFormat::Json => {
            let report = StatusReport {
                project: ctx.history.marker.clone(),
                applied: ctx.history.applied.clone(),
                available: ctx
                    .catalog
                    .iter()
                    .map(|m| AvailableEntry {
                        name: m.short_name(),
                        sequence_id: m.sequence_id.clone(),
                        created_at: m.created_at,
                        applied: ctx
                            .history
                            .position_of(&m.up_path.display().to_string())
                            .is_some(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
