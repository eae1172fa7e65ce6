//! New command implementation - scaffolds an empty migration pair

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use wp_core::TIMESTAMP_FORMAT;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::print_status;
use crate::context::RuntimeContext;

/// Execute the new command
pub(crate) async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let name = args.name.to_lowercase();
    // The name lands inside a dot-separated file name and a directory name
    if name.contains('/') || name.contains('\\') || name.contains(char::is_whitespace) {
        anyhow::bail!(
            "Invalid migration name '{}': must not contain '/', '\\', or whitespace",
            args.name
        );
    }

    let ctx = RuntimeContext::new(global).await?;
    let sequence = ctx.catalog.len();
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let stem = format!("{}.{}.{}", sequence, name, timestamp);

    let migration_dir = ctx.config.migrations_root(&ctx.project_dir).join(&stem);
    fs::create_dir_all(&migration_dir)
        .with_context(|| format!("Failed to create {}", migration_dir.display()))?;
    let up_file = format!("up.{}.sql", stem);
    let down_file = format!("down.{}.sql", stem);
    for file in [&up_file, &down_file] {
        fs::write(migration_dir.join(file), "")
            .with_context(|| format!("Failed to write {}", file))?;
    }

    println!(
        "** Generated new up & down templates:\n<> {}\n  -> {}\n  -> {}",
        migration_dir.display(),
        up_file,
        down_file
    );

    let catalog = wp_core::scan(&ctx.config.migrations_root(&ctx.project_dir))
        .context("Failed to rescan migrations")?;
    print_status(&ctx.history, &catalog);
    Ok(())
}
