//! Output helpers shared by the commands

use wp_core::{short_path, History, MigrationFile, StepOutcome};

/// Print the applied history against the available catalog
pub(crate) fn print_status(history: &History, catalog: &[MigrationFile]) {
    println!("\n** Migration status for project: {} **", history.marker);

    println!("\n--> Applied:");
    if history.is_empty() {
        println!("   ** No migrations applied");
    } else {
        for path in &history.applied {
            println!("  ->> {}", short_path(std::path::Path::new(path)));
        }
    }

    println!("\n--> Available:");
    if catalog.is_empty() {
        println!("   ** No migration files found");
    } else {
        for migration in catalog {
            let mark = if history
                .position_of(&migration.up_path.display().to_string())
                .is_some()
            {
                'X'
            } else {
                ' '
            };
            println!("  --> {} [{}]", migration.short_name(), mark);
        }
    }
    println!();
}

/// Print the result of a single step
pub(crate) fn report_step(outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Applied { migration } => {
            println!("** Moved up to:\n   {}", migration);
        }
        StepOutcome::Reverted { migration } => {
            println!("** Moved down past:\n   {}", migration);
        }
        StepOutcome::AlreadyLatest => {
            println!("** Already at the latest migration");
        }
        StepOutcome::NothingApplied => {
            println!("** No migrations applied; nothing to move down from");
        }
    }
}
