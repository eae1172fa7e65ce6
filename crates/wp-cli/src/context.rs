//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use wp_core::{
    Config, CoreError, Executor, FileHistoryStore, History, HistoryStore, MigrationFile,
};
use wp_db::PsqlExecutor;

use crate::cli::GlobalArgs;

/// Runtime context containing loaded config, catalog, and history
pub struct RuntimeContext {
    /// Project directory everything is rooted at
    pub project_dir: PathBuf,

    /// Loaded (or derived) project configuration
    pub config: Config,

    /// Migrations discovered on disk, sorted by creation time
    pub catalog: Vec<MigrationFile>,

    /// Persisted applied history
    pub history: History,

    /// History persistence
    pub store: FileHistoryStore,

    /// External script runner
    pub executor: Box<dyn Executor>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Load everything a command needs from global arguments.
    ///
    /// Two recoverable conditions are resolved interactively here, the way
    /// the rest of the tool never is: a missing migrations root (offer to
    /// create it) and a missing history file (offer to initialize).
    pub async fn new(args: &GlobalArgs) -> Result<Self> {
        let project_dir = PathBuf::from(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&project_dir).context("Failed to load project configuration")?
        };

        let migrations_root = config.migrations_root(&project_dir);
        if !migrations_root.exists() {
            let question = format!(
                " ** `{}` directory not found!\n ** Create it now?",
                migrations_root.display()
            );
            if confirm(&question, args.yes)? {
                std::fs::create_dir_all(&migrations_root).with_context(|| {
                    format!("Failed to create {}", migrations_root.display())
                })?;
            } else {
                log::warn!("no migrations root; continuing with an empty catalog");
            }
        }
        let catalog = wp_core::scan(&migrations_root).context("Failed to scan migrations")?;

        let store = FileHistoryStore::new(config.history_path(&project_dir));
        let history = match store.load() {
            Ok(history) => history,
            Err(CoreError::NotInitialized) => {
                let question = format!(
                    " ** No migration history found for this project.\n \
                     ** Initialize waypoint for `{}`?",
                    config.name
                );
                if !confirm(&question, args.yes)? {
                    anyhow::bail!("Aborted: migration history not initialized");
                }
                println!("** Initializing...");
                store.initialize(&config.name)?
            }
            Err(e) => return Err(e).context("Failed to load migration history"),
        };

        let executor: Box<dyn Executor> = Box::new(PsqlExecutor::from_config(&config));

        Ok(Self {
            project_dir,
            config,
            catalog,
            history,
            store,
            executor,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}

/// Ask a y/n question on stdin; `assume_yes` short-circuits to true
pub(crate) fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    println!("{}", question);
    print!("    y/n >> ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
