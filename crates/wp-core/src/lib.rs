//! wp-core - Core library for Waypoint
//!
//! This crate provides project configuration, migration catalog discovery,
//! the applied history store, the executor contract, and the migration
//! state machine shared by all Waypoint components.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod history;

pub use catalog::{find_by_id, scan, short_path, MigrationFile, TIMESTAMP_FORMAT};
pub use config::{Config, DatabaseConfig, CONFIG_FILE};
pub use engine::{Alignment, Direction, Engine, MergeOutcome, StepOutcome};
pub use error::{CoreError, CoreResult};
pub use executor::{Executor, ScriptOutput};
pub use history::{FileHistoryStore, History, HistoryStore, MemoryHistoryStore};
