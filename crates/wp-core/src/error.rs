//! Error types for wp-core

use thiserror::Error;

/// Core error type for Waypoint
#[derive(Error, Debug)]
pub enum CoreError {
    /// W001: No history file exists for this project yet
    #[error("[W001] Migration history not initialized for this project")]
    NotInitialized,

    /// W002: A file matched the migration naming convention but failed to parse
    #[error("[W002] Malformed migration file '{path}': {reason}")]
    MalformedCatalogEntry { path: String, reason: String },

    /// W003: The external database client could not be run
    #[error("[W003] Failed to run script '{script}': {message}")]
    Executor { script: String, message: String },

    /// W004: The script ran but produced error output
    #[error("[W004] Script '{script}' failed:\n{stderr}")]
    ExecutionFailed { script: String, stderr: String },

    /// W005: An applied history entry has no matching migration on disk
    #[error("[W005] Applied migration '{path}' not found in the catalog; cannot roll back. Resolve the drift (restore the file or reset history) and retry.")]
    UnresolvedDrift { path: String },

    /// W006: No catalog entry matches the requested migration id
    #[error("[W006] No migration matches '{id}'")]
    MigrationNotFound { id: String },

    /// W007: More than one catalog entry matches the requested migration id
    #[error("[W007] Migration id '{id}' is ambiguous: {count} catalog entries match")]
    AmbiguousMigration { id: String, count: usize },

    /// W008: IO error
    #[error("[W008] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// W009: IO error with file path context
    #[error("[W009] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// W010: Config/YAML parse error
    #[error("[W010] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// W011: JSON serialization/deserialization error
    #[error("[W011] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
