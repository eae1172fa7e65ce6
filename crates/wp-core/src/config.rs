//! Configuration types and parsing for waypoint.yml

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "waypoint.yml";

/// Resolved project configuration
///
/// Every field is optional on disk, including the name; a project with no
/// waypoint.yml at all gets a configuration derived entirely from its
/// directory name, which is how most projects run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project name, also the history file's project marker
    pub name: String,

    /// Directory containing migration pairs, relative to the project dir
    pub migrations_path: String,

    /// History file name, relative to the project dir
    pub history_file: String,

    /// Database client invocation parameters
    pub database: DatabaseConfig,
}

/// On-disk form of [`Config`], before the name fallback is applied
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    name: Option<String>,

    #[serde(default = "default_migrations_path")]
    migrations_path: String,

    #[serde(default = "default_history_file")]
    history_file: String,

    #[serde(default)]
    database: DatabaseConfig,
}

/// How to invoke the external database client
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database role to connect as (`psql -U`); defaults to the project name
    #[serde(default)]
    pub role: Option<String>,

    /// Database name (`psql -d`); defaults to the project name
    #[serde(default)]
    pub dbname: Option<String>,

    /// Path to the psql binary
    #[serde(default = "default_psql_path")]
    pub psql_path: String,

    /// Run the client under `sudo -u <role>`
    #[serde(default = "default_true")]
    pub use_sudo: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            role: None,
            dbname: None,
            psql_path: default_psql_path(),
            use_sudo: true,
        }
    }
}

fn default_migrations_path() -> String {
    "migrations".to_string()
}

fn default_history_file() -> String {
    ".waypoint".to_string()
}

fn default_psql_path() -> String {
    "psql".to_string()
}

fn default_true() -> bool {
    true
}

/// Project name derived from a directory, the zero-configuration default
fn directory_name(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(dir)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "waypoint".to_string())
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// A file that leaves out `name` gets one derived from the directory
    /// the file sits in.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let raw: RawConfig = serde_yaml::from_str(&content)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self {
            name: raw.name.unwrap_or_else(|| directory_name(dir)),
            migrations_path: raw.migrations_path,
            history_file: raw.history_file,
            database: raw.database,
        })
    }

    /// Load configuration from a project directory.
    ///
    /// A missing waypoint.yml is not an error: the original tool ran with
    /// zero configuration, deriving the project name, database role, and
    /// database name from the directory name.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default_for(dir))
        }
    }

    /// Default configuration for a project directory with no waypoint.yml
    pub fn default_for(dir: &Path) -> Self {
        Self {
            name: directory_name(dir),
            migrations_path: default_migrations_path(),
            history_file: default_history_file(),
            database: DatabaseConfig::default(),
        }
    }

    /// Absolute path of the migrations root
    pub fn migrations_root(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.migrations_path)
    }

    /// Absolute path of the history file
    pub fn history_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.history_file)
    }

    /// Database role, falling back to the project name
    pub fn role(&self) -> &str {
        self.database.role.as_deref().unwrap_or(&self.name)
    }

    /// Database name, falling back to the project name
    pub fn dbname(&self) -> &str {
        self.database.dbname.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
