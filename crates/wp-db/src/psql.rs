//! psql executor backend

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use wp_core::config::Config;
use wp_core::error::{CoreError, CoreResult};
use wp_core::executor::{Executor, ScriptOutput};
use wp_core::short_path;

/// Runs migration scripts through the PostgreSQL command-line client,
/// optionally under `sudo -u <role>` for peer-authenticated setups.
pub struct PsqlExecutor {
    psql_path: String,
    role: String,
    dbname: String,
    use_sudo: bool,
}

impl PsqlExecutor {
    pub fn new(
        psql_path: impl Into<String>,
        role: impl Into<String>,
        dbname: impl Into<String>,
        use_sudo: bool,
    ) -> Self {
        Self {
            psql_path: psql_path.into(),
            role: role.into(),
            dbname: dbname.into(),
            use_sudo,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.database.psql_path.clone(),
            config.role(),
            config.dbname(),
            config.database.use_sudo,
        )
    }

    /// Program and argument list for one script run
    fn command_line(&self, script: &Path) -> (OsString, Vec<OsString>) {
        let mut args: Vec<OsString> = Vec::new();
        let program: OsString = if self.use_sudo {
            args.push("-u".into());
            args.push(self.role.clone().into());
            args.push(self.psql_path.clone().into());
            "sudo".into()
        } else {
            self.psql_path.clone().into()
        };
        args.push("-U".into());
        args.push(self.role.clone().into());
        args.push("-d".into());
        args.push(self.dbname.clone().into());
        args.push("-f".into());
        args.push(script.as_os_str().to_os_string());
        (program, args)
    }
}

#[async_trait]
impl Executor for PsqlExecutor {
    async fn execute(&self, script: &Path) -> CoreResult<ScriptOutput> {
        let (program, args) = self.command_line(script);
        log::debug!(
            "running {} {}",
            program.to_string_lossy(),
            args.iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        );
        let output = Command::new(&program)
            .args(&args)
            .output()
            .await
            .map_err(|e| CoreError::Executor {
                script: short_path(script),
                message: format!("could not spawn {}: {}", program.to_string_lossy(), e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        // A non-zero exit with no error output gives the caller nothing to
        // report, so surface it here. With error output present, hand the
        // streams back and let the engine apply its stderr policy.
        if !output.status.success() && stderr.trim().is_empty() {
            return Err(CoreError::Executor {
                script: short_path(script),
                message: format!("psql exited with {}", output.status),
            });
        }
        Ok(ScriptOutput { stdout, stderr })
    }
}

#[cfg(test)]
#[path = "psql_test.rs"]
mod tests;
