//! Executor contract for the external database client
//!
//! Implementations run one script to completion and hand back both output
//! streams. The engine applies the failure policy itself: non-empty stderr
//! fails the step even when the process exited cleanly, because psql
//! reports script errors on stderr while still exiting 0.

use crate::error::CoreResult;
use async_trait::async_trait;
use std::path::Path;

/// Captured output of one script run
#[derive(Debug, Clone, Default)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
}

/// External script runner. Implementations must be Send + Sync.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run one SQL script to completion.
    ///
    /// Errors cover spawn failures and non-zero exits; a clean exit with
    /// error output still comes back as `Ok` so the caller can inspect
    /// the streams.
    async fn execute(&self, script: &Path) -> CoreResult<ScriptOutput>;
}
