//! Migration state machine
//!
//! Reconciles applied history against the on-disk catalog and drives the
//! executor one script at a time. Every operation takes the history by
//! `&mut` and persists through the [`HistoryStore`] after each successful
//! step, so a failure mid-sequence leaves the record at the last fully
//! completed step.
//!
//! Position model: `current_index` is the catalog index whose up path
//! equals the history head. An empty history and a drifted head (head not
//! in the catalog) both yield `None`, which makes the next forward target
//! index 0.

use crate::catalog::{short_path, MigrationFile};
use crate::error::{CoreError, CoreResult};
use crate::executor::Executor;
use crate::history::{History, HistoryStore};
use std::path::Path;

/// Which script of a pair to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Result of a single forward or backward step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// A forward script ran and history now ends at this migration
    Applied { migration: String },

    /// A reverse script ran and this migration left history
    Reverted { migration: String },

    /// Nothing ahead of the current head; not an error
    AlreadyLatest,

    /// Nothing applied, so nothing to retreat from; not an error
    NothingApplied,
}

/// Result of a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// History and catalog share a common prefix already; nothing ran
    AlreadyAligned,

    /// Rolled back to the last aligned migration and replayed forward
    Reconciled {
        rolled_back: usize,
        replayed: usize,
        /// False when the pre-merge head no longer exists in the catalog
        /// and replay stopped at the latest available migration
        head_restored: bool,
    },
}

/// Longest common ordered prefix of applied history and catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// True when the shorter sequence is a prefix of the longer
    pub aligned: bool,

    /// Matched prefix length when aligned, first mismatching index when not
    pub index: usize,
}

/// The reconciliation engine
pub struct Engine<'a> {
    executor: &'a dyn Executor,
    store: &'a dyn HistoryStore,
}

impl<'a> Engine<'a> {
    pub fn new(executor: &'a dyn Executor, store: &'a dyn HistoryStore) -> Self {
        Self { executor, store }
    }

    /// Catalog index of the current head, `None` for empty or drifted history
    pub fn current_index(history: &History, catalog: &[MigrationFile]) -> Option<usize> {
        let head = history.head()?;
        catalog.iter().position(|m| m.up_path == Path::new(head))
    }

    /// Longest aligned prefix of `history.applied` and `catalog`
    pub fn find_last_aligned(history: &History, catalog: &[MigrationFile]) -> Alignment {
        let n = history.len().min(catalog.len());
        for i in 0..n {
            if Path::new(&history.applied[i]) != catalog[i].up_path {
                return Alignment {
                    aligned: false,
                    index: i,
                };
            }
        }
        Alignment {
            aligned: true,
            index: n,
        }
    }

    /// Apply the next migration after the current head.
    pub async fn advance(
        &self,
        history: &mut History,
        catalog: &[MigrationFile],
    ) -> CoreResult<StepOutcome> {
        let target = Self::current_index(history, catalog).map_or(0, |i| i + 1);
        if target >= catalog.len() {
            return Ok(StepOutcome::AlreadyLatest);
        }
        let migration = &catalog[target];
        self.run_script(&migration.up_path).await?;
        history.sync_after_up(&migration.up_path.display().to_string());
        self.store.save(history)?;
        log::debug!("advanced to {}", migration.short_name());
        Ok(StepOutcome::Applied {
            migration: migration.short_name(),
        })
    }

    /// Revert the current head migration.
    ///
    /// A head with no catalog entry cannot be reverted by script; that is
    /// drift and surfaces as an error rather than a guessed truncation.
    pub async fn retreat(
        &self,
        history: &mut History,
        catalog: &[MigrationFile],
    ) -> CoreResult<StepOutcome> {
        let head = match history.head() {
            Some(h) => h.to_string(),
            None => return Ok(StepOutcome::NothingApplied),
        };
        let migration = catalog
            .iter()
            .find(|m| m.up_path == Path::new(&head))
            .ok_or(CoreError::UnresolvedDrift { path: head })?;
        self.run_script(&migration.down_path).await?;
        history.drop_head();
        self.store.save(history)?;
        log::debug!("retreated past {}", migration.short_name());
        Ok(StepOutcome::Reverted {
            migration: migration.short_name(),
        })
    }

    /// Roll back every applied migration at a position greater than
    /// `target`, most recent first; `None` rolls back everything.
    ///
    /// Each successful reverse run truncates and persists before the next,
    /// so an execution failure aborts with history at the reached point.
    /// An applied entry with no catalog match is [`CoreError::UnresolvedDrift`].
    pub async fn rollback_to(
        &self,
        history: &mut History,
        catalog: &[MigrationFile],
        target: Option<usize>,
    ) -> CoreResult<usize> {
        self.roll_back_suffix(history, catalog, target.map_or(0, |t| t + 1), false)
            .await
    }

    async fn roll_back_suffix(
        &self,
        history: &mut History,
        catalog: &[MigrationFile],
        keep: usize,
        derive_missing: bool,
    ) -> CoreResult<usize> {
        let mut rolled_back = 0;
        while history.len() > keep {
            let position = history.len() - 1;
            let path = history.applied[position].clone();
            let down_path = match catalog.iter().find(|m| m.up_path == Path::new(&path)) {
                Some(migration) => migration.down_path.clone(),
                // Merge rolls back entries that left the catalog; their
                // reverse script may still sit next to the recorded path.
                None if derive_missing => derived_down_path(Path::new(&path))
                    .filter(|p| p.exists())
                    .ok_or(CoreError::UnresolvedDrift { path: path.clone() })?,
                None => return Err(CoreError::UnresolvedDrift { path }),
            };
            self.run_script(&down_path).await?;
            history.truncate_to(position);
            self.store.save(history)?;
            log::debug!("rolled back {}", short_path(Path::new(&path)));
            rolled_back += 1;
        }
        Ok(rolled_back)
    }

    /// Merge diverged histories.
    ///
    /// Rolls back to the last migration still aligned with the catalog,
    /// then replays forward until the pre-merge head is reached. When that
    /// head no longer exists in the catalog, replay stops at the latest
    /// available migration; that is a valid terminal state. A rollback
    /// failure aborts the merge and replay never runs.
    ///
    /// Rolling back here tolerates entries that left the catalog as long
    /// as their reverse script still exists beside the recorded path;
    /// a truly unrecoverable entry is still [`CoreError::UnresolvedDrift`].
    pub async fn reconcile(
        &self,
        history: &mut History,
        catalog: &[MigrationFile],
    ) -> CoreResult<MergeOutcome> {
        let alignment = Self::find_last_aligned(history, catalog);
        if alignment.aligned {
            return Ok(MergeOutcome::AlreadyAligned);
        }

        // Divergence implies a non-empty applied suffix, so a head exists.
        let saved_head = history.head().map(String::from);
        let rolled_back = self
            .roll_back_suffix(history, catalog, alignment.index, true)
            .await?;

        let mut replayed = 0;
        let mut head_restored = false;
        if let Some(saved) = saved_head {
            loop {
                if history.head() == Some(saved.as_str()) {
                    head_restored = true;
                    break;
                }
                match self.advance(history, catalog).await? {
                    StepOutcome::Applied { .. } => replayed += 1,
                    // AlreadyLatest: the saved head was removed from the catalog
                    _ => break,
                }
            }
        }
        Ok(MergeOutcome::Reconciled {
            rolled_back,
            replayed,
            head_restored,
        })
    }

    /// Force-run a single catalog entry outside normal sequencing.
    ///
    /// History stays truthful: a forced up re-syncs exactly like a normal
    /// advance, a forced down removes the entry and everything after it
    /// when it was applied, and leaves history alone when it was not.
    pub async fn run_single(
        &self,
        history: &mut History,
        catalog: &[MigrationFile],
        index: usize,
        direction: Direction,
    ) -> CoreResult<StepOutcome> {
        let migration = &catalog[index];
        match direction {
            Direction::Up => {
                self.run_script(&migration.up_path).await?;
                history.sync_after_up(&migration.up_path.display().to_string());
                self.store.save(history)?;
                Ok(StepOutcome::Applied {
                    migration: migration.short_name(),
                })
            }
            Direction::Down => {
                self.run_script(&migration.down_path).await?;
                if let Some(position) =
                    history.position_of(&migration.up_path.display().to_string())
                {
                    history.truncate_to(position);
                    self.store.save(history)?;
                }
                Ok(StepOutcome::Reverted {
                    migration: migration.short_name(),
                })
            }
        }
    }

    async fn run_script(&self, script: &Path) -> CoreResult<()> {
        // Non-empty stderr fails the step even on a clean exit: psql
        // reports script errors on stderr while still exiting 0.
        let output = self.executor.execute(script).await?;
        if !output.stderr.trim().is_empty() {
            return Err(CoreError::ExecutionFailed {
                script: short_path(script),
                stderr: output.stderr,
            });
        }
        if !output.stdout.is_empty() {
            log::debug!("{}: {}", short_path(script), output.stdout.trim_end());
        }
        Ok(())
    }
}

/// Sibling reverse script of a recorded up path, when derivable
fn derived_down_path(up_path: &Path) -> Option<std::path::PathBuf> {
    let name = up_path.file_name()?.to_str()?;
    let rest = name.strip_prefix("up.")?;
    Some(up_path.with_file_name(format!("down.{rest}")))
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
