//! Applied migration history: value type and persistence
//!
//! The history file is line-oriented text: line one is the project marker,
//! every following line is the up-script path of an applied migration, in
//! application order. The last line is the head, the migration currently
//! in effect.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Ordered record of applied migrations for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    /// Project marker, written once at initialization
    pub marker: String,

    /// Applied up-script paths, oldest first
    pub applied: Vec<String>,
}

impl History {
    /// Fresh history with no applied migrations
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            applied: Vec::new(),
        }
    }

    /// The most recently applied migration, if any
    pub fn head(&self) -> Option<&str> {
        self.applied.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Position of an applied path, oldest-first
    pub fn position_of(&self, up_path: &str) -> Option<usize> {
        self.applied.iter().position(|p| p == up_path)
    }

    /// Keep only the first `n` entries
    pub fn truncate_to(&mut self, n: usize) {
        self.applied.truncate(n);
    }

    /// Record a successful forward run.
    ///
    /// If the path is already somewhere in history this is a re-application
    /// after an earlier down: truncate to just after it instead of inserting
    /// a duplicate. Otherwise append.
    pub fn sync_after_up(&mut self, up_path: &str) {
        match self.position_of(up_path) {
            Some(i) => self.truncate_to(i + 1),
            None => self.applied.push(up_path.to_string()),
        }
    }

    /// Drop the head entry; a successful down always shrinks history by one
    pub fn drop_head(&mut self) {
        self.applied.pop();
    }

    /// Forget all applied entries, keeping the marker
    pub fn clear(&mut self) {
        self.applied.clear();
    }
}

/// Persistence seam for [`History`].
///
/// The engine saves through this trait after every successful step, so
/// tests can swap in [`MemoryHistoryStore`] and never touch the disk.
pub trait HistoryStore: Send + Sync {
    /// Load persisted history; `NotInitialized` when none exists
    fn load(&self) -> CoreResult<History>;

    /// Create a fresh store containing only the marker
    fn initialize(&self, marker: &str) -> CoreResult<History>;

    /// Persist the given history, fully replacing prior content
    fn save(&self, history: &History) -> CoreResult<()>;
}

/// Line-oriented history file on disk
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_out(&self, history: &History) -> CoreResult<()> {
        let mut content = history.marker.clone();
        for line in &history.applied {
            content.push('\n');
            content.push_str(line);
        }
        // Write-then-rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content).map_err(|e| CoreError::IoWithPath {
            path: tmp.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }
}

impl HistoryStore for FileHistoryStore {
    fn load(&self) -> CoreResult<History> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::NotInitialized)
            }
            Err(e) => {
                return Err(CoreError::IoWithPath {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };
        let mut lines = content.lines();
        let marker = match lines.next() {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => return Err(CoreError::NotInitialized),
        };
        let applied = lines
            .filter(|l| !l.trim().is_empty())
            .map(String::from)
            .collect();
        Ok(History { marker, applied })
    }

    fn initialize(&self, marker: &str) -> CoreResult<History> {
        let history = History::new(marker);
        self.write_out(&history)?;
        Ok(history)
    }

    fn save(&self, history: &History) -> CoreResult<()> {
        self.write_out(history)
    }
}

/// In-memory store for deterministic tests
#[derive(Default)]
pub struct MemoryHistoryStore {
    inner: Mutex<Option<History>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, as if the history had been persisted earlier
    pub fn with_history(history: History) -> Self {
        Self {
            inner: Mutex::new(Some(history)),
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> CoreResult<History> {
        self.inner
            .lock()
            .unwrap()
            .clone()
            .ok_or(CoreError::NotInitialized)
    }

    fn initialize(&self, marker: &str) -> CoreResult<History> {
        let history = History::new(marker);
        *self.inner.lock().unwrap() = Some(history.clone());
        Ok(history)
    }

    fn save(&self, history: &History) -> CoreResult<()> {
        *self.inner.lock().unwrap() = Some(history.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
