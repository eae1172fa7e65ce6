//! Migration catalog: discovery and ordering of migration script pairs
//!
//! A migration is a directory holding a forward and a reverse script:
//!
//! ```text
//! migrations/3.add_users.20240117-093015/
//!     up.3.add_users.20240117-093015.sql
//!     down.3.add_users.20240117-093015.sql
//! ```
//!
//! The embedded timestamp is the sole ordering key; the sequence id is
//! display-only.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Timestamp format embedded in migration file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const UP_PREFIX: &str = "up.";
const DOWN_PREFIX: &str = "down.";
const SQL_SUFFIX: &str = ".sql";

/// One discovered migration pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// File name of the forward script
    pub name: String,

    /// Absolute path of the forward script
    pub up_path: PathBuf,

    /// Absolute path of the reverse script
    pub down_path: PathBuf,

    /// Sequence id segment of the file name, display-only
    pub sequence_id: String,

    /// Descriptive name segment of the file name
    pub label: String,

    /// Timestamp parsed from the file name; the catalog sort key
    pub created_at: NaiveDateTime,
}

impl MigrationFile {
    /// Display label: containing folder plus file name
    pub fn short_name(&self) -> String {
        short_path(&self.up_path)
    }
}

/// Shorten an absolute script path to `folder/file` for display
pub fn short_path(path: &Path) -> String {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.parent().and_then(|p| p.file_name()) {
        Some(folder) => format!("{}/{}", folder.to_string_lossy(), file),
        None => file,
    }
}

/// Scan the migrations root and return all pairs sorted by creation time.
///
/// A missing root is zero available migrations; offering to create the
/// directory is the caller's concern. A file that matches the `up.*.sql`
/// convention but cannot be parsed aborts the whole scan: skipping it
/// would silently shift every later catalog index.
pub fn scan(root: &Path) -> CoreResult<Vec<MigrationFile>> {
    let mut available = Vec::new();
    if root.exists() {
        collect(root, &mut available)?;
    }
    // Stable sort: ties keep discovery order
    available.sort_by_key(|mf| mf.created_at);
    Ok(available)
}

fn collect(dir: &Path, available: &mut Vec<MigrationFile>) -> CoreResult<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    // read_dir order is platform-dependent; sort for deterministic discovery
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect(&path, available)?;
            continue;
        }
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if !file_name.starts_with(UP_PREFIX) || !file_name.ends_with(SQL_SUFFIX) {
            if file_name.ends_with(SQL_SUFFIX) && !file_name.starts_with(DOWN_PREFIX) {
                log::debug!("Ignoring non-migration SQL file: {}", path.display());
            }
            continue;
        }
        available.push(parse_pair(&path, file_name)?);
    }
    Ok(())
}

fn parse_pair(up_path: &Path, file_name: &str) -> CoreResult<MigrationFile> {
    let stem = &file_name[UP_PREFIX.len()..file_name.len() - SQL_SUFFIX.len()];
    let segments: Vec<&str> = stem.split('.').collect();
    if segments.len() < 2 {
        return Err(CoreError::MalformedCatalogEntry {
            path: up_path.display().to_string(),
            reason: "expected `up.<id>.<name>.<timestamp>.sql`".to_string(),
        });
    }

    let sequence_id = segments[0].to_string();
    let label = segments[1..segments.len() - 1].join(".");
    let timestamp = segments[segments.len() - 1];
    let created_at = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| {
        CoreError::MalformedCatalogEntry {
            path: up_path.display().to_string(),
            reason: format!("bad timestamp '{}': {}", timestamp, e),
        }
    })?;

    let down_name = format!("{}{}", DOWN_PREFIX, &file_name[UP_PREFIX.len()..]);
    let down_path = up_path.with_file_name(&down_name);
    if !down_path.exists() {
        return Err(CoreError::MalformedCatalogEntry {
            path: up_path.display().to_string(),
            reason: format!("missing reverse script '{}'", down_name),
        });
    }

    Ok(MigrationFile {
        name: file_name.to_string(),
        up_path: up_path.to_path_buf(),
        down_path,
        sequence_id,
        label,
        created_at,
    })
}

/// Find the one catalog entry with the given sequence id.
///
/// A non-empty `label` must also match. Lookup is exact: a missing id is
/// an error, and so is a duplicated one, since running the wrong script
/// outside normal sequencing is unrecoverable.
pub fn find_by_id(
    catalog: &[MigrationFile],
    sequence_id: &str,
    label: &str,
) -> CoreResult<usize> {
    let mut matches = catalog
        .iter()
        .enumerate()
        .filter(|(_, m)| m.sequence_id == sequence_id && (label.is_empty() || m.label == label))
        .map(|(i, _)| i);
    let display = if label.is_empty() {
        sequence_id.to_string()
    } else {
        format!("{}.{}", sequence_id, label)
    };
    match (matches.next(), matches.count()) {
        (Some(i), 0) => Ok(i),
        (None, _) => Err(CoreError::MigrationNotFound { id: display }),
        (Some(_), rest) => Err(CoreError::AmbiguousMigration {
            id: display,
            count: rest + 1,
        }),
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
