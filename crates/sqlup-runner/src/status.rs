//! Read-only view of which migrations have been applied

use crate::error::MigrateResult;
use crate::runner::MigrationRunner;
use serde::Serialize;
use serde_json::Value;
use sqlup_core::file_set::{discover_migrations, ensure_readable_dir};
use sqlup_core::lock::{lock_path, LockRecord};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Where a migration stands relative to the lock file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileState {
    /// File exists and its flag is `1`
    Applied,
    /// File exists and would run next time
    Pending,
    /// Lock entry whose file is no longer in the directory
    Orphaned,
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileState::Applied => write!(f, "applied"),
            FileState::Pending => write!(f, "pending"),
            FileState::Orphaned => write!(f, "orphaned"),
        }
    }
}

/// Status of one migration file or lock entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEntry {
    /// Base filename (lock file key)
    pub filename: String,

    /// Applied, pending or orphaned
    pub state: FileState,

    /// Raw flag from the lock file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<Value>,
}

/// Status of every migration in a directory.
///
/// Discovered files come first in application order, followed by orphaned
/// lock entries in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MigrationStatus {
    pub entries: Vec<StatusEntry>,
}

impl MigrationStatus {
    /// Entries in the given state
    pub fn with_state(&self, state: FileState) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter().filter(move |e| e.state == state)
    }

    /// Filenames that would run next time
    pub fn pending(&self) -> Vec<&str> {
        self.with_state(FileState::Pending)
            .map(|e| e.filename.as_str())
            .collect()
    }

    /// Number of entries in the given state
    pub fn count(&self, state: FileState) -> usize {
        self.with_state(state).count()
    }
}

impl MigrationRunner {
    /// Report which files in `dir` are applied or pending.
    ///
    /// Reads the directory and lock file only; the database is not opened
    /// and nothing is written.
    pub fn status(&self, dir: &Path) -> MigrateResult<MigrationStatus> {
        ensure_readable_dir(dir)?;
        let files = discover_migrations(dir, &self.settings().extensions)?;
        let lock = LockRecord::load(&lock_path(dir))?;

        let mut entries: Vec<StatusEntry> = files
            .iter()
            .map(|file| StatusEntry {
                filename: file.filename.clone(),
                state: if lock.is_applied(&file.filename) {
                    FileState::Applied
                } else {
                    FileState::Pending
                },
                flag: lock.flag(&file.filename).cloned(),
            })
            .collect();

        let discovered: BTreeSet<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        entries.extend(
            lock.iter()
                .filter(|(name, _)| !discovered.contains(name))
                .map(|(name, flag)| StatusEntry {
                    filename: name.to_string(),
                    state: FileState::Orphaned,
                    flag: Some(flag.clone()),
                }),
        );

        Ok(MigrationStatus { entries })
    }
}
