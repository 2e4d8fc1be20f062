//! Migration file discovery

use crate::error::{CoreError, CoreResult};
use crate::lock::LOCK_FILE_NAME;
use std::path::{Path, PathBuf};

/// A migration file found in the migrations directory.
///
/// Identified by its base filename, which is also the lock file key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MigrationFile {
    /// Base filename (lock file key)
    pub filename: String,

    /// Full path to the file
    pub path: PathBuf,
}

impl MigrationFile {
    /// Read the file content
    pub fn read(&self) -> CoreResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

/// Check that `dir` exists, is a directory and can be listed.
pub fn ensure_readable_dir(dir: &Path) -> CoreResult<()> {
    let directory_error = |reason: String| CoreError::DirectoryError {
        path: dir.display().to_string(),
        reason,
    };

    let metadata = std::fs::metadata(dir).map_err(|e| directory_error(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(directory_error("not a directory".to_string()));
    }
    std::fs::read_dir(dir).map_err(|e| directory_error(e.to_string()))?;
    Ok(())
}

/// Discover migration files in `dir` whose extension is in `extensions`.
///
/// Only the top level of `dir` is scanned. Hidden files, subdirectories and
/// the lock file are skipped; extension matching is case-sensitive. The result
/// is sorted ascending by filename, which is the order migrations apply in.
pub fn discover_migrations<S: AsRef<str>>(
    dir: &Path,
    extensions: &[S],
) -> CoreResult<Vec<MigrationFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::DirectoryError {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };
        if filename.starts_with('.') || filename == LOCK_FILE_NAME {
            continue;
        }
        if !has_accepted_extension(&path, extensions) || !path.is_file() {
            continue;
        }

        files.push(MigrationFile {
            filename: filename.to_string(),
            path,
        });
    }

    files.sort();
    Ok(files)
}

fn has_accepted_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    extensions.iter().any(|accepted| accepted.as_ref() == ext)
}

#[cfg(test)]
#[path = "file_set_test.rs"]
mod tests;
