//! The `sql.lock` file recording which migrations have been applied
//!
//! The lock file is a JSON object mapping filename to a flag. A flag equal to
//! `1` (also `true` or `"1"`) means applied; any other value, or no entry at
//! all, leaves the file eligible to run. External tooling may write other values to force a file
//! to be re-applied, so flags are kept as raw JSON values rather than booleans.

use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Name of the lock file inside a migrations directory
pub const LOCK_FILE_NAME: &str = "sql.lock";

/// Flag value marking a file as applied
pub const APPLIED_FLAG: u64 = 1;

/// Path of the lock file for a migrations directory
pub fn lock_path(dir: &Path) -> PathBuf {
    dir.join(LOCK_FILE_NAME)
}

/// In-memory filename → flag mapping.
///
/// Backed by a `BTreeMap` so the persisted file always lists keys in
/// ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockRecord {
    entries: BTreeMap<String, Value>,
}

impl LockRecord {
    /// Create an empty lock record
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the lock record at `path`.
    ///
    /// A missing file is an empty record. An empty JSON array is also read as
    /// an empty record. Anything else that is not a JSON object is
    /// [`CoreError::LockCorrupt`].
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content).map_err(|message| CoreError::LockCorrupt {
            path: path.display().to_string(),
            message,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
        match value {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            Value::Array(items) if items.is_empty() => Ok(Self::new()),
            other => Err(format!(
                "expected a JSON object of filename to flag, found {}",
                json_kind(&other)
            )),
        }
    }

    /// Save the record to `path`, keys sorted ascending.
    ///
    /// Writes to a temp file next to `path` and renames it into place.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let temp_path = path.with_extension(format!("lock.{}.tmp", std::process::id()));
        let mut json = serde_json::to_string_pretty(&self.entries)?;
        json.push('\n');
        std::fs::write(&temp_path, &json).map_err(|e| CoreError::IoWithPath {
            path: temp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        Ok(())
    }

    /// Filenames whose flag marks them applied
    pub fn applied_filenames(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|(_, flag)| is_applied_flag(flag))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Whether `filename` is marked applied
    pub fn is_applied(&self, filename: &str) -> bool {
        self.entries.get(filename).is_some_and(is_applied_flag)
    }

    /// Mark `filename` applied
    pub fn mark_applied(&mut self, filename: impl Into<String>) {
        self.entries.insert(filename.into(), Value::from(APPLIED_FLAG));
    }

    /// Raw flag recorded for `filename`
    pub fn flag(&self, filename: &str) -> Option<&Value> {
        self.entries.get(filename)
    }

    /// Set a raw flag for `filename`
    pub fn set_flag(&mut self, filename: impl Into<String>, flag: Value) {
        self.entries.insert(filename.into(), flag);
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `true`, a number equal to 1, or a string holding such a number.
fn is_applied_flag(flag: &Value) -> bool {
    let applied = APPLIED_FLAG as f64;
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(applied),
        Value::String(s) => s.trim().parse::<f64>().ok() == Some(applied),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a non-empty array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "lock_test.rs"]
mod tests;
