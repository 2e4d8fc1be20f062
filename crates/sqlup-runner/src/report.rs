//! Per-file, per-statement results of a migration run

use serde::Serialize;

/// One executed statement and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementResult {
    /// Statement text as sent to the database
    pub statement: String,

    /// Rows affected, as reported by the database
    pub rows_affected: usize,
}

/// Statements executed for one migration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Base filename (lock file key)
    pub filename: String,

    /// Executed statements, in execution order
    pub statements: Vec<StatementResult>,

    /// Whether every statement succeeded and the file was marked applied
    pub applied: bool,
}

impl FileReport {
    /// Start a report for `filename` with no statements yet
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            statements: Vec::new(),
            applied: false,
        }
    }
}

/// Results of one run.
///
/// Only files executed in this run appear; files skipped as already applied
/// do not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Executed files, in application order
    pub files: Vec<FileReport>,
}

impl MigrationReport {
    /// Whether nothing was executed
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Report for `filename`, if it ran
    pub fn file(&self, filename: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.filename == filename)
    }

    /// Filenames marked applied in this run
    pub fn applied_filenames(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|f| f.applied)
            .map(|f| f.filename.as_str())
            .collect()
    }

    /// Total statements executed successfully
    pub fn statement_count(&self) -> usize {
        self.files.iter().map(|f| f.statements.len()).sum()
    }
}
