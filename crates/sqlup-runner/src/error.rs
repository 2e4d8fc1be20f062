//! Error types for the migration runner

use crate::report::MigrationReport;
use sqlup_core::CoreError;
use sqlup_db::DbError;
use std::fmt;
use thiserror::Error;

/// Migration run errors.
///
/// Every variant is fatal to the run; nothing is retried.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Directory, lock file, config or IO failure from sqlup-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The database could not be opened (M001)
    #[error("[M001] Failed to open the database")]
    Connection(#[source] DbError),

    /// High-risk gate rejected a file (M002)
    #[error("[M002] {file}: high-risk SQL rejected (matched keyword '{keyword}')")]
    HighRiskRejected { file: String, keyword: String },

    /// A statement failed to execute (M003)
    #[error("[M003] SQL failed in {file}: {statement}")]
    StatementFailed {
        file: String,
        statement: String,
        source: DbError,
    },
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;

/// A failed run: the error plus whatever was executed before it.
///
/// Files completed before the failure are already recorded in the lock file;
/// `report` lists them along with the statements of the failing file that
/// succeeded.
#[derive(Debug)]
pub struct RunFailure {
    /// What stopped the run
    pub error: MigrateError,

    /// Results gathered before the failure
    pub report: MigrationReport,
}

impl RunFailure {
    /// A failure with no partial results
    pub fn new(error: MigrateError) -> Self {
        Self {
            error,
            report: MigrationReport::default(),
        }
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.error)
    }
}

impl From<MigrateError> for RunFailure {
    fn from(error: MigrateError) -> Self {
        Self::new(error)
    }
}

impl From<CoreError> for RunFailure {
    fn from(error: CoreError) -> Self {
        Self::new(error.into())
    }
}
