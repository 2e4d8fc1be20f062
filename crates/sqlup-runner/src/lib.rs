//! sqlup-runner - Migration runner for sqlup
//!
//! Applies every not-yet-applied file in a migrations directory, one
//! statement at a time and in filename order, and records completed files in
//! the directory's `sql.lock`.

pub mod error;
pub mod report;
pub mod runner;
pub mod status;

pub use error::{MigrateError, MigrateResult, RunFailure};
pub use report::{FileReport, MigrationReport, StatementResult};
pub use runner::MigrationRunner;
pub use status::{FileState, MigrationStatus, StatusEntry};
