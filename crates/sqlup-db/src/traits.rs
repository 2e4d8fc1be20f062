//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// The database a migration run executes statements against.
///
/// Each call runs exactly one statement; callers never batch statements or
/// wrap them in a transaction.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single SQL statement, returning the affected row count
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
