//! Backend construction from configuration

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::traits::Database;
use sqlup_core::config::{DatabaseConfig, DbType};

/// Open the database described by `config`.
///
/// The returned connection is meant to be opened once per migration run and
/// reused for every statement in it.
pub fn connect(config: &DatabaseConfig) -> DbResult<Box<dyn Database>> {
    log::debug!("Opening {} database at {}", config.db_type, config.path);
    match config.db_type {
        DbType::DuckDb => Ok(Box::new(DuckDbBackend::new(&config.path)?)),
    }
}
