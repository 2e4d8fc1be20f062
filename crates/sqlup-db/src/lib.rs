//! sqlup-db - Database layer for sqlup
//!
//! This crate provides the `Database` trait the migration runner executes
//! statements through, a DuckDB implementation, and construction of a
//! backend from a [`DatabaseConfig`](sqlup_core::DatabaseConfig).

pub mod connect;
pub mod duckdb;
pub mod error;
pub mod traits;

pub use connect::connect;
pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
