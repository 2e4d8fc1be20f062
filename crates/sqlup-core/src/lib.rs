//! sqlup-core - Core library for sqlup
//!
//! This crate provides configuration parsing, comment stripping and statement
//! splitting, high-risk keyword detection, migration file discovery, and the
//! `sql.lock` record shared by the runner and the CLI.

pub mod config;
pub mod error;
pub mod file_set;
pub mod lock;
pub mod risk;
pub mod sql_text;

pub use config::{Config, DatabaseConfig, DbType, HighRiskConfig, MigrationSettings};
pub use error::{CoreError, CoreResult};
pub use file_set::{discover_migrations, ensure_readable_dir, MigrationFile};
pub use lock::{lock_path, LockRecord, LOCK_FILE_NAME};
pub use risk::RiskClassifier;
pub use sql_text::{normalize, split_statements};
