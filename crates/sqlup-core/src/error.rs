//! Error types for sqlup-core

use thiserror::Error;

/// Core error type for sqlup
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Migration directory missing or unreadable
    #[error("[E003] Migration directory '{path}' does not exist or cannot be read: {reason}")]
    DirectoryError { path: String, reason: String },

    /// E004: Lock file exists but is not a filename-to-flag mapping
    #[error("[E004] Lock file '{path}' is corrupt: {message}")]
    LockCorrupt { path: String, message: String },

    /// E005: IO error
    #[error("[E005] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E006: IO error with file path context
    #[error("[E006] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E007: Config YAML parse error
    #[error("[E007] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
