//! Configuration types and parsing for sqlup.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extensions treated as migrations when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["sql", "txt", "csv", "log"];

/// Keywords that flag a migration as high-risk when none are configured.
pub const DEFAULT_HIGH_RISK_KEYWORDS: &[&str] = &["drop", "truncate", "delete"];

const DEFAULT_DB_PATH: &str = ":memory:";

const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

/// Main project configuration from sqlup.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// File extensions (without the dot) accepted as migrations
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// High-risk statement gate
    #[serde(default)]
    pub high_risk: HighRiskConfig,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// High-risk keyword gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighRiskConfig {
    /// Reject files containing any keyword (disabled by default)
    #[serde(default)]
    pub enabled: bool,

    /// Keywords matched as whole words, case-insensitively
    #[serde(default = "default_high_risk_keywords")]
    pub keywords: Vec<String>,
}

impl Default for HighRiskConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            keywords: default_high_risk_keywords(),
        }
    }
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (file-based or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: DbType::default(),
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            extensions: default_extensions(),
            high_risk: HighRiskConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

fn default_migrations_dir() -> String {
    DEFAULT_MIGRATIONS_DIR.to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_high_risk_keywords() -> Vec<String> {
    DEFAULT_HIGH_RISK_KEYWORDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for sqlup.yml or sqlup.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("sqlup.yml");
        let yaml_path = dir.join("sqlup.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        self.migration_settings().validate()
    }

    /// Absolute path of the migrations directory for a project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Build the runner settings described by this config
    pub fn migration_settings(&self) -> MigrationSettings {
        MigrationSettings {
            extensions: self.extensions.clone(),
            high_risk_keywords: self.high_risk.keywords.clone(),
            high_risk_enabled: self.high_risk.enabled,
        }
    }
}

/// Construction-time settings for a migration run.
///
/// Carries the accepted extensions and the high-risk gate; nothing here
/// changes while a run is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSettings {
    /// Accepted file extensions, without the leading dot
    pub extensions: Vec<String>,

    /// Keywords checked by the high-risk gate
    pub high_risk_keywords: Vec<String>,

    /// Whether the high-risk gate is active
    pub high_risk_enabled: bool,
}

impl Default for MigrationSettings {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            high_risk_keywords: default_high_risk_keywords(),
            high_risk_enabled: false,
        }
    }
}

impl MigrationSettings {
    /// Replace the accepted file extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the high-risk keyword list
    pub fn with_high_risk_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.high_risk_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the high-risk gate
    pub fn with_high_risk_enabled(mut self, enabled: bool) -> Self {
        self.high_risk_enabled = enabled;
        self
    }

    /// Validate extensions and keywords
    pub fn validate(&self) -> CoreResult<()> {
        if self.extensions.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "At least one migration file extension must be specified".to_string(),
            });
        }

        for ext in &self.extensions {
            if ext.is_empty() || ext.contains(['.', '/', '\\']) {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "Invalid extension '{ext}': use a bare extension such as 'sql'"
                    ),
                });
            }
        }

        for keyword in &self.high_risk_keywords {
            let mut words = keyword.split_whitespace().peekable();
            let valid = words.peek().is_some()
                && words.all(|w| w.chars().all(|c| c.is_alphanumeric() || c == '_'));
            if !valid {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "Invalid high-risk keyword '{keyword}': use words made of letters, digits or '_'"
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
