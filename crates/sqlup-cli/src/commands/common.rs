//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use serde::Serialize;
use sqlup_core::Config;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs turns this into the process exit code
        // without printing it.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project config.
///
/// An explicit `--config` path must exist. Without one, `sqlup.yml` in the
/// project directory is used when present, otherwise defaults apply.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let project_dir = &global.project_dir;
    if project_dir.join("sqlup.yml").exists() || project_dir.join("sqlup.yaml").exists() {
        return Config::load_from_dir(project_dir).context("Failed to load project config");
    }

    log::debug!(
        "No sqlup.yml in {}, using default config",
        project_dir.display()
    );
    Ok(Config::default())
}

/// Resolve the migrations directory: an explicit argument wins, otherwise
/// `migrations_dir` from the config relative to the project directory.
pub(crate) fn resolve_migrations_dir(
    dir: Option<&Path>,
    config: &Config,
    global: &GlobalArgs,
) -> PathBuf {
    match dir {
        Some(dir) => dir.to_path_buf(),
        None => config.migrations_dir_absolute(&global.project_dir),
    }
}

/// Print a value as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
