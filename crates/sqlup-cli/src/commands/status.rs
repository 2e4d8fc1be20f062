//! Status command implementation

use anyhow::{Context, Result};
use sqlup_runner::{FileState, MigrationRunner, MigrationStatus};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_config, print_json, resolve_migrations_dir, ExitCode};

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let mut settings = config.migration_settings();
    if let Some(extensions) = &args.extensions {
        settings = settings.with_extensions(extensions.iter().cloned());
    }
    settings.validate().context("Invalid migration settings")?;

    let dir = resolve_migrations_dir(args.dir.as_deref(), &config, global);
    let status = MigrationRunner::new(settings)
        .status(&dir)
        .with_context(|| format!("Failed to read migration status for {}", dir.display()))?;

    match args.output {
        StatusOutput::Json => print_json(&status)?,
        StatusOutput::Table => print_table(&status),
    }

    if args.fail_on_pending && status.count(FileState::Pending) > 0 {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

fn print_table(status: &MigrationStatus) {
    if status.entries.is_empty() {
        println!("No migrations found");
        return;
    }

    let name_width = status
        .entries
        .iter()
        .map(|e| e.filename.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!("{:<name_width$}  STATE", "FILE", name_width = name_width);
    println!("{:-<name_width$}  {}", "", "-".repeat(8), name_width = name_width);
    for entry in &status.entries {
        println!(
            "{:<name_width$}  {}",
            entry.filename,
            entry.state,
            name_width = name_width
        );
    }

    println!();
    println!(
        "{} applied, {} pending, {} orphaned",
        status.count(FileState::Applied),
        status.count(FileState::Pending),
        status.count(FileState::Orphaned)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn status_args(fail_on_pending: bool) -> StatusArgs {
        StatusArgs {
            dir: None,
            extensions: None,
            fail_on_pending,
            output: StatusOutput::Table,
        }
    }

    fn global_for(project_dir: &std::path::Path) -> GlobalArgs {
        GlobalArgs {
            verbose: false,
            project_dir: project_dir.to_path_buf(),
            config: None,
        }
    }

    #[tokio::test]
    async fn test_status_fail_on_pending_returns_exit_code() {
        let project = tempdir().unwrap();
        let migrations = project.path().join("migrations");
        fs::create_dir(&migrations).unwrap();
        fs::write(migrations.join("001.sql"), "SELECT 1;").unwrap();

        let err = execute(&status_args(true), &global_for(project.path()))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ExitCode>().map(|c| c.0), Some(1));

        assert!(execute(&status_args(false), &global_for(project.path()))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_status_all_applied_passes_check() {
        let project = tempdir().unwrap();
        let migrations = project.path().join("migrations");
        fs::create_dir(&migrations).unwrap();
        fs::write(migrations.join("001.sql"), "SELECT 1;").unwrap();
        fs::write(migrations.join("sql.lock"), r#"{"001.sql":1}"#).unwrap();

        assert!(execute(&status_args(true), &global_for(project.path()))
            .await
            .is_ok());
    }
}
