//! Run command implementation

use anyhow::{Context, Result};
use sqlup_core::{Config, MigrationSettings};
use sqlup_runner::{MigrationReport, MigrationRunner, RunFailure};

use crate::cli::{GlobalArgs, RunArgs, RunOutput};
use crate::commands::common::{load_config, print_json, resolve_migrations_dir};

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    if let Some(path) = &args.database {
        config.database.path = path.clone();
    }
    let settings = settings_from_args(&config, args);
    settings.validate().context("Invalid migration settings")?;

    let dir = resolve_migrations_dir(args.dir.as_deref(), &config, global);
    if global.verbose {
        eprintln!(
            "[verbose] Migrations: {} ({}), database: {} {}",
            dir.display(),
            settings.extensions.join(","),
            config.database.db_type,
            config.database.path
        );
    }

    let runner = MigrationRunner::new(settings);
    match runner.run(&dir, &config.database).await {
        Ok(report) => {
            match args.output {
                RunOutput::Json => print_json(&report)?,
                RunOutput::Text => print_report(&report),
            }
            Ok(())
        }
        Err(RunFailure { error, report }) => {
            match args.output {
                RunOutput::Json => print_json(&report)?,
                RunOutput::Text => print_report(&report),
            }
            Err(anyhow::Error::new(error)
                .context(format!("Migration run in {} failed", dir.display())))
        }
    }
}

/// Merge CLI overrides into the config's migration settings
fn settings_from_args(config: &Config, args: &RunArgs) -> MigrationSettings {
    let mut settings = config.migration_settings();
    if let Some(extensions) = &args.extensions {
        settings = settings.with_extensions(extensions.iter().cloned());
    }
    if let Some(keywords) = &args.high_risk_keywords {
        settings = settings.with_high_risk_keywords(keywords.iter().cloned());
    }
    if args.high_risk {
        settings = settings.with_high_risk_enabled(true);
    }
    settings
}

fn print_report(report: &MigrationReport) {
    if report.is_empty() {
        println!("No migrations applied");
        return;
    }

    for file in &report.files {
        let marker = if file.applied { "✓" } else { "✗" };
        println!("{} {}", marker, file.filename);
        for result in &file.statements {
            println!(
                "    [{} row{}] {}",
                result.rows_affected,
                if result.rows_affected == 1 { "" } else { "s" },
                result.statement.trim()
            );
        }
    }

    let applied = report.applied_filenames().len();
    println!();
    println!(
        "Applied {} file{}, {} statement{}",
        applied,
        if applied == 1 { "" } else { "s" },
        report.statement_count(),
        if report.statement_count() == 1 { "" } else { "s" }
    );
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
