//! Migration execution

use crate::error::{MigrateError, MigrateResult, RunFailure};
use crate::report::{FileReport, MigrationReport, StatementResult};
use sqlup_core::config::{DatabaseConfig, MigrationSettings};
use sqlup_core::file_set::{discover_migrations, ensure_readable_dir, MigrationFile};
use sqlup_core::lock::{lock_path, LockRecord};
use sqlup_core::risk::RiskClassifier;
use sqlup_core::sql_text::{normalize, split_statements};
use sqlup_db::Database;
use std::collections::BTreeSet;
use std::path::Path;

/// Applies the migration files of a directory exactly once each.
///
/// Files run one at a time in ascending filename order and statements within
/// a file run one at a time in textual order. The first failure stops the
/// run. The lock file is rewritten once at the end of every run that got as
/// far as loading it, so files completed before a failure stay applied.
///
/// Only one runner may work on a directory at a time; nothing guards the lock
/// file against concurrent runs.
pub struct MigrationRunner {
    settings: MigrationSettings,
    risk: RiskClassifier,
}

impl MigrationRunner {
    /// Create a runner from construction-time settings
    pub fn new(settings: MigrationSettings) -> Self {
        let risk = RiskClassifier::new(&settings.high_risk_keywords);
        Self { settings, risk }
    }

    /// Settings this runner was built with
    pub fn settings(&self) -> &MigrationSettings {
        &self.settings
    }

    /// Run migrations in `dir` against the database described by `db_config`.
    ///
    /// The directory is checked before the database is opened; the
    /// connection is opened once and shared by every statement of the run.
    pub async fn run(
        &self,
        dir: &Path,
        db_config: &DatabaseConfig,
    ) -> Result<MigrationReport, RunFailure> {
        ensure_readable_dir(dir)?;
        let db = sqlup_db::connect(db_config).map_err(MigrateError::Connection)?;
        log::debug!("Connected to {} database", db.db_type());
        self.run_with_database(dir, db.as_ref()).await
    }

    /// Run migrations in `dir` against an already open database.
    pub async fn run_with_database(
        &self,
        dir: &Path,
        db: &dyn Database,
    ) -> Result<MigrationReport, RunFailure> {
        ensure_readable_dir(dir)?;
        let files = discover_migrations(dir, &self.settings.extensions)?;

        let lock_file = lock_path(dir);
        let mut lock = LockRecord::load(&lock_file)?;
        let applied: BTreeSet<String> = lock
            .applied_filenames()
            .into_iter()
            .map(str::to_string)
            .collect();
        log::info!(
            "Found {} migration file(s) in {}, {} already applied",
            files.len(),
            dir.display(),
            files
                .iter()
                .filter(|f| applied.contains(&f.filename))
                .count()
        );

        let mut report = MigrationReport::default();
        let outcome = self
            .apply_pending(&files, &applied, db, &mut lock, &mut report)
            .await;
        let saved = lock.save(&lock_file);

        match (outcome, saved) {
            (Ok(()), Ok(())) => Ok(report),
            (Ok(()), Err(save_err)) => Err(RunFailure {
                error: save_err.into(),
                report,
            }),
            (Err(error), saved) => {
                if let Err(save_err) = saved {
                    log::warn!("Failed to record progress in lock file: {save_err}");
                }
                Err(RunFailure { error, report })
            }
        }
    }

    async fn apply_pending(
        &self,
        files: &[MigrationFile],
        applied: &BTreeSet<String>,
        db: &dyn Database,
        lock: &mut LockRecord,
        report: &mut MigrationReport,
    ) -> MigrateResult<()> {
        for file in files {
            if applied.contains(&file.filename) {
                log::debug!("Skipping {} (already applied)", file.filename);
                continue;
            }
            self.apply_file(file, db, report).await?;
            lock.mark_applied(file.filename.as_str());
            log::info!("Applied {}", file.filename);
        }
        Ok(())
    }

    /// Execute one file, appending its results to `report`.
    ///
    /// A file rejected by the high-risk gate is not added to the report. A
    /// file that fails mid-way is added with the statements that succeeded.
    async fn apply_file(
        &self,
        file: &MigrationFile,
        db: &dyn Database,
        report: &mut MigrationReport,
    ) -> MigrateResult<()> {
        let normalized = normalize(&file.read()?);
        let statements = split_statements(&normalized);

        if self.settings.high_risk_enabled {
            if let Some(keyword) = self.risk.find_keyword(&normalized) {
                return Err(MigrateError::HighRiskRejected {
                    file: file.filename.clone(),
                    keyword: keyword.to_string(),
                });
            }
        }

        let mut file_report = FileReport::new(file.filename.as_str());
        for statement in statements {
            log::debug!("{}: {}", file.filename, statement);
            match db.execute(statement).await {
                Ok(rows_affected) => file_report.statements.push(StatementResult {
                    statement: statement.to_string(),
                    rows_affected,
                }),
                Err(source) => {
                    report.files.push(file_report);
                    return Err(MigrateError::StatementFailed {
                        file: file.filename.clone(),
                        statement: statement.to_string(),
                        source,
                    });
                }
            }
        }

        file_report.applied = true;
        report.files.push(file_report);
        Ok(())
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
