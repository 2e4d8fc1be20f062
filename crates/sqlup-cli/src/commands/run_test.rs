use super::*;
use sqlup_core::lock::{LockRecord, LOCK_FILE_NAME};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn run_args(dir: Option<PathBuf>) -> RunArgs {
    RunArgs {
        dir,
        database: None,
        extensions: None,
        high_risk: false,
        high_risk_keywords: None,
        output: RunOutput::Text,
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
async fn test_run_uses_default_migrations_dir() {
    let project = tempdir().unwrap();
    let migrations = project.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    fs::write(migrations.join("001.sql"), "CREATE TABLE t (id INTEGER);").unwrap();

    execute(&run_args(None), &global_for(project.path()))
        .await
        .unwrap();

    let lock = LockRecord::load(&migrations.join(LOCK_FILE_NAME)).unwrap();
    assert!(lock.is_applied("001.sql"));
}

#[tokio::test]
async fn test_run_reads_project_config() {
    let project = tempdir().unwrap();
    fs::write(
        project.path().join("sqlup.yml"),
        "migrations_dir: sql\nextensions: [ddl]\n",
    )
    .unwrap();
    let migrations = project.path().join("sql");
    fs::create_dir(&migrations).unwrap();
    fs::write(migrations.join("001.ddl"), "CREATE TABLE t (id INTEGER);").unwrap();
    fs::write(migrations.join("002.sql"), "CREATE TABLE u (id INTEGER);").unwrap();

    execute(&run_args(None), &global_for(project.path()))
        .await
        .unwrap();

    let lock = LockRecord::load(&migrations.join(LOCK_FILE_NAME)).unwrap();
    assert!(lock.is_applied("001.ddl"));
    assert!(lock.flag("002.sql").is_none());
}

#[tokio::test]
async fn test_run_high_risk_flag_rejects() {
    let project = tempdir().unwrap();
    let migrations = project.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    fs::write(migrations.join("001.sql"), "DROP TABLE IF EXISTS t;").unwrap();

    let mut args = run_args(Some(migrations.clone()));
    args.high_risk = true;

    let err = execute(&args, &global_for(project.path()))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("high-risk"));

    let lock = LockRecord::load(&migrations.join(LOCK_FILE_NAME)).unwrap();
    assert!(lock.is_empty());
}

#[tokio::test]
async fn test_run_missing_directory_fails() {
    let project = tempdir().unwrap();
    let err = execute(&run_args(None), &global_for(project.path()))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("[E003]"));
}

#[tokio::test]
async fn test_run_rejects_invalid_extension_override() {
    let project = tempdir().unwrap();
    fs::create_dir(project.path().join("migrations")).unwrap();

    let mut args = run_args(None);
    args.extensions = Some(vec![".sql".to_string()]);

    assert!(execute(&args, &global_for(project.path())).await.is_err());
}

#[test]
fn test_settings_from_args_overrides_config() {
    let config = Config::default();
    let mut args = run_args(None);
    args.extensions = Some(vec!["sql".to_string()]);
    args.high_risk_keywords = Some(vec!["alter".to_string()]);
    args.high_risk = true;

    let settings = settings_from_args(&config, &args);
    assert_eq!(settings.extensions, vec!["sql"]);
    assert_eq!(settings.high_risk_keywords, vec!["alter"]);
    assert!(settings.high_risk_enabled);
}

#[test]
fn test_settings_from_args_keeps_config_when_unset() {
    let config = config_with_gate_enabled();
    let settings = settings_from_args(&config, &run_args(None));
    assert_eq!(settings, config.migration_settings());
}

fn config_with_gate_enabled() -> Config {
    let mut config = Config::default();
    config.high_risk.enabled = true;
    config.extensions = vec!["sql".to_string()];
    config
}
