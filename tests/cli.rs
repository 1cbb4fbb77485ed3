use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cnf_backup(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cnf-backup").unwrap();
    cmd.env("CNF_BACKUP_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG");
    cmd
}

fn seed(dir: &Path, stamps: &[&str]) -> std::path::PathBuf {
    let file = dir.join("my.cnf");
    fs::write(&file, "[mysqld]\n").unwrap();
    for stamp in stamps {
        fs::write(dir.join(format!("my.cnf.{}", stamp)), "old").unwrap();
    }
    file
}

fn backups(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("my.cnf."))
        .collect();
    names.sort();
    names
}

#[test]
fn test_run_snapshots_and_prunes() {
    let temp = TempDir::new().unwrap();
    let file = seed(
        temp.path(),
        &["20040430185242", "20050430185242", "20060430185242"],
    );

    cnf_backup(&temp.path().join("config"))
        .args(["run", "--releases", "2"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created:"))
        .stdout(predicate::str::contains("Deleted 2 old backup(s)"));

    assert!(!file.exists());
    let remaining = backups(temp.path());
    assert_eq!(remaining.len(), 2);
    assert!(remaining.contains(&"my.cnf.20060430185242".to_string()));
}

#[test]
fn test_run_no_delete_keeps_everything() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), &["20040430185242", "20050430185242"]);

    cnf_backup(&temp.path().join("config"))
        .args(["run", "--releases", "1", "--no-delete"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Retention skipped"));

    assert_eq!(backups(temp.path()).len(), 3);
}

#[test]
fn test_run_missing_file_fails() {
    let temp = TempDir::new().unwrap();

    cnf_backup(&temp.path().join("config"))
        .arg("run")
        .arg(temp.path().join("absent.cnf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file found"));
}

#[test]
fn test_negative_releases_rejected() {
    let temp = TempDir::new().unwrap();
    let file = seed(temp.path(), &[]);

    cnf_backup(&temp.path().join("config"))
        .args(["run", "--releases", "-1"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));

    assert!(file.exists());
}

#[test]
fn test_list_skips_malformed_names() {
    let temp = TempDir::new().unwrap();
    let file = seed(
        temp.path(),
        &["20050430185242", "200a0430185243", "20080430185242"],
    );

    cnf_backup(&temp.path().join("config"))
        .args(["list", "--releases", "1"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 backup(s), 1 kept, 1 to delete"))
        .stdout(predicate::str::contains("200a0430185243").not());
}

#[test]
fn test_prune_needs_force() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config");
    let file = seed(
        temp.path(),
        &["20040430185242", "20050430185242", "20060430185242"],
    );

    cnf_backup(&config)
        .args(["prune", "--releases", "1"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(backups(temp.path()).len(), 3);

    cnf_backup(&config)
        .args(["prune", "--releases", "1", "--force"])
        .arg(&file)
        .assert()
        .success();
    assert_eq!(backups(temp.path()), vec!["my.cnf.20060430185242"]);
    assert!(file.exists());
}

#[test]
fn test_history_shows_run() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config");
    let file = seed(temp.path(), &[]);

    cnf_backup(&config)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No backup activity recorded."));

    cnf_backup(&config).arg("run").arg(&file).assert().success();

    cnf_backup(&config)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("SNAPSHOT"));
}

#[test]
fn test_settings_release_count_applies() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config");
    fs::create_dir_all(&config).unwrap();
    fs::write(
        config.join("config.json"),
        r#"{"release_count": 1, "audit_enabled": false}"#,
    )
    .unwrap();
    let file = seed(temp.path(), &["20040430185242", "20050430185242"]);

    cnf_backup(&config).arg("run").arg(&file).assert().success();

    assert_eq!(backups(temp.path()).len(), 1);
    assert!(!config.join("audit.log").exists());
}

#[test]
fn test_config_command() {
    let temp = TempDir::new().unwrap();

    cnf_backup(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Release count: 5"));
}
