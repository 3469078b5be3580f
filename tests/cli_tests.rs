//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[test]
fn test_cli_health_help() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("health").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Check the health of a single package"));
}

#[test]
fn test_cli_search_help() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("search").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Search the registry"));
}

#[test]
fn test_cli_compare_help() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("compare").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Compare the health of two packages"));
}

#[test]
fn test_cli_audit_help() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("audit").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Audit every dependency"));
}

#[test]
fn test_cli_health_requires_package_name() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("health");

    cmd.assert().failure();
}

#[test]
fn test_cli_audit_missing_manifest_fails() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("audit")
        .arg("--manifest-path")
        .arg("does/not/exist/Cargo.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_bad_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "not [ valid toml").unwrap();

    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("health")
        .arg("serde");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
#[ignore] // Requires network access
fn test_cli_health_known_package() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("health").arg("serde");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Health Report: serde"))
        .stdout(predicate::str::contains("Verdict:"));
}

#[test]
#[ignore] // Requires network access
fn test_cli_health_unknown_package_exits_nonzero() {
    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("health")
        .arg("this-crate-name-should-not-exist-xyzzy-42");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Health Report").not())
        .stderr(predicate::str::contains("not found"));
}

#[test]
#[ignore] // Requires network access
fn test_cli_audit_sample_project() {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_project")
        .join("Cargo.toml");

    let mut cmd = Command::cargo_bin("crate-pulse").unwrap();
    cmd.arg("audit").arg("--manifest-path").arg(manifest);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Audit Summary"));
}
