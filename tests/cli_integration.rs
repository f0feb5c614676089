//! Integration tests for the CLI surface.

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_help_mentions_session_and_subcommands() {
    let mut cmd = Command::new(cargo_bin("wildwatch"));
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_config_path_prints_toml_path() {
    let mut cmd = Command::new(cargo_bin("wildwatch"));
    cmd.arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_check_fails_without_model_configured() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    // Empty config: model.path and model.labels unset.
    std::fs::File::create(&config_path).unwrap();

    let mut cmd = Command::new(cargo_bin("wildwatch"));
    cmd.arg("--config").arg(&config_path).arg("check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("model.path"));
}

#[test]
fn test_check_reports_missing_model_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(
        config,
        r#"
[model]
path = "{}/missing.onnx"
labels = "{}/missing.txt"
"#,
        dir.path().display(),
        dir.path().display()
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin("wildwatch"));
    cmd.arg("--config").arg(&config_path).arg("check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("model file does not exist"));
}

#[test]
fn test_config_show_redacts_smtp_password() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(
        config,
        r#"
[smtp]
host = "smtp.example.com"
username = "relay"
password = "hunter2"
from_address = "alerts@example.com"
"#
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin("wildwatch"));
    cmd.arg("--config").arg(&config_path).arg("config").arg("show");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("REDACTED"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "this is not valid toml {{").unwrap();

    let mut cmd = Command::new(cargo_bin("wildwatch"));
    cmd.arg("--config").arg(&config_path).arg("check");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}
