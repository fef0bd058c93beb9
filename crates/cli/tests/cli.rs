//! End-to-end tests for the `stash` binary
//!
//! These only cover commands that do not reach a storage server: path
//! normalization, configuration errors and completion generation.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::TempDir;

fn stash(args: &[&str], config_dir: &TempDir) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stash"))
        .args(args)
        .env("STASH_CONFIG_DIR", config_dir.path())
        .env_remove("STASH_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute stash")
}

#[test]
fn test_path_normalizes_backslashes() {
    let dir = TempDir::new().unwrap();
    let output = stash(&["path", "a\\b\\c"], &dir);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a/b/c\n");
}

#[test]
fn test_path_json() {
    let dir = TempDir::new().unwrap();
    let output = stash(&["--json", "path", "docs\\report.pdf"], &dir);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    insta::assert_json_snapshot!(json, @r#"
    {
      "input": "docs\\report.pdf",
      "normalized": "docs/report.pdf"
    }
    "#);
}

#[test]
fn test_missing_default_config() {
    let dir = TempDir::new().unwrap();
    let output = stash(&["exists", "a/b"], &dir);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
    assert!(stderr.contains("config.toml"));
}

#[test]
fn test_invalid_config_json_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("storage.json");
    let mut file = std::fs::File::create(&config_path).unwrap();
    file.write_all(
        br#"{
            "client": {
                "credentials": {"key": "k", "secret": "s"},
                "region": "us-east-1",
                "version": "2010-01-01"
            },
            "bucket": "media"
        }"#,
    )
    .unwrap();

    let output = stash(
        &[
            "--json",
            "--config",
            config_path.to_str().unwrap(),
            "mkdir",
            "photos",
        ],
        &dir,
    );

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stderr).expect("Error output should be valid JSON");
    insta::assert_json_snapshot!(json, @r#"
    {
      "error": "Failed to load configuration: Configuration error: unsupported API version '2010-01-01', expected one of: latest, 2006-03-01"
    }
    "#);
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let output = stash(&["completions", "bash"], &dir);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("stash"));
}
