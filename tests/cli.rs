use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;
fn repocat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_repocat"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}
#[test]
fn cli_missing_root_prints_usage() {
    let output = repocat(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
    assert!(output.stdout.is_empty());
}
#[test]
fn cli_document_on_stdout_diagnostics_on_stderr() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n").unwrap();
    fs::write(dir.path().join("main_test.go"), "package main\n").unwrap();
    fs::write(dir.path().join("logo.png"), [0u8, 1, 2]).unwrap();
    let root = dir.path().to_str().unwrap();
    let output = repocat(&["-v", "-t", "-c", root]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.starts_with("Directory Structure:\n"));
    assert!(stdout.contains("Content of main.go:\npackage main\n"));
    assert!(!stdout.contains("main_test.go"));
    assert!(!stdout.contains("Processing"));
    assert!(!stdout.contains("Total tokens"));
    assert!(stderr.contains("Processing: main.go"));
    assert!(stderr.contains("Skipping forbidden (binary) file: logo.png"));
    assert!(stderr.contains("Total tokens:"));
    assert!(!stderr.contains("Directory Structure"));
}
#[test]
fn cli_file_types_and_excludes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n").unwrap();
    fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
    fs::create_dir(dir.path().join("vendor")).unwrap();
    fs::write(dir.path().join("vendor/lib.go"), "package lib\n").unwrap();
    let root = dir.path().to_str().unwrap();
    let output = repocat(&["-e", "vendor/", root, ".go"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("File: main.go"));
    assert!(!stdout.contains("README.md"));
    assert!(!stdout.contains("vendor"));
}
#[test]
fn cli_root_not_found_exit_code() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let output = repocat(&[missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("root path not found"));
}
#[test]
fn cli_unknown_model_rejected() {
    let dir = tempdir().unwrap();
    let output = repocat(&["-c", "-m", "no-such-model", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
