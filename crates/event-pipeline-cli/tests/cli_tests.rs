//! CLI integration tests for event-pipeline.
//!
//! These tests verify command-line argument parsing, exit codes, and a
//! full run over a temporary container file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Get a command for the event-pipeline binary.
fn cmd() -> Command {
    Command::cargo_bin("event-pipeline").unwrap()
}

/// Write a jsonl container with `n` events, each `{"n": i}`.
fn write_container(path: &Path, n: usize) {
    let mut file = File::create(path).unwrap();
    writeln!(file, r#"{{"fields":[{{"name":"n","kind":"int"}}]}}"#).unwrap();
    for i in 0..n {
        writeln!(file, r#"{{"n":{}}}"#, i).unwrap();
    }
}

/// Write a config YAML pairing the given inputs and outputs.
fn write_config(path: &Path, inputs: &[String], outputs: &[String]) {
    let mut file = File::create(path).unwrap();
    writeln!(file, "input_files:").unwrap();
    for input in inputs {
        writeln!(file, "  - {}", input).unwrap();
    }
    if !outputs.is_empty() {
        writeln!(file, "output_files:").unwrap();
        for output in outputs {
            writeln!(file, "  - {}", output).unwrap();
        }
    }
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_run_subcommand_help() {
    cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("--select"))
        .stdout(predicate::str::contains("--output-json"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("event-pipeline"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_invalid_config_exits_with_2() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "input_files: []\n").unwrap();

    cmd()
        .args(["--config", config.to_str().unwrap(), "run"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_input_file_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    write_config(
        &config,
        &[dir.path().join("no_such.jsonl").to_string_lossy().into_owned()],
        &[],
    );

    cmd()
        .args(["--config", config.to_str().unwrap(), "run"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Run finished with failures"));
}

// =============================================================================
// Run Tests
// =============================================================================

#[test]
fn test_run_copies_records_to_paired_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("run_001.jsonl");
    let output = dir.path().join("out_001.jsonl");
    let config = dir.path().join("config.yaml");
    write_container(&input, 3);
    write_config(
        &config,
        &[input.to_string_lossy().into_owned()],
        &[output.to_string_lossy().into_owned()],
    );

    cmd()
        .args(["--config", config.to_str().unwrap(), "run", "--output-json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"completed\""))
        .stdout(predicate::str::contains("\"events_processed\": 3"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 4); // schema header + 3 records
}

#[test]
fn test_run_respects_event_limit_override() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("run_001.jsonl");
    let config = dir.path().join("config.yaml");
    write_container(&input, 5);
    write_config(&config, &[input.to_string_lossy().into_owned()], &[]);

    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "run",
            "--limit",
            "2",
            "--output-json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"events_processed\": 2"));
}

// =============================================================================
// Validate Tests
// =============================================================================

#[test]
fn test_validate_succeeds_on_good_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("run_001.jsonl");
    let config = dir.path().join("config.yaml");
    write_container(&input, 1);
    write_config(&config, &[input.to_string_lossy().into_owned()], &[]);

    cmd()
        .args(["--config", config.to_str().unwrap(), "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation completed successfully"));
}

#[test]
fn test_validate_fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    write_config(
        &config,
        &[dir.path().join("no_such.jsonl").to_string_lossy().into_owned()],
        &[],
    );

    cmd()
        .args(["--config", config.to_str().unwrap(), "validate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot open"));
}
