//! Integration tests for the bompa CLI subcommands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bompa() -> Command {
    Command::cargo_bin("bompa").unwrap()
}

/// Write `contents` to `name` inside `dir` and return the full path as a string.
fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path: PathBuf = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// defaults
// ---------------------------------------------------------------------------

#[test]
fn defaults_prints_toml() {
    bompa()
        .arg("defaults")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("move_speed = 3.0")
                .and(predicate::str::contains("max_power = 100.0"))
                .and(predicate::str::contains("waypoints")),
        );
}

#[test]
fn defaults_output_is_a_valid_config() {
    let output = bompa().arg("defaults").output().unwrap();
    assert!(output.status.success());

    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "night.toml", &String::from_utf8(output.stdout).unwrap());

    bompa()
        .args(["check", "--config", &config])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_builtin_defaults() {
    bompa()
        .arg("check")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Configuration OK")
                .and(predicate::str::contains("6 waypoints"))
                .and(predicate::str::contains("CAM 6")),
        );
}

#[test]
fn check_lists_named_feeds() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "night.toml",
        r#"
waypoints = [[0.0, 0.0, -20.0], [-4.0, 0.0, -3.0], [4.0, 0.0, -3.0]]

[[camera_feeds]]
name = "Stage"
waypoint = 0
"#,
    );

    bompa()
        .args(["check", "-c", &config])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 waypoints, 1 camera feeds")
                .and(predicate::str::contains("Stage")),
        );
}

#[test]
fn check_rejects_empty_waypoints() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "night.toml", "waypoints = []\n");

    bompa()
        .args(["check", "-c", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("waypoint graph is empty"));
}

#[test]
fn check_rejects_out_of_range_values() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "night.toml", "max_power = -5.0\n");

    bompa()
        .args(["check", "-c", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_power"));
}

#[test]
fn check_rejects_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "night.toml", "move_speed = = 3\n");

    bompa()
        .args(["check", "-c", &config])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn check_reports_missing_file() {
    bompa()
        .args(["check", "-c", "does/not/exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_survives_a_short_shift() {
    bompa()
        .args(["run", "--max-seconds", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("survived").and(predicate::str::contains("shift over")));
}

#[test]
fn run_with_open_doors_gets_caught() {
    bompa()
        .args(["run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caught by Bompa").and(predicate::str::contains("JUMPSCARE")));
}

#[test]
fn run_script_can_drain_the_power() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "night.toml", "max_power = 5.0\n");
    let script = write_file(&dir, "night.script", "# shut it right away\n0 close left\n");

    bompa()
        .args(["run", "-c", &config, "-s", &script])
        .assert()
        .success()
        .stdout(predicate::str::contains("power depleted").and(predicate::str::contains("power out")));
}

#[test]
fn run_honours_shift_duration() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "night.toml", "shift_duration = 3.0\n");

    bompa()
        .args(["run", "-c", &config, "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("survived").and(predicate::str::contains("Event Log")));
}

#[test]
fn run_json_summary() {
    let dir = TempDir::new().unwrap();
    let script = write_file(&dir, "night.script", "0 close left\n1 light right on\n");

    let output = bompa()
        .args(["run", "--json", "--max-seconds", "4", "-s", &script])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["outcome"], "player_survived");
    assert!(summary["remaining_power"].as_f64().unwrap() < 100.0);

    let events = summary["events"].as_array().unwrap();
    let types: Vec<&str> = events
        .iter()
        .filter_map(|e| e["kind"]["type"].as_str())
        .collect();
    assert!(types.contains(&"door_toggled"));
    assert!(types.contains(&"light_changed"));
    assert_eq!(types.last(), Some(&"shift_ended"));
}

#[test]
fn run_coarse_dt_still_catches() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "night.toml",
        "waypoints = [[0.0, 0.0, -10.0], [0.0, 0.0, 10.0], [5.0, 0.0, 20.0], [-5.0, 0.0, 20.0]]\n",
    );

    bompa()
        .args(["run", "-c", &config, "--dt", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caught by Bompa"));
}

#[test]
fn run_json_counts_evicted_events() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "night.toml", "max_events = 2\n");
    let script = write_file(&dir, "night.script", "0 camera\n0.5 camera\n1 camera\n");

    let output = bompa()
        .args(["run", "--json", "--max-seconds", "2", "-c", &config, "-s", &script])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["events"].as_array().unwrap().len(), 2);
    assert!(summary["events_evicted"].as_u64().unwrap() >= 2);
}

#[test]
fn run_reports_script_errors_with_line_numbers() {
    let dir = TempDir::new().unwrap();
    let script = write_file(&dir, "night.script", "0 close left\n2 close middle\n");

    bompa()
        .args(["run", "-s", &script])
        .assert()
        .failure()
        .stderr(predicate::str::contains("script line 2"));
}

#[test]
fn run_rejects_non_positive_dt() {
    bompa()
        .args(["run", "--dt", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dt"));
}
