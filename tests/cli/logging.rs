use crate::cli::support::{reference_store, tagwise};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .args(["--log-level", "debug", "tags", "--workspace", "w-1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_log_level_warn_hides_debug_messages() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .args(["--log-level", "warn", "tags", "--workspace", "w-1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}

#[test]
fn test_verbose_logs_signal_timing() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    let mut args = vec!["--verbose".to_string()];
    args.extend(crate::cli::support::recommend_target("u-1"));

    tagwise()
        .current_dir(dir.path())
        .args(&args)
        .assert()
        .success()
        .stderr(predicate::str::contains("signal_scored"))
        .stderr(predicate::str::contains("co_occurrence"));
}

#[test]
fn test_log_json_emits_json_lines() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    let output = tagwise()
        .current_dir(dir.path())
        .args(["--log-level", "debug", "--log-json", "tags", "--workspace", "w-1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap();
    let line: serde_json::Value = serde_json::from_str(first).unwrap();
    assert!(line.get("level").is_some());
}

#[test]
fn test_env_filter_override() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .env("TAGWISE_LOG", "debug")
        .args(["tags", "--workspace", "w-1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}
