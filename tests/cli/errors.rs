use crate::cli::support::{recommend_target, reference_store, tagwise};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_missing_store_exit_code() {
    let dir = tempdir().unwrap();

    tagwise()
        .current_dir(dir.path())
        .args(recommend_target("u-1"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error: store not found"));
}

#[test]
fn test_missing_store_json_envelope() {
    let dir = tempdir().unwrap();

    let output = tagwise()
        .current_dir(dir.path())
        .args(["--format", "json", "tags", "--workspace", "w-1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "store_not_found");
    assert_eq!(json["error"]["code"], 3);
}

#[test]
fn test_quiet_suppresses_error_message() {
    let dir = tempdir().unwrap();

    tagwise()
        .current_dir(dir.path())
        .args(["--quiet", "tags", "--workspace", "w-1"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_limit_out_of_range_is_usage_error() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    let mut args = recommend_target("u-1");
    args.extend(["--limit".to_string(), "9".to_string()]);

    tagwise()
        .current_dir(dir.path())
        .args(&args)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_results"));
}

#[test]
fn test_invalid_config_is_usage_error() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());
    std::fs::write(
        dir.path().join(".tagwise/config.toml"),
        "[recommend]\ncontent_threshold = 3.0\n",
    )
    .unwrap();

    tagwise()
        .current_dir(dir.path())
        .args(recommend_target("u-1"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("content_threshold"));
}

#[test]
fn test_template_kind_rejected() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .args([
            "recommend", "--workspace", "w-1", "--entity", "T1", "--kind", "template", "--user",
            "u-1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("templates cannot receive recommendations"));
}

#[test]
fn test_usage_error_json_envelope() {
    let output = tagwise()
        .args(["--format", "json", "recommend", "--workspace", "w-1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_usage_error_json_envelope_with_equals_form_after_subcommand() {
    let output = tagwise()
        .args(["recommend", "--workspace", "w-1", "--format=json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "usage_error");
}

#[test]
fn test_invalid_window_config_is_usage_error() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());
    std::fs::write(
        dir.path().join(".tagwise/config.toml"),
        "[recommend]\nactivity_window_days = 9223372036854775807\n",
    )
    .unwrap();

    tagwise()
        .current_dir(dir.path())
        .args(recommend_target("u-1"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("activity_window_days"));
}
