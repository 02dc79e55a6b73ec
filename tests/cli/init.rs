use crate::cli::support::tagwise;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    tagwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tagwise store"));

    assert!(dir.path().join(".tagwise").is_dir());
    assert!(dir.path().join(".tagwise/tagwise.db").exists());
    assert!(dir.path().join(".tagwise/config.toml").exists());
}

#[test]
fn test_init_writes_default_config() {
    let dir = tempdir().unwrap();

    tagwise().current_dir(dir.path()).arg("init").assert().success();

    let raw = std::fs::read_to_string(dir.path().join(".tagwise/config.toml")).unwrap();
    let config: toml::Table = toml::from_str(&raw).unwrap();
    let recommend = config.get("recommend").unwrap();
    assert_eq!(config.get("version").and_then(|v| v.as_integer()), Some(1));
    assert_eq!(
        recommend.get("max_results").and_then(|v| v.as_integer()),
        Some(5)
    );
    assert_eq!(
        recommend
            .get("activity_window_days")
            .and_then(|v| v.as_integer()),
        Some(30)
    );
    assert_eq!(
        recommend.get("user_pattern_key").and_then(|v| v.as_str()),
        Some("tag")
    );
}

#[test]
fn test_init_idempotent() {
    let dir = tempdir().unwrap();

    tagwise().current_dir(dir.path()).arg("init").assert().success();

    let config_path = dir.path().join(".tagwise/config.toml");
    std::fs::write(&config_path, "[recommend]\nmax_results = 2\n").unwrap();

    tagwise().current_dir(dir.path()).arg("init").assert().success();

    let raw = std::fs::read_to_string(&config_path).unwrap();
    assert!(raw.contains("max_results = 2"));
}

#[test]
fn test_init_explicit_store_path() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("nested/store");

    tagwise()
        .arg("--store")
        .arg(&store)
        .arg("init")
        .assert()
        .success();

    assert!(store.join("tagwise.db").exists());
}

#[test]
fn test_init_json_output() {
    let dir = tempdir().unwrap();

    let output = tagwise()
        .current_dir(dir.path())
        .args(["--format", "json", "init"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["counts"]["tags"], 0);
}
