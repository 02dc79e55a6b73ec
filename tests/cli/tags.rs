use crate::cli::support::{reference_store, tagwise};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_tags_lists_workspace_tags() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .args(["tags", "--workspace", "w-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A alpha (#3366ff)"))
        .stdout(predicate::str::contains("D delta"))
        .stdout(predicate::str::contains("elsewhere").not());
}

#[test]
fn test_tags_json() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    let output = tagwise()
        .current_dir(dir.path())
        .args(["--format", "json", "tags", "--workspace", "w-2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tags = json.as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "elsewhere");
    assert_eq!(tags[0]["workspaceId"], "w-2");
}

#[test]
fn test_tags_empty_workspace() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .args(["tags", "--workspace", "w-empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags in workspace w-empty"));
}
