use crate::cli::support::{fixture, init_store, tagwise};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_load_reports_counts() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .arg("load")
        .arg(fixture("reference.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Loaded 5 tags, 3 entities, 6 associations, 2 activities, 0 vectors",
        ));
}

#[test]
fn test_load_writes_rows() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .arg("load")
        .arg(fixture("reference.json"))
        .assert()
        .success();

    let conn = rusqlite::Connection::open(dir.path().join(".tagwise/tagwise.db")).unwrap();
    let templates: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM tag_associations WHERE entity_kind = 'template'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(templates, 1);
}

#[test]
fn test_load_twice_does_not_duplicate() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    for _ in 0..2 {
        tagwise()
            .current_dir(dir.path())
            .arg("load")
            .arg(fixture("reference.json"))
            .assert()
            .success();
    }

    let output = tagwise()
        .current_dir(dir.path())
        .args(["--format", "json", "init"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["counts"]["associations"], 6);
    assert_eq!(json["counts"]["activities"], 2);
}

#[test]
fn test_load_rejects_unknown_tag() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    let dataset = dir.path().join("bad.json");
    std::fs::write(
        &dataset,
        r#"{"associations": [{"tagId": "nope", "workspaceId": "w-1", "entity": {"id": "p-1", "type": "project"}}]}"#,
    )
    .unwrap();

    tagwise()
        .current_dir(dir.path())
        .arg("load")
        .arg(&dataset)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tag nope is not defined"));
}

#[test]
fn test_load_malformed_json() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    let dataset = dir.path().join("broken.json");
    std::fs::write(&dataset, "{ not json").unwrap();

    tagwise()
        .current_dir(dir.path())
        .arg("load")
        .arg(&dataset)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("JSON error"));
}
