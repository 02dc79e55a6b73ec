use crate::cli::support::{init_store, recommend_target, reference_store, tagwise};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn recommend_json(dir: &Path, args: &[String]) -> serde_json::Value {
    let output = tagwise()
        .current_dir(dir)
        .args(["--format", "json"])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn tag_ids(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|r| r["tag"]["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_recommend_reference_scenario() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    let json = recommend_json(dir.path(), &recommend_target("u-1"));

    assert_eq!(tag_ids(&json), vec!["B", "C"]);
    let b = &json[0];
    assert!((b["score"].as_f64().unwrap() - 0.4).abs() < 1e-9);
    assert_eq!(b["reason"], "Often used together with the current tags");
    assert_eq!(b["cooccurringTags"], serde_json::json!(["alpha"]));
    assert_eq!(b["reasons"][0]["signalType"], "co_occurrence");
    assert_eq!(b["reasons"][1]["signalType"], "popularity");

    let c = &json[1];
    assert!((c["score"].as_f64().unwrap() - 0.05).abs() < 1e-9);
    assert_eq!(c["reason"], "Popular in this workspace");
    assert!(c.get("cooccurringTags").is_none());
}

#[test]
fn test_recommend_human_output() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .args(recommend_target("u-1"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. beta [B] 0.400  Often used together with the current tags",
        ))
        .stdout(predicate::str::contains("used with: alpha"))
        .stdout(predicate::str::contains("2. gamma [C] 0.050  Popular in this workspace"));
}

#[test]
fn test_recommend_user_pattern_within_window() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    let json = recommend_json(dir.path(), &recommend_target("u-2"));

    // D was added by u-2 six days earlier; C only outside the window
    assert_eq!(tag_ids(&json), vec!["B", "D", "C"]);
    let d = &json[1];
    assert!((d["score"].as_f64().unwrap() - 0.2).abs() < 1e-9);
    assert_eq!(d["reason"], "You frequently use this tag");
    assert!((json[2]["score"].as_f64().unwrap() - 0.05).abs() < 1e-9);
}

#[test]
fn test_recommend_limit() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    let mut args = recommend_target("u-1");
    args.extend(["--limit".to_string(), "1".to_string()]);
    let json = recommend_json(dir.path(), &args);

    assert_eq!(tag_ids(&json), vec!["B"]);
}

#[test]
fn test_recommend_all_tags_applied() {
    let dir = tempdir().unwrap();
    reference_store(dir.path());

    tagwise()
        .current_dir(dir.path())
        .args([
            "recommend", "--workspace", "w-1", "--entity", "target", "--kind", "project",
            "--user", "u-1", "--tag", "A", "--tag", "B", "--tag", "C", "--tag", "D",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no recommendations available"));
}

#[test]
fn test_recommend_empty_store_json_is_empty_array() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    let json = recommend_json(dir.path(), &recommend_target("u-1"));
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn test_recommend_content_and_similar_items() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    let dataset = dir.path().join("web.json");
    std::fs::write(
        &dataset,
        r#"{
            "tags": [{"id": "W", "workspaceId": "w-1", "name": "web"}],
            "entities": [
                {"id": "p-1", "type": "project", "name": "Website redesign", "workspaceId": "w-1"},
                {"id": "p-2", "type": "project", "name": "Website launch", "workspaceId": "w-1"},
                {"id": "f-1", "type": "folder", "name": "Website assets", "workspaceId": "w-1"}
            ],
            "associations": [
                {"tagId": "W", "workspaceId": "w-1", "entity": {"id": "p-2", "type": "project"}}
            ],
            "vectors": {
                "entities": [
                    {"entity": {"id": "p-1", "type": "project"}, "vector": [1.0, 0.0]}
                ],
                "tags": {"W": [1.0, 0.0]}
            }
        }"#,
    )
    .unwrap();
    tagwise()
        .current_dir(dir.path())
        .arg("load")
        .arg(&dataset)
        .assert()
        .success();

    let args: Vec<String> = [
        "recommend", "--workspace", "w-1", "--entity", "p-1", "--kind", "project", "--user",
        "u-1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let json = recommend_json(dir.path(), &args);

    assert_eq!(tag_ids(&json), vec!["W"]);
    let w = &json[0];
    assert!((w["score"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    assert_eq!(w["reason"], "Similar to the content of this item");
    assert_eq!(
        w["similarItems"],
        serde_json::json!([{"id": "p-2", "name": "Website launch", "type": "project"}])
    );

    tagwise()
        .current_dir(dir.path())
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("seen on: Website launch (project)"));
}
