use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::{Path, PathBuf};

/// Get a Command for tagwise
pub fn tagwise() -> Command {
    let mut cmd = cargo_bin_cmd!("tagwise");
    cmd.env_remove("TAGWISE_STORE")
        .env_remove("TAGWISE_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Path of a dataset under tests/fixtures
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Initialize a store in `dir`
pub fn init_store(dir: &Path) {
    tagwise().current_dir(dir).arg("init").assert().success();
}

/// Initialize a store in `dir` and load the reference dataset
pub fn reference_store(dir: &Path) {
    init_store(dir);
    tagwise()
        .current_dir(dir)
        .arg("load")
        .arg(fixture("reference.json"))
        .assert()
        .success();
}

/// Arguments for recommending tags for the reference target project
pub fn recommend_target(user: &str) -> Vec<String> {
    [
        "recommend",
        "--workspace",
        "w-1",
        "--entity",
        "target",
        "--kind",
        "project",
        "--user",
        user,
        "--tag",
        "A",
        "--at",
        "2026-10-01T12:00:00Z",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
