//! End-to-end tests of the `shaker` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_app() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "mojits/Nav/assets/common/nav.css", "");
    write(temp.path(), "mojits/Nav/assets/skin/dark/nav-dark.css", "");
    temp
}

fn shaker() -> Command {
    let mut cmd = Command::cargo_bin("shaker").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    shaker()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build").and(predicate::str::contains("check")));
}

#[test]
fn build_writes_meta_file() {
    let app = create_app();
    shaker()
        .current_dir(app.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote"));

    let written = fs::read_to_string(app.path().join("shaker-meta.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    let files = json["mojits"]["Nav"]["*"]["files"].as_object().unwrap();
    assert!(!files.is_empty());
    for list in files.values() {
        assert_eq!(list[0], "mojits/Nav/assets/common/nav.css");
    }
    assert!(files.iter().any(|(selector, list)| {
        selector.ends_with("dark")
            && list.as_array().unwrap().last().unwrap() == "mojits/Nav/assets/skin/dark/nav-dark.css"
    }));
}

#[test]
fn build_accepts_root_and_output_flags() {
    let app = create_app();
    let out = TempDir::new().unwrap();
    let output = out.path().join("meta.json");

    shaker()
        .arg("build")
        .arg("--root")
        .arg(app.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.is_file());
    assert!(!app.path().join("shaker-meta.json").exists());
}

#[test]
fn build_rejects_unknown_facet_in_order() {
    shaker()
        .args(["build", "--order", "common-planet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("planet"));
}

#[test]
fn build_uses_env_order() {
    let app = create_app();
    shaker()
        .current_dir(app.path())
        .env("SHAKER_ORDER", "common-skin")
        .arg("build")
        .assert()
        .success();

    let written = fs::read_to_string(app.path().join("shaker-meta.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert!(json["mojits"]["Nav"]["*"]["files"]["common-dark"].is_array());
    assert!(json["mojits"]["Nav"]["*"]["files"].get("common-*-dark").is_none());
}

#[test]
fn missing_config_file_fails() {
    let app = create_app();
    shaker()
        .current_dir(app.path())
        .args(["build", "--config", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn check_reports_bad_component() {
    let app = create_app();
    write(
        app.path(),
        "mojits/Nav/shaker.json",
        r#"{ "actions": { "log-in": {} } }"#,
    );

    shaker()
        .args(["check", "--root"])
        .arg(app.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nav"));
}

#[test]
fn check_passes_on_valid_app() {
    let app = create_app();
    shaker()
        .args(["check", "--root"])
        .arg(app.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("All checks passed"));
}
