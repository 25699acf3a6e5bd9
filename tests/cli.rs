//! Exit status and output of the `wob-catalog` binary.

use std::{fs, path::Path, process::{Command, Output}};

const CLEAN: &str = r#"{
  "version": "0.1",
  "TAGS": ["click", "drag", "mouse"],
  "envs": [
    {"id": "wob.mini.ClickButton-v0", "filename": "click-button", "tags": ["click"], "description": "Click on a specific button."},
    {"id": "wob.mini.EnterText-v0", "filename": "enter-text", "tags": [], "description": "Enter given text."}
  ]
}"#;

/// Runs the binary with an empty workspace so no local config leaks in.
fn run(workspace: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wob-catalog"))
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run wob-catalog")
}

#[test]
fn builtin_catalog_fails_on_its_ordering_break() {
    let ws = tempfile::tempdir().unwrap();
    let out = run(ws.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("These envs are not sorted alphabetically by env \"ID\":"));
    assert!(stdout.contains("wob.mini.AnExperiment-v0"));
}

#[test]
fn clean_catalog_exits_zero_with_no_report() {
    let ws = tempfile::tempdir().unwrap();
    let path = ws.path().join("miniwobs.json");
    fs::write(&path, CLEAN).unwrap();
    let out = run(ws.path(), &["check", "--catalog", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn json_format_writes_three_lines() {
    let ws = tempfile::tempdir().unwrap();
    let path = ws.path().join("miniwobs.json");
    fs::write(&path, CLEAN).unwrap();
    let out = run(ws.path(), &["check", "--catalog", path.to_str().unwrap(), "--format", "json"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8(out.stdout).unwrap().lines().count(), 3);
}

#[test]
fn missing_catalog_exits_two() {
    let ws = tempfile::tempdir().unwrap();
    let path = ws.path().join("absent.json");
    let out = run(ws.path(), &["check", "--catalog", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8(out.stderr).unwrap().contains("load catalog"));
}

#[test]
fn relative_config_path_resolves_against_workspace() {
    let ws = tempfile::tempdir().unwrap();
    fs::create_dir_all(ws.path().join(".wob-catalog")).unwrap();
    fs::write(ws.path().join(".wob-catalog/config.toml"), "[catalog]\npath = \"miniwobs.json\"\n").unwrap();
    fs::write(ws.path().join("miniwobs.json"), CLEAN).unwrap();

    let elsewhere = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_wob-catalog"))
        .current_dir(elsewhere.path())
        .arg("--workspace")
        .arg(ws.path())
        .arg("check")
        .output()
        .expect("run wob-catalog");
    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn list_by_tag_prints_tab_separated_records() {
    let ws = tempfile::tempdir().unwrap();
    let out = run(ws.path(), &["list", "--tag", "drag"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 20);
    for line in &lines {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 3, "{line}");
        assert!(fields[0].starts_with("wob.mini."));
        assert_eq!(fields[2], "drag");
    }
    assert!(lines.contains(&"wob.mini.DragBox-v0\tdrag-box\tdrag"));
}

#[test]
fn list_keyboard_prints_untagged_records() {
    let ws = tempfile::tempdir().unwrap();
    let out = run(ws.path(), &["list", "--keyboard"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 11);
    assert!(stdout.lines().all(|l| l.ends_with('\t')));
}
