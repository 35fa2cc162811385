//! Tests for the wvm binary

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{fixture_config, image_dir, wvm};

#[test]
fn match_prints_metadata() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["match", "slide-1 subject-1 L1 FFa.tif"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "slide-1 subject-1 L1 FFa.tif: {region: L1, slide: slide-1, stain: FFa, subject: subject-1}",
        ));
}

#[test]
fn match_failure_exits_nonzero() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["match", "-f", "$(a).tif", "x.tif", "x.png"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("x.tif: {a: x}"))
        .stdout(predicate::str::contains("x.png: error:"));
}

#[test]
fn match_json_output() {
    let home = TempDir::new().unwrap();
    let output = wvm(home.path())
        .args(["match", "-f", "$(a)-$(b)", "--json", "x-y"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "x-y");
    assert_eq!(parsed[0]["metadata"]["a"], "x");
    assert_eq!(parsed[0]["metadata"]["b"], "y");
}

#[test]
fn invalid_format_is_reported() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["match", "-f", "$(a)$(b)", "xy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("separated by a literal"));
}

#[test]
fn chart_writes_html_file() {
    let home = TempDir::new().unwrap();
    let scans = image_dir(&[
        "slide-1 subject-1 L1 FFa.png",
        "slide-1 subject-1 L1 FFb.png",
        "slide-1 subject-1 L2 FFa.png",
    ]);
    let out = home.path().join("charts.html");

    wvm(home.path())
        .arg("chart")
        .arg("-d")
        .arg(scans.path())
        .arg("-o")
        .arg(&out)
        .args(["-f", "$(slide) $(subject) $(region) $(stain).png"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 1 chart(s)"));

    let html = fs::read_to_string(&out).unwrap();
    assert_eq!(html.matches("<hr/>").count(), 1);
    assert!(html.contains("FFb"));
    assert!(html.contains("subject-1"));
    assert!(scans.path().join("slide-1 subject-1 L1 FFa.jpeg").exists());
}

#[test]
fn chart_uses_config_file_and_prints_to_stdout() {
    let home = TempDir::new().unwrap();
    let scans = image_dir(&["a_L1.png", "b_L1.png"]);
    let config = fixture_config(
        home.path(),
        "[chart]\nformat = \"$(slide)_$(region).png\"\nchart_group = \"slide\"\ncolumn_sort = \"\"\n\n[ingest]\nconvert_to_jpeg = false\n",
    );

    wvm(home.path())
        .arg("--config")
        .arg(&config)
        .arg("chart")
        .arg("--dir")
        .arg(scans.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<hr/>").count(2))
        .stdout(predicate::str::contains("a_L1.png"));
    assert!(!scans.path().join("a_L1.jpeg").exists());
}

#[test]
fn chart_missing_directory_fails() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["chart", "-d"])
        .arg(home.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[chart]"))
        .stdout(predicate::str::contains("jpeg_quality = 75"));
}

#[test]
fn config_path_uses_home() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".config/wvm/config.toml"));
}

#[test]
fn explicit_missing_config_fails() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["config", "show", "--config"])
        .arg(home.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn completions_generate_script() {
    let home = TempDir::new().unwrap();
    wvm(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wvm"));
}
