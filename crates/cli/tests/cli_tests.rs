//! End-to-end tests for the annex binary.

#![allow(deprecated)] // cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build an annex command isolated to a temp directory: config file absent
/// (all defaults), database redirected via environment.
fn annex(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("annex").unwrap();
    cmd.env("ANNEX_CONFIG", temp.path().join("annex.toml"));
    cmd.env(
        "ANNEX_METADATA__PATH",
        temp.path().join("metadata.db"),
    );
    cmd
}

#[test]
fn set_then_show_round_trips() {
    let temp = TempDir::new().unwrap();

    annex(&temp)
        .args([
            "set",
            "/docs/a.txt",
            "--project-number",
            "P-1042",
            "--department",
            "Eng",
            "--notes",
            "Issued for comment",
        ])
        .assert()
        .success()
        .stdout(contains("Saved metadata for: /docs/a.txt"));

    annex(&temp)
        .args(["show", "/docs/a.txt"])
        .assert()
        .success()
        .stdout(contains("Project #: P-1042"))
        .stdout(contains("Department: Eng"))
        .stdout(contains("Notes: Issued for comment"));
}

#[test]
fn show_unrecorded_path_reports_no_record() {
    let temp = TempDir::new().unwrap();

    annex(&temp)
        .args(["show", "/docs/never-annotated.txt"])
        .assert()
        .success()
        .stdout(contains("No metadata recorded for: /docs/never-annotated.txt"));
}

#[test]
fn second_set_replaces_all_fields() {
    let temp = TempDir::new().unwrap();

    annex(&temp)
        .args(["set", "/docs/a.txt", "--department", "Eng"])
        .assert()
        .success();

    // Saving again with only --revision blanks the department: a save is a
    // full replacement, not a merge.
    annex(&temp)
        .args(["set", "/docs/a.txt", "--revision", "B"])
        .assert()
        .success();

    annex(&temp)
        .args(["show", "/docs/a.txt"])
        .assert()
        .success()
        .stdout(contains("Revision: B"))
        .stdout(contains("Eng").not());
}

#[test]
fn list_shows_recorded_paths() {
    let temp = TempDir::new().unwrap();

    annex(&temp).args(["list"]).assert().success().stdout(contains("No records found."));

    annex(&temp)
        .args(["set", "/docs/a.txt", "--area", "Substation"])
        .assert()
        .success();

    annex(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("/docs/a.txt"));
}

#[test]
fn browse_lists_directory_contents() {
    let temp = TempDir::new().unwrap();
    let tree = temp.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("drawing.dwg"), b"x").unwrap();
    fs::create_dir(tree.join("archive")).unwrap();

    annex(&temp)
        .args(["browse"])
        .arg(&tree)
        .assert()
        .success()
        .stdout(contains("drawing.dwg"))
        .stdout(contains("File"))
        .stdout(contains("archive"))
        .stdout(contains("Folder"));
}

#[test]
fn browse_of_missing_directory_fails() {
    let temp = TempDir::new().unwrap();

    annex(&temp)
        .args(["browse"])
        .arg(temp.path().join("nope"))
        .assert()
        .failure();
}

#[test]
fn set_rejects_empty_path() {
    let temp = TempDir::new().unwrap();

    annex(&temp)
        .args(["set", "", "--department", "Eng"])
        .assert()
        .failure()
        .stderr(contains("invalid path"));
}

#[test]
fn database_lands_at_configured_location() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("nested").join("store.db");

    let mut cmd = Command::cargo_bin("annex").unwrap();
    cmd.env("ANNEX_CONFIG", temp.path().join("annex.toml"));
    cmd.env("ANNEX_METADATA__PATH", &db_path);
    cmd.args(["set", "/docs/a.txt", "--department", "Eng"])
        .assert()
        .success();

    assert!(Path::new(&db_path).exists());
}
