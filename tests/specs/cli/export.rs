// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `studyhub export`, `studyhub import` and
//! `studyhub clear` commands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;

use super::common::*;

fn seed(temp: &TempDir) {
    for args in [
        vec!["task", "add", "Read chapter 3", "-p", "high"],
        vec!["card", "add", "front", "back"],
        vec!["note", "add", "Cells", "body", "-t", "bio"],
        vec!["session", "log", "Math", "25"],
    ] {
        sh().args(&args).current_dir(temp.path()).assert().success();
    }
}

fn records(path: &std::path::Path) -> serde_json::Value {
    let mut json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let obj = json.as_object_mut().unwrap();
    obj.remove("exportedAt");
    // Import marks everything unsynced, so compare without the flag.
    for table in ["tasks", "flashcards", "notes", "studySessions"] {
        for record in obj[table].as_array_mut().unwrap() {
            record.as_object_mut().unwrap().remove("synced");
        }
    }
    json
}

// =============================================================================
// export
// =============================================================================

#[test]
fn export_writes_snapshot() {
    let temp = init_temp();
    seed(&temp);
    let path = temp.path().join("backup.json");

    sh().arg("export")
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 4 record(s)"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["version"], "1.0");
    assert!(json["exportedAt"].is_string());
    for table in ["tasks", "flashcards", "notes", "studySessions"] {
        assert_eq!(json[table].as_array().unwrap().len(), 1, "{}", table);
    }
}

#[test]
fn export_empty_store_succeeds() {
    let temp = init_temp();
    let path = temp.path().join("empty.json");

    sh().arg("export")
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 0 record(s)"));
}

#[test]
fn export_requires_filepath() {
    let temp = init_temp();
    sh().arg("export").current_dir(temp.path()).assert().failure();
}

// =============================================================================
// import
// =============================================================================

#[test]
fn export_import_round_trip() {
    let source = init_temp();
    seed(&source);
    let path = source.path().join("backup.json");
    sh().arg("export")
        .arg(&path)
        .current_dir(source.path())
        .assert()
        .success();

    let target = init_temp();
    sh().arg("import")
        .arg(&path)
        .current_dir(target.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 4 record(s)"));

    let again = target.path().join("again.json");
    sh().arg("export")
        .arg(&again)
        .current_dir(target.path())
        .assert()
        .success();

    similar_asserts::assert_eq!(records(&path), records(&again));
}

#[test]
fn import_rejects_unknown_version() {
    let temp = init_temp();
    let path = temp.path().join("future.json");
    fs::write(&path, r#"{"version": "2.0", "tasks": []}"#).unwrap();

    sh().arg("import")
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported snapshot version '2.0'"));
}

#[test]
fn import_leaves_absent_tables_alone() {
    let temp = init_temp();
    seed(&temp);
    let path = temp.path().join("tasks-only.json");
    fs::write(&path, r#"{"version": "1.0", "tasks": []}"#).unwrap();

    sh().arg("import")
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tasks: 0"))
        .stdout(predicate::str::contains("notes:").not());

    sh().args(["task", "list", "--all"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("No tasks\n");
    sh().args(["note", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cells"));
}

// =============================================================================
// clear
// =============================================================================

#[test]
fn clear_requires_yes() {
    let temp = init_temp();
    seed(&temp);

    sh().arg("clear")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    sh().args(["clear", "--yes"])
        .current_dir(temp.path())
        .assert()
        .success();

    sh().args(["task", "list", "--all"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("No tasks\n");
    sh().args(["sync", "status", "-o", "json"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pendingSync\": 0"));
}
