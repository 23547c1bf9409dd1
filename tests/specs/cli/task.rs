// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `studyhub init` and `studyhub task` commands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

fn sh() -> Command {
    let mut cmd = cargo_bin_cmd!("studyhub");
    cmd.env_remove("STUDYHUB_API_URL").env_remove("RUST_LOG");
    cmd
}

fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    sh().arg("init").current_dir(temp.path()).assert().success();
    temp
}

fn add_task(temp: &TempDir, title: &str, opts: &[&str]) -> String {
    let output = sh()
        .args(["task", "add", title])
        .args(opts)
        .args(["-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "task add failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_work_dir() {
    let temp = TempDir::new().unwrap();
    sh().arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized StudyHub"))
        .stdout(predicate::str::contains("local only"));

    assert!(temp.path().join(".studyhub/config.toml").exists());
    assert!(temp.path().join(".studyhub/studyhub.db").exists());
}

#[test]
fn init_twice_fails() {
    let temp = init_temp();
    sh().arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn init_with_remote_shows_url() {
    let temp = TempDir::new().unwrap();
    sh().args(["init", "--remote", "http://127.0.0.1:9/api"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote: http://127.0.0.1:9/api"));
}

#[test]
fn commands_outside_work_dir_fail() {
    let temp = TempDir::new().unwrap();
    sh().args(["task", "list"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("studyhub init"));
}

// =============================================================================
// task add / list / show
// =============================================================================

#[test]
fn task_add_is_queued_in_local_mode() {
    let temp = init_temp();
    sh().args(["task", "add", "Read chapter 3"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^Created task-[0-9a-f]+ \(queued \(offline\)\)\n$").unwrap());
}

#[test]
fn task_list_shows_open_tasks_with_marker() {
    let temp = init_temp();
    let id = add_task(&temp, "Essay draft", &["-p", "high", "--due", "2026-03-01"]);

    sh().args(["task", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "[ ] {}  Essay draft (high, due 2026-03-01) *",
            id
        )));
}

#[test]
fn task_list_empty() {
    let temp = init_temp();
    sh().args(["task", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("No tasks\n");
}

#[test]
fn task_list_category_filter() {
    let temp = init_temp();
    add_task(&temp, "Algebra", &["-c", "math"]);
    add_task(&temp, "Poems", &["-c", "english"]);

    sh().args(["task", "list", "-c", "math"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Algebra"))
        .stdout(predicate::str::contains("Poems").not());
}

#[test]
fn task_show_json_round_trips_fields() {
    let temp = init_temp();
    let id = add_task(&temp, "Lab report", &["-d", "Due Friday", "-c", "chem"]);

    let output = sh()
        .args(["task", "show", &id, "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "Lab report");
    assert_eq!(json["description"], "Due Friday");
    assert_eq!(json["category"], "chem");
    assert_eq!(json["completed"], false);
    assert_eq!(json["synced"], false);
}

#[test]
fn task_show_unknown_id_fails() {
    let temp = init_temp();
    sh().args(["task", "show", "task-missing"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("task-missing"));
}

#[parameterized(
    bad_priority = { &["-p", "urgent"], "priority" },
    bad_date = { &["--due", "03/01/2026"], "date" },
)]
fn task_add_rejects_invalid_fields(opts: &[&str], needle: &str) {
    let temp = init_temp();
    sh().args(["task", "add", "Essay"])
        .args(opts)
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(needle));
}

#[test]
fn task_add_rejects_blank_title() {
    let temp = init_temp();
    sh().args(["task", "add", "   "])
        .current_dir(temp.path())
        .assert()
        .failure();
}

// =============================================================================
// task done / edit / rm
// =============================================================================

#[test]
fn task_done_hides_from_default_list() {
    let temp = init_temp();
    let id = add_task(&temp, "Flash review", &[]);

    sh().args(["task", "done", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Completed {}", id)));

    sh().args(["task", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("No tasks\n");

    sh().args(["task", "list", "--all"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("[x] {}", id)));
}

#[test]
fn task_edit_changes_title_and_clears_due() {
    let temp = init_temp();
    let id = add_task(&temp, "Draft", &["--due", "2026-01-01"]);

    sh().args(["task", "edit", &id, "--title", "Final draft", "--due", "none"])
        .current_dir(temp.path())
        .assert()
        .success();

    let output = sh()
        .args(["task", "show", &id, "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "Final draft");
    assert!(json["dueDate"].is_null());
}

#[test]
fn task_edit_without_changes_fails() {
    let temp = init_temp();
    let id = add_task(&temp, "Draft", &[]);
    sh().args(["task", "edit", &id])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn task_rm_deletes() {
    let temp = init_temp();
    let id = add_task(&temp, "Scratch", &[]);

    sh().args(["task", "rm", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {}", id)));

    sh().args(["task", "show", &id])
        .current_dir(temp.path())
        .assert()
        .failure();
}
