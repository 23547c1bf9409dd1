// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `studyhub sync` in local-only mode and against an
//! unreachable remote.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

/// Nothing listens on the discard port, so connections are refused.
const UNREACHABLE: &str = "http://127.0.0.1:9/api";

fn sh() -> Command {
    let mut cmd = cargo_bin_cmd!("studyhub");
    cmd.env_remove("STUDYHUB_API_URL").env_remove("RUST_LOG");
    cmd
}

fn init_temp(remote: Option<&str>) -> TempDir {
    let temp = TempDir::new().unwrap();
    let mut cmd = sh();
    cmd.arg("init");
    if let Some(url) = remote {
        cmd.args(["--remote", url]);
    }
    cmd.current_dir(temp.path()).assert().success();
    temp
}

fn status_json(temp: &TempDir) -> serde_json::Value {
    let output = sh()
        .args(["sync", "status", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "sync status failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Local-only mode
// =============================================================================

#[parameterized(
    bare = { &["sync"] },
    run = { &["sync", "run"] },
)]
fn sync_run_in_local_mode_shows_hint(args: &[&str]) {
    let temp = init_temp(None);
    sh().args(args)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No remote configured"))
        .stdout(predicate::str::contains("[remote]"));
}

#[test]
fn sync_status_in_local_mode() {
    let temp = init_temp(None);
    sh().args(["sync", "status"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote: none (local only)"))
        .stdout(predicate::str::contains("Status: offline"))
        .stdout(predicate::str::contains("Last sync: never"));
}

#[test]
fn sync_watch_requires_remote() {
    let temp = init_temp(None);
    sh().args(["sync", "watch"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[remote]"));
}

// =============================================================================
// Unreachable remote
// =============================================================================

#[test]
fn writes_are_queued_when_remote_is_down() {
    let temp = init_temp(Some(UNREACHABLE));

    sh().args(["task", "add", "Read"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("queued (offline)"));
    sh().args(["note", "add", "Cells", "body"])
        .current_dir(temp.path())
        .assert()
        .success();

    let status = status_json(&temp);
    assert_eq!(status["isOnline"], false);
    assert_eq!(status["pendingSync"], 2);
    assert!(status["lastSync"].is_null());
}

#[test]
fn sync_run_against_unreachable_remote_skips() {
    let temp = init_temp(Some(UNREACHABLE));
    sh().args(["task", "add", "Read"])
        .current_dir(temp.path())
        .assert()
        .success();

    sh().args(["sync", "run"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("Offline: nothing synced\n");

    assert_eq!(status_json(&temp)["pendingSync"], 1);
    assert!(!temp.path().join(".studyhub/state.toml").exists());
}

#[test]
fn delete_is_queued_after_create() {
    let temp = init_temp(Some(UNREACHABLE));
    let output = sh()
        .args(["task", "add", "Scratch", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = json["id"].as_str().unwrap().to_string();

    sh().args(["task", "rm", &id])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(status_json(&temp)["pendingSync"], 2);
}

#[test]
fn env_url_overrides_config() {
    let temp = init_temp(None);
    let output = sh()
        .env("STUDYHUB_API_URL", UNREACHABLE)
        .args(["sync", "status"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Remote: {}", UNREACHABLE)));
}

#[test]
fn resync_queues_nothing_twice() {
    let temp = init_temp(Some(UNREACHABLE));
    sh().args(["task", "add", "Read"])
        .current_dir(temp.path())
        .assert()
        .success();

    // The record already has a pending create, so nothing new is queued.
    sh().args(["sync", "resync"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued 0 unsynced record(s)"));
    assert_eq!(status_json(&temp)["pendingSync"], 1);
}
