// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the `studyhub card`, `studyhub note` and
//! `studyhub session` commands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

// =============================================================================
// Flashcards
// =============================================================================

#[test]
fn new_card_is_due() {
    let temp = init_temp();
    let id = json_id(&temp, &["card", "add", "der Hund", "the dog", "-c", "german"]);

    sh().args(["card", "list", "--due"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{}  der Hund -> the dog (medium, due) *",
            id
        )));
}

#[test]
fn reviewed_card_is_no_longer_due() {
    let temp = init_temp();
    let id = json_id(&temp, &["card", "add", "la mesa", "the table"]);

    sh().args(["card", "review", &id, "easy"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("next review"));

    sh().args(["card", "list", "--due"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("No cards due\n");

    sh().args(["card", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(easy, next "));
}

#[test]
fn card_review_rejects_unknown_difficulty() {
    let temp = init_temp();
    let id = json_id(&temp, &["card", "add", "front", "back"]);

    sh().args(["card", "review", &id, "trivial"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid difficulty"));
}

#[test]
fn card_rm_deletes() {
    let temp = init_temp();
    let id = json_id(&temp, &["card", "add", "front", "back"]);

    sh().args(["card", "rm", &id])
        .current_dir(temp.path())
        .assert()
        .success();
    sh().args(["card", "list"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("No cards\n");
}

// =============================================================================
// Notes
// =============================================================================

#[test]
fn note_tags_are_normalized_and_filterable() {
    let temp = init_temp();
    let id = json_id(
        &temp,
        &["note", "add", "Cells", "Mitochondria", "-t", "bio, exam,bio"],
    );
    json_id(&temp, &["note", "add", "Wars", "1914", "-t", "history"]);

    sh().args(["note", "list", "-t", "exam"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}  Cells #bio #exam *", id)))
        .stdout(predicate::str::contains("Wars").not());
}

#[test]
fn note_show_prints_content() {
    let temp = init_temp();
    let id = json_id(&temp, &["note", "add", "Cells", "Mitochondria are organelles"]);

    sh().args(["note", "show", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Cells"))
        .stdout(predicate::str::contains("    Mitochondria are organelles"));
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn session_log_and_list_totals() {
    let temp = init_temp();
    sh().args(["session", "log", "Math", "25", "--type", "pomodoro"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("25 min pomodoro"));
    sh().args(["session", "log", "Math", "50"])
        .current_dir(temp.path())
        .assert()
        .success();
    sh().args(["session", "log", "Art", "10"])
        .current_dir(temp.path())
        .assert()
        .success();

    sh().args(["session", "list", "-s", "math"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 75 min"))
        .stdout(predicate::str::contains("(Art)").not());
}

#[test]
fn session_log_rejects_zero_minutes() {
    let temp = init_temp();
    sh().args(["session", "log", "Math", "0"])
        .current_dir(temp.path())
        .assert()
        .failure();
}
