// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

//! Tests for CLI parsing and the public `run()` function.
//!
//! Most commands need a `.studyhub/` directory found from the current
//! directory, so they are covered by the tests under `tests/specs` that run
//! the binary.
//! Here we check that arguments parse into the expected commands.

use crate::{CardCommand, Cli, Command, NoteCommand, OutputFormat, SyncCommand, TaskCommand};
use clap::{CommandFactory, Parser};

fn parse(args: &[&str]) -> Command {
    let mut argv = vec!["studyhub"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_task_add() {
    let cmd = parse(&[
        "task", "add", "Essay", "-p", "high", "--due", "2026-03-01", "-o", "json",
    ]);
    assert!(matches!(
        cmd,
        Command::Task(TaskCommand::Add { title, priority: Some(p), due: Some(d), output, .. })
            if title == "Essay" && p == "high" && d == "2026-03-01"
                && output.output == OutputFormat::Json
    ));
}

#[test]
fn test_parse_task_add_rejects_blank_title() {
    assert!(Cli::try_parse_from(["studyhub", "task", "add", "  "]).is_err());
}

#[test]
fn test_parse_note_tags_comma_separated() {
    let cmd = parse(&["note", "add", "Cells", "body", "-t", "bio,exam", "-t", "ch1"]);
    assert!(matches!(
        cmd,
        Command::Note(NoteCommand::Add { tag, content: Some(c), .. })
            if tag == vec!["bio", "exam", "ch1"] && c == "body"
    ));
}

#[test]
fn test_parse_card_review() {
    let cmd = parse(&["card", "review", "card-1", "easy"]);
    assert!(matches!(
        cmd,
        Command::Card(CardCommand::Review { id, difficulty }) if id == "card-1" && difficulty == "easy"
    ));
}

#[test]
fn test_parse_session_minutes_must_be_positive() {
    assert!(Cli::try_parse_from(["studyhub", "session", "log", "Math", "0"]).is_err());
    assert!(Cli::try_parse_from(["studyhub", "session", "log", "Math", "25"]).is_ok());
}

#[test]
fn test_parse_sync_defaults_to_none() {
    assert!(matches!(parse(&["sync"]), Command::Sync { command: None }));
    assert!(matches!(
        parse(&["sync", "watch", "--interval", "5"]),
        Command::Sync {
            command: Some(SyncCommand::Watch { interval: Some(5) })
        }
    ));
}

#[test]
fn test_parse_import_requeue() {
    assert!(matches!(
        parse(&["import", "backup.json", "--requeue"]),
        Command::Import { filepath, requeue: true } if filepath == "backup.json"
    ));
}

#[test]
fn test_run_clear_without_yes_fails_before_opening_store() {
    let err = crate::run(Command::Clear { yes: false }).unwrap_err();
    assert!(err.to_string().contains("--yes"));
}
