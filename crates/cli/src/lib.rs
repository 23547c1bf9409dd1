// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! studyhub - an offline-first study planner library.
//!
//! This crate provides the functionality behind the `studyhub` CLI: tasks,
//! flashcards, notes and study sessions kept in a local SQLite store, with
//! every change mirrored to an optional REST API when it is reachable.
//!
//! # Main Components
//!
//! - [`sync`] - Write coordinator, sync queue replay and connectivity monitor
//! - [`Config`] - Project configuration (remote URL and timeouts)
//! - [`Error`] - Error types for all operations
//!
//! Record types and the store itself live in the `sh-core` crate.
//!
//! # Initialization
//!
//! Use [`init_work_dir`] to create a new `.studyhub/` directory, then open
//! the store and build a sync service:
//!
//! ```rust,ignore
//! use studyhub::{find_work_dir, get_db_path, Config};
//! use studyhub::sync::{HttpTransport, SharedStore, SyncService};
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let store = SharedStore::open(&get_db_path(&work_dir))?;
//! let transport = HttpTransport::from_config(config.remote.as_ref().unwrap())?;
//! let service = SyncService::new(store, transport, work_dir);
//! ```

mod cli;
mod commands;
mod display;
mod validate;

pub mod config;
pub mod env;
pub mod error;
pub mod sync;

pub use cli::{
    CardCommand, CategoryArgs, Cli, Command, NoteCommand, OutputArgs, OutputFormat,
    SessionCommand, SyncCommand, TaskCommand,
};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { remote, path } => commands::init::run(remote, path),
        Command::Task(cmd) => run_task(cmd),
        Command::Card(cmd) => run_card(cmd),
        Command::Note(cmd) => run_note(cmd),
        Command::Session(cmd) => match cmd {
            SessionCommand::Log {
                subject,
                minutes,
                session_type,
            } => commands::session::log(
                subject,
                minutes,
                session_type.unwrap_or_else(|| "regular".to_string()),
            ),
            SessionCommand::List { subject, output } => {
                commands::session::list(subject, output.output)
            }
        },
        Command::Sync { command } => match command.unwrap_or(SyncCommand::Run) {
            SyncCommand::Status { output } => commands::sync::status(output.output),
            SyncCommand::Run => commands::sync::run(),
            SyncCommand::Watch { interval } => commands::sync::watch(interval),
            SyncCommand::Resync => commands::sync::resync(),
        },
        Command::Export { filepath } => commands::export::run(&filepath),
        Command::Import { filepath, requeue } => commands::import::run(&filepath, requeue),
        Command::Clear { yes } => commands::clear::run(yes),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "studyhub", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn run_task(cmd: TaskCommand) -> Result<()> {
    use commands::task::{self, TaskFields};

    match cmd {
        TaskCommand::Add {
            title,
            description,
            priority,
            due,
            category,
            output,
        } => task::add(
            TaskFields {
                title: Some(title),
                description,
                priority,
                due,
                category,
            },
            output.output,
        ),
        TaskCommand::List {
            all,
            category,
            output,
        } => task::list(all, category.category, output.output),
        TaskCommand::Show { id, output } => task::show(id, output.output),
        TaskCommand::Done { ids } => task::done(ids),
        TaskCommand::Edit {
            id,
            title,
            description,
            priority,
            due,
            category,
            reopen,
        } => task::edit(
            id,
            TaskFields {
                title,
                description,
                priority,
                due,
                category,
            },
            reopen,
        ),
        TaskCommand::Rm { ids } => task::rm(ids),
    }
}

fn run_card(cmd: CardCommand) -> Result<()> {
    use commands::card;

    match cmd {
        CardCommand::Add {
            front,
            back,
            category,
            output,
        } => card::add(front, back, category, output.output),
        CardCommand::List {
            due,
            category,
            output,
        } => card::list(due, category.category, output.output),
        CardCommand::Review { id, difficulty } => card::review(id, difficulty),
        CardCommand::Rm { ids } => card::rm(ids),
    }
}

fn run_note(cmd: NoteCommand) -> Result<()> {
    use commands::note::{self, NoteFields};

    match cmd {
        NoteCommand::Add {
            title,
            content,
            category,
            tag,
            output,
        } => note::add(
            NoteFields {
                title,
                content,
                category,
                tags: tag,
            },
            output.output,
        ),
        NoteCommand::List {
            tag,
            category,
            output,
        } => note::list(tag, category.category, output.output),
        NoteCommand::Show { id, output } => note::show(id, output.output),
        NoteCommand::Rm { ids } => note::rm(ids),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
