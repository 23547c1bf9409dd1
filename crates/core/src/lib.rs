// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! sh-core: Shared library for the StudyHub offline store
//!
//! This crate provides the record types, the sync queue entry type, and the
//! SQLite-backed [`LocalStore`] used by the `studyhub` CLI and sync engine.

pub mod db;
pub mod error;
pub mod id;
pub mod queue;
pub mod record;
pub mod snapshot;

pub use db::LocalStore;
pub use error::{Error, Result};
pub use queue::{Action, QueueEntry};
pub use record::{
    Difficulty, Flashcard, Note, Priority, Record, SessionType, StudySession, Table, Task,
};
pub use snapshot::{ImportSummary, Snapshot, SNAPSHOT_VERSION};
