// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backup format for exporting and restoring the local store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Flashcard, Note, StudySession, Task};

/// Current export format version.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Full backup of the record tables.
///
/// A table that is absent (as opposed to empty) is left untouched on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flashcards: Option<Vec<Flashcard>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_sessions: Option<Vec<StudySession>>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    SNAPSHOT_VERSION.to_string()
}

/// Number of records restored per table; `None` marks a table the snapshot skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub tasks: Option<usize>,
    pub flashcards: Option<usize>,
    pub notes: Option<usize>,
    pub study_sessions: Option<usize>,
}

impl ImportSummary {
    /// Total records restored across all tables.
    pub fn total(&self) -> usize {
        [self.tasks, self.flashcards, self.notes, self.study_sessions]
            .into_iter()
            .flatten()
            .sum()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
