// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for sh-core operations.

use thiserror::Error;

/// All possible errors that can occur in sh-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate key: {table} already contains '{id}'")]
    DuplicateKey { table: String, id: String },

    #[error("{table} record not found: {id}")]
    RecordNotFound { table: String, id: String },

    #[error("database not initialized")]
    NotInitialized,

    #[error("invalid table: '{0}'\n  hint: valid tables are: tasks, flashcards, notes, studySessions")]
    InvalidTable(String),

    #[error("invalid action: '{0}'\n  hint: valid actions are: create, update, delete")]
    InvalidAction(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: low, medium, high")]
    InvalidPriority(String),

    #[error("invalid difficulty: '{0}'\n  hint: valid difficulties are: easy, medium, hard")]
    InvalidDifficulty(String),

    #[error("invalid session type: '{0}'\n  hint: valid types are: pomodoro, regular")]
    InvalidSessionType(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for sh-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
