// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::sync::TransportError;

/// All possible errors that can occur in the studyhub library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'studyhub init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("{table} record not found: {id}")]
    RecordNotFound { table: String, id: String },

    #[error("{table} already contains a record with id '{id}'")]
    DuplicateKey { table: String, id: String },

    #[error("database not initialized")]
    StoreClosed,

    #[error("invalid table: '{0}'\n  hint: valid tables are: tasks, flashcards, notes, studySessions")]
    InvalidTable(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: low, medium, high")]
    InvalidPriority(String),

    #[error("invalid difficulty: '{0}'\n  hint: valid difficulties are: easy, medium, hard")]
    InvalidDifficulty(String),

    #[error("invalid session type: '{0}'\n  hint: valid types are: pomodoro, regular")]
    InvalidSessionType(String),

    #[error("invalid date '{value}'\n  hint: use YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{field} is too long ({actual} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("too many tags (max {max})")]
    TagLimitExceeded { max: usize },

    #[error("nothing to change\n  hint: pass at least one field to edit")]
    NothingToEdit,

    #[error("{operation} discards local data\n  hint: re-run with --yes to confirm")]
    ConfirmationRequired { operation: &'static str },

    #[error("unsupported snapshot version '{0}'")]
    UnsupportedVersion(String),

    #[error("remote error: {0}")]
    Transport(#[from] TransportError),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data in database: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for studyhub operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<sh_core::Error> for Error {
    fn from(e: sh_core::Error) -> Self {
        match e {
            sh_core::Error::DuplicateKey { table, id } => Error::DuplicateKey { table, id },
            sh_core::Error::RecordNotFound { table, id } => Error::RecordNotFound { table, id },
            sh_core::Error::NotInitialized => Error::StoreClosed,
            sh_core::Error::InvalidTable(s) => Error::InvalidTable(s),
            sh_core::Error::InvalidAction(s) => {
                Error::InvalidInput(format!("invalid action: {}", s))
            }
            sh_core::Error::InvalidPriority(s) => Error::InvalidPriority(s),
            sh_core::Error::InvalidDifficulty(s) => Error::InvalidDifficulty(s),
            sh_core::Error::InvalidSessionType(s) => Error::InvalidSessionType(s),
            sh_core::Error::InvalidInput(s) => Error::InvalidInput(s),
            sh_core::Error::Database(e) => Error::Database(e),
            sh_core::Error::Io(e) => Error::Io(e),
            sh_core::Error::Json(e) => Error::Json(e),
            sh_core::Error::CorruptedData(s) => Error::CorruptedData(s),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
