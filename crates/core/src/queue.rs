// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending mutations awaiting replay against the remote API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::id::random_suffix;
use crate::record::Table;

/// The kind of mutation a queue entry replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// One queued mutation.
///
/// `data` holds the full record for create/update and exactly `{"id": ...}`
/// for delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: String,
    pub action: Action,
    pub table: Table,
    pub data: Value,
    pub timestamp: DateTime<Utc>,
    /// Failed replay attempts so far.
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub last_error: Option<String>,
}

impl QueueEntry {
    /// Build a new entry stamped at `timestamp`.
    ///
    /// Delete payloads are reduced to `{id}` whatever the caller passes.
    pub fn new(action: Action, table: Table, data: Value, timestamp: DateTime<Utc>) -> Self {
        let data = match action {
            Action::Delete => match data.get("id") {
                Some(id) => serde_json::json!({ "id": id }),
                None => data,
            },
            Action::Create | Action::Update => data,
        };
        let key = match data.get("id").and_then(Value::as_str) {
            Some(record_id) => record_id.to_string(),
            None => timestamp.timestamp_millis().to_string(),
        };
        QueueEntry {
            id: format!("{}_{}_{}_{}", action, table, key, random_suffix()),
            action,
            table,
            data,
            timestamp,
            attempts: 0,
            last_error: None,
        }
    }

    /// The id of the record this entry targets, if the payload carries one.
    pub fn record_id(&self) -> Option<&str> {
        self.data.get("id").and_then(Value::as_str)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
