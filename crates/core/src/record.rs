// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record types stored locally and mirrored to the remote API.
//!
//! Four record kinds exist: [`Task`], [`Flashcard`], [`Note`] and
//! [`StudySession`]. Each carries a string id and a `synced` flag, and
//! serializes with camelCase field names to match the remote JSON shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The local tables that hold records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    #[serde(rename = "tasks")]
    Tasks,
    #[serde(rename = "flashcards")]
    Flashcards,
    #[serde(rename = "notes")]
    Notes,
    #[serde(rename = "studySessions")]
    StudySessions,
}

impl Table {
    /// All record tables in export order.
    pub const ALL: [Table; 4] = [
        Table::Tasks,
        Table::Flashcards,
        Table::Notes,
        Table::StudySessions,
    ];

    /// Returns the wire name used in queue entries and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Tasks => "tasks",
            Table::Flashcards => "flashcards",
            Table::Notes => "notes",
            Table::StudySessions => "studySessions",
        }
    }

    /// Returns the SQLite table name.
    pub fn sql_name(&self) -> &'static str {
        match self {
            Table::Tasks => "tasks",
            Table::Flashcards => "flashcards",
            Table::Notes => "notes",
            Table::StudySessions => "study_sessions",
        }
    }

    /// Returns the REST resource path segment.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Table::Tasks => "tasks",
            Table::Flashcards => "flashcards",
            Table::Notes => "notes",
            Table::StudySessions => "study-sessions",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tasks" => Ok(Table::Tasks),
            "flashcards" => Ok(Table::Flashcards),
            "notes" => Ok(Table::Notes),
            "studysessions" | "study_sessions" | "study-sessions" => Ok(Table::StudySessions),
            _ => Err(Error::InvalidTable(s.to_string())),
        }
    }
}

/// A record that can live in one of the local tables.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// The table this record kind is stored in.
    const TABLE: Table;

    /// The record's identity.
    fn id(&self) -> &str;

    /// Whether the remote copy is known to match the local one.
    fn synced(&self) -> bool;

    /// Set the synced flag.
    fn set_synced(&mut self, synced: bool);
}

macro_rules! impl_record {
    ($ty:ty, $table:expr) => {
        impl Record for $ty {
            const TABLE: Table = $table;

            fn id(&self) -> &str {
                &self.id
            }

            fn synced(&self) -> bool {
                self.synced
            }

            fn set_synced(&mut self, synced: bool) {
                self.synced = synced;
            }
        }
    };
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// How hard a flashcard is to recall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Days until the next review after a successful recall at this difficulty.
    pub fn review_interval_days(&self, review_count: u32) -> i64 {
        let base: i64 = match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 2,
            Difficulty::Hard => 1,
        };
        // Doubles per completed review, capped at 2^6
        base << review_count.min(6)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Kind of study session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Pomodoro,
    #[default]
    Regular,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Pomodoro => "pomodoro",
            SessionType::Regular => "regular",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pomodoro" => Ok(SessionType::Pomodoro),
            "regular" => Ok(SessionType::Regular),
            _ => Err(Error::InvalidSessionType(s.to_string())),
        }
    }
}

/// A to-do item with an optional due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_category")]
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub synced: bool,
}

impl Task {
    /// Creates an incomplete, unsynced task.
    pub fn new(id: String, title: String, created_at: DateTime<Utc>) -> Self {
        Task {
            id,
            title,
            description: String::new(),
            completed: false,
            priority: Priority::default(),
            due_date: None,
            category: default_category(),
            created_at,
            updated_at: created_at,
            synced: false,
        }
    }
}

impl_record!(Task, Table::Tasks);

/// A two-sided card for spaced review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub synced: bool,
}

impl Flashcard {
    pub fn new(id: String, front: String, back: String, created_at: DateTime<Utc>) -> Self {
        Flashcard {
            id,
            front,
            back,
            category: default_category(),
            difficulty: Difficulty::default(),
            last_reviewed: None,
            next_review: None,
            review_count: 0,
            created_at,
            updated_at: created_at,
            synced: false,
        }
    }

    /// Records a review at `now` and schedules the next one.
    pub fn review(&mut self, difficulty: Difficulty, now: DateTime<Utc>) {
        self.difficulty = difficulty;
        self.next_review =
            Some(now + chrono::Duration::days(difficulty.review_interval_days(self.review_count)));
        self.last_reviewed = Some(now);
        self.review_count += 1;
        self.updated_at = now;
    }

    /// True if the card has never been reviewed or its review date has passed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review {
            Some(next) => next <= now,
            None => true,
        }
    }
}

impl_record!(Flashcard, Table::Flashcards);

/// Free-form study notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub synced: bool,
}

impl Note {
    pub fn new(id: String, title: String, content: String, created_at: DateTime<Utc>) -> Self {
        Note {
            id,
            title,
            content,
            category: default_category(),
            tags: Vec::new(),
            created_at,
            updated_at: created_at,
            synced: false,
        }
    }
}

impl_record!(Note, Table::Notes);

/// A block of time spent studying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    /// Length in minutes.
    pub duration: u32,
    pub subject: String,
    #[serde(rename = "type", default)]
    pub session_type: SessionType,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub synced: bool,
}

impl StudySession {
    /// Creates a finished session that started `duration` minutes before `end_time`.
    pub fn finished(
        id: String,
        subject: String,
        session_type: SessionType,
        duration: u32,
        end_time: DateTime<Utc>,
    ) -> Self {
        StudySession {
            id,
            duration,
            subject,
            session_type,
            start_time: end_time - chrono::Duration::minutes(i64::from(duration)),
            end_time: Some(end_time),
            synced: false,
        }
    }
}

impl_record!(StudySession, Table::StudySessions);

fn default_category() -> String {
    "general".to_string()
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
