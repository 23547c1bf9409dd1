// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed local store for records and the sync queue.
//!
//! The [`LocalStore`] keeps one document table per record kind, keyed by
//! record id, plus a `sync_queue` table of pending mutations. Records are
//! stored as their JSON document with a mirrored `synced` column so pending
//! counts can be answered without decoding.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};
use crate::queue::{Action, QueueEntry};
use crate::record::{Flashcard, Note, Record, StudySession, Table, Task};
use crate::snapshot::{ImportSummary, Snapshot, SNAPSHOT_VERSION};

/// SQL schema for the local store.
pub const SCHEMA: &str = r#"
-- One document table per record kind
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS flashcards (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS study_sessions (
    id TEXT PRIMARY KEY,
    data TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0
);

-- Pending mutations; fixed-width timestamps sort lexically, seq breaks ties
CREATE TABLE IF NOT EXISTS sync_queue (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    action TEXT NOT NULL,
    table_name TEXT NOT NULL,
    record_id TEXT,
    data TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sync_queue_order ON sync_queue(timestamp, seq);
CREATE INDEX IF NOT EXISTS idx_sync_queue_record ON sync_queue(table_name, record_id);
"#;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse a JSON document from the database.
fn parse_json(value: &str, column: &str) -> std::result::Result<Value, rusqlite::Error> {
    serde_json::from_str(value).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid JSON in column '{column}'"
            ))),
        )
    })
}

/// Run schema creation and all migrations on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_queue_attempts(conn)?;
    Ok(())
}

/// Migration: Add retry bookkeeping columns to the sync queue.
fn migrate_add_queue_attempts(conn: &Connection) -> Result<()> {
    let columns = [
        ("attempts", "INTEGER NOT NULL DEFAULT 0"),
        ("last_error", "TEXT"),
    ];

    for (column, decl) in columns {
        let has_column: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info('sync_queue') WHERE name = ?1",
                [column],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !has_column {
            let sql = format!("ALTER TABLE sync_queue ADD COLUMN {column} {decl}");
            conn.execute(&sql, [])?;
        }
    }
    Ok(())
}

/// Extract the `id` field every record document must carry.
fn document_id(table: Table, value: &Value) -> Result<String> {
    value
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidInput(format!("{table} record is missing an id")))
}

fn document_synced(value: &Value) -> bool {
    value.get("synced").and_then(Value::as_bool).unwrap_or(false)
}

fn with_synced(mut value: Value, synced: bool) -> Value {
    if let Some(obj) = value.as_object_mut() {
        obj.insert("synced".to_string(), Value::Bool(synced));
    }
    value
}

fn insert_document(conn: &Connection, table: Table, value: &Value) -> Result<()> {
    let id = document_id(table, value)?;
    let sql = format!(
        "INSERT INTO {} (id, data, synced) VALUES (?1, ?2, ?3)",
        table.sql_name()
    );
    conn.execute(
        &sql,
        params![id, serde_json::to_string(value)?, document_synced(value)],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(ref f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::DuplicateKey {
                table: table.to_string(),
                id: id.clone(),
            }
        }
        other => other.into(),
    })?;
    Ok(())
}

fn upsert_document(conn: &Connection, table: Table, value: &Value) -> Result<()> {
    let id = document_id(table, value)?;
    let sql = format!(
        "INSERT INTO {} (id, data, synced) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET data = excluded.data, synced = excluded.synced",
        table.sql_name()
    );
    conn.execute(
        &sql,
        params![id, serde_json::to_string(value)?, document_synced(value)],
    )?;
    Ok(())
}

fn insert_entry(conn: &Connection, entry: &QueueEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO sync_queue (id, action, table_name, record_id, data, timestamp,
         attempts, last_error)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.id,
            entry.action.as_str(),
            entry.table.as_str(),
            entry.record_id(),
            serde_json::to_string(&entry.data)?,
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            entry.attempts,
            entry.last_error,
        ],
    )?;
    Ok(())
}

fn decode<R: Record>(value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|e| {
        Error::CorruptedData(format!("invalid {} document: {}", R::TABLE, e))
    })
}

/// Local SQLite store with record tables and the sync queue.
pub struct LocalStore {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl LocalStore {
    /// Open a store at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let store = LocalStore { conn };
        run_migrations(&store.conn)?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = LocalStore { conn };
        run_migrations(&store.conn)?;
        Ok(store)
    }

    // ------------------------------------------------------------------------
    // Typed record access
    // ------------------------------------------------------------------------

    /// Insert a new record. Fails with [`Error::DuplicateKey`] if the id exists.
    pub fn create<R: Record>(&self, record: &R) -> Result<()> {
        self.insert_value(R::TABLE, &serde_json::to_value(record)?)
    }

    /// Get a record by id, or `None` if absent.
    pub fn get<R: Record>(&self, id: &str) -> Result<Option<R>> {
        self.get_value(R::TABLE, id)?.map(decode).transpose()
    }

    /// Get a record by id, failing if it is absent.
    pub fn require<R: Record>(&self, id: &str) -> Result<R> {
        self.get(id)?.ok_or_else(|| Error::RecordNotFound {
            table: R::TABLE.to_string(),
            id: id.to_string(),
        })
    }

    /// All records of one kind, ordered by id.
    pub fn list<R: Record>(&self) -> Result<Vec<R>> {
        self.list_values(R::TABLE)?.into_iter().map(decode).collect()
    }

    /// Replace a record with its new full value, marked unsynced.
    pub fn update<R: Record>(&self, record: &R) -> Result<()> {
        let mut record = record.clone();
        record.set_synced(false);
        self.put_value(R::TABLE, &serde_json::to_value(&record)?)
    }

    /// Delete a record. Returns whether a row was removed.
    pub fn delete<R: Record>(&self, id: &str) -> Result<bool> {
        self.delete_value(R::TABLE, id)
    }

    // ------------------------------------------------------------------------
    // Untyped document access
    // ------------------------------------------------------------------------

    /// Insert a record document. Fails with [`Error::DuplicateKey`] if the id exists.
    pub fn insert_value(&self, table: Table, value: &Value) -> Result<()> {
        insert_document(&self.conn, table, value)
    }

    /// Get a record document by id.
    pub fn get_value(&self, table: Table, id: &str) -> Result<Option<Value>> {
        let sql = format!("SELECT data FROM {} WHERE id = ?1", table.sql_name());
        let value = self
            .conn
            .query_row(&sql, params![id], |row| {
                let data: String = row.get(0)?;
                parse_json(&data, "data")
            })
            .optional()?;
        Ok(value)
    }

    /// All record documents of a table, ordered by id.
    pub fn list_values(&self, table: Table) -> Result<Vec<Value>> {
        let sql = format!("SELECT data FROM {} ORDER BY id", table.sql_name());
        let mut stmt = self.conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| {
                let data: String = row.get(0)?;
                parse_json(&data, "data")
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(values)
    }

    /// Write a record document as-is, inserting or replacing.
    pub fn put_value(&self, table: Table, value: &Value) -> Result<()> {
        upsert_document(&self.conn, table, value)
    }

    /// Replace a record document with its new full value, marked unsynced.
    pub fn update_value(&self, table: Table, value: &Value) -> Result<()> {
        self.put_value(table, &with_synced(value.clone(), false))
    }

    /// Delete a record document. Returns whether a row was removed.
    pub fn delete_value(&self, table: Table, id: &str) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", table.sql_name());
        let affected = self.conn.execute(&sql, params![id])?;
        Ok(affected > 0)
    }

    /// Check if a record exists.
    pub fn exists(&self, table: Table, id: &str) -> Result<bool> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?1", table.sql_name());
        let count: i64 = self.conn.query_row(&sql, params![id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Flag a record as synced. Returns false if the record no longer exists.
    pub fn mark_synced(&self, table: Table, id: &str) -> Result<bool> {
        match self.get_value(table, id)? {
            Some(value) => {
                self.put_value(table, &with_synced(value, true))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of records in a table not yet confirmed by the remote.
    pub fn unsynced_count(&self, table: Table) -> Result<usize> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE synced = 0",
            table.sql_name()
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    // ------------------------------------------------------------------------
    // Sync queue
    // ------------------------------------------------------------------------

    /// Append a mutation to the sync queue and return the stored entry.
    pub fn enqueue(&self, action: Action, table: Table, data: Value) -> Result<QueueEntry> {
        let entry = QueueEntry::new(action, table, data, Utc::now());
        insert_entry(&self.conn, &entry)?;
        Ok(entry)
    }

    /// Persist a prebuilt entry.
    pub fn enqueue_entry(&self, entry: &QueueEntry) -> Result<()> {
        insert_entry(&self.conn, entry)
    }

    /// Every queued entry, oldest first.
    ///
    /// Ordered by enqueue timestamp, then insertion sequence.
    pub fn drain_all(&self) -> Result<Vec<QueueEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, action, table_name, data, timestamp, attempts, last_error
             FROM sync_queue ORDER BY timestamp, seq",
        )?;
        let entries = stmt
            .query_map([], |row| {
                let action: String = row.get(1)?;
                let table: String = row.get(2)?;
                let data: String = row.get(3)?;
                let timestamp: String = row.get(4)?;
                Ok(QueueEntry {
                    id: row.get(0)?,
                    action: parse_db(&action, "action")?,
                    table: parse_db(&table, "table_name")?,
                    data: parse_json(&data, "data")?,
                    timestamp: parse_timestamp(&timestamp, "timestamp")?,
                    attempts: row.get(5)?,
                    last_error: row.get(6)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Remove one queue entry. Returns whether it existed.
    pub fn remove(&self, entry_id: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM sync_queue WHERE id = ?1", params![entry_id])?;
        Ok(affected > 0)
    }

    /// Note a failed replay against an entry.
    pub fn record_failure(&self, entry_id: &str, message: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE sync_queue SET attempts = attempts + 1, last_error = ?1 WHERE id = ?2",
            params![message, entry_id],
        )?;
        Ok(())
    }

    /// Number of queued entries.
    pub fn pending_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sync_queue", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Number of queued entries that have failed at least once.
    pub fn failing_count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sync_queue WHERE attempts > 0",
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Queue an update for every unsynced record that has no pending entry.
    ///
    /// Returns the number of entries added.
    pub fn requeue_unsynced(&self) -> Result<usize> {
        let mut added = 0;
        for table in Table::ALL {
            let sql = format!(
                "SELECT data FROM {} WHERE synced = 0 AND id NOT IN (
                     SELECT record_id FROM sync_queue
                     WHERE table_name = ?1 AND record_id IS NOT NULL
                 ) ORDER BY id",
                table.sql_name()
            );
            let values = {
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params![table.as_str()], |row| {
                        let data: String = row.get(0)?;
                        parse_json(&data, "data")
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            };
            for value in values {
                self.enqueue(Action::Update, table, value)?;
                added += 1;
            }
        }
        Ok(added)
    }

    // ------------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------------

    /// Empty every record table and the sync queue.
    pub fn clear_all(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for table in Table::ALL {
            tx.execute(&format!("DELETE FROM {}", table.sql_name()), [])?;
        }
        tx.execute("DELETE FROM sync_queue", [])?;
        tx.commit()?;
        Ok(())
    }

    /// Snapshot every record table for backup.
    pub fn export(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            tasks: Some(self.list::<Task>()?),
            flashcards: Some(self.list::<Flashcard>()?),
            notes: Some(self.list::<Note>()?),
            study_sessions: Some(self.list::<StudySession>()?),
            exported_at: Some(Utc::now()),
            version: SNAPSHOT_VERSION.to_string(),
        })
    }

    /// Restore a snapshot.
    ///
    /// Each table present in the snapshot is cleared and refilled with its
    /// records marked unsynced; absent tables are untouched. The whole import
    /// is one transaction.
    pub fn import(&mut self, snapshot: &Snapshot) -> Result<ImportSummary> {
        let tx = self.conn.transaction()?;
        let summary = ImportSummary {
            tasks: import_table(&tx, snapshot.tasks.as_deref())?,
            flashcards: import_table(&tx, snapshot.flashcards.as_deref())?,
            notes: import_table(&tx, snapshot.notes.as_deref())?,
            study_sessions: import_table(&tx, snapshot.study_sessions.as_deref())?,
        };
        tx.commit()?;
        Ok(summary)
    }
}

fn import_table<R: Record>(conn: &Connection, records: Option<&[R]>) -> Result<Option<usize>> {
    let Some(records) = records else {
        return Ok(None);
    };
    conn.execute(&format!("DELETE FROM {}", R::TABLE.sql_name()), [])?;
    for record in records {
        let value = with_synced(serde_json::to_value(record)?, false);
        insert_document(conn, R::TABLE, &value)?;
    }
    Ok(Some(records.len()))
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
