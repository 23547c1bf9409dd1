// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use sh_core::{Note, Task};
use tempfile::TempDir;

use super::service::SyncService;
use super::store::SharedStore;
use super::transport_tests::MockTransport;

/// Create a test task whose id and timestamp derive from `n`.
pub fn make_task(n: u32) -> Task {
    let ts = Utc.timestamp_opt(1_700_000_000 + i64::from(n), 0).unwrap();
    Task::new(format!("task-{}", n), format!("Task {}", n), ts)
}

pub fn make_note(n: u32) -> Note {
    let ts = Utc.timestamp_opt(1_700_000_000 + i64::from(n), 0).unwrap();
    Note::new(
        format!("note-{}", n),
        format!("Note {}", n),
        "content".to_string(),
        ts,
    )
}

/// A service over an in-memory store. Keep the `TempDir` alive for state.toml.
pub fn make_service(transport: MockTransport) -> (SyncService<MockTransport>, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = SharedStore::open_in_memory().unwrap();
    let service = SyncService::new(store, transport, dir.path().to_path_buf());
    (service, dir)
}

/// Same as [`make_service`], already online.
pub async fn make_online_service(
    transport: MockTransport,
) -> (SyncService<MockTransport>, TempDir) {
    let (service, dir) = make_service(transport);
    service.monitor().set_online(true).await.unwrap();
    (service, dir)
}

pub async fn pending(service: &SyncService<MockTransport>) -> usize {
    service.store().with(|s| s.pending_count()).await.unwrap()
}
