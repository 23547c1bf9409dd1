// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engine: replays the queue against the remote.
//!
//! A pass drains the queue in FIFO order and sends each entry one at a time.
//! Entries that replay successfully are removed; failures stay queued with
//! their attempt count bumped. Only one pass runs at a time.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sh_core::Action;
use tokio::sync::watch;

use super::store::SharedStore;
use super::transport::Transport;
use crate::config::SyncState;
use crate::error::Result;

/// Why a sync pass did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    Offline,
    AlreadySyncing,
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Entries replayed and removed from the queue.
    pub synced: usize,
    /// Entries that failed and remain queued.
    pub failed: usize,
    /// Queue length after the pass.
    pub remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl SyncReport {
    pub fn skipped(reason: SkipReason) -> Self {
        SyncReport {
            skipped: Some(reason),
            ..SyncReport::default()
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped.is_some()
    }
}

/// Snapshot of the sync state for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub is_online: bool,
    pub pending_sync: usize,
    /// Queued entries that have failed at least once.
    pub failing: usize,
    pub last_sync: Option<DateTime<Utc>>,
}

/// Held while a pass runs; clears the flag on drop.
struct SyncGuard<'a>(&'a AtomicBool);

impl<'a> SyncGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncGuard(flag))
    }
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Replays queued mutations through a [`Transport`].
pub struct SyncEngine<T: Transport> {
    store: SharedStore,
    transport: Arc<T>,
    online: watch::Receiver<bool>,
    syncing: AtomicBool,
    /// Directory holding `state.toml`.
    state_dir: PathBuf,
}

impl<T: Transport> SyncEngine<T> {
    pub fn new(
        store: SharedStore,
        transport: Arc<T>,
        online: watch::Receiver<bool>,
        state_dir: PathBuf,
    ) -> Self {
        SyncEngine {
            store,
            transport,
            online,
            syncing: AtomicBool::new(false),
            state_dir,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_online(&self) -> bool {
        *self.online.borrow()
    }

    /// True while a pass is running.
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Acquire)
    }

    /// Runs one pass over the queue.
    ///
    /// Returns a skipped report, not an error, when offline or when another
    /// pass is already running. Remote failures are counted in the report;
    /// only local store errors are returned.
    pub async fn sync_data(&self) -> Result<SyncReport> {
        if !self.is_online() {
            tracing::debug!("offline, skipping sync");
            return Ok(SyncReport::skipped(SkipReason::Offline));
        }
        let Some(_guard) = SyncGuard::acquire(&self.syncing) else {
            tracing::debug!("sync already in progress");
            return Ok(SyncReport::skipped(SkipReason::AlreadySyncing));
        };

        let entries = self.store.with(|s| s.drain_all()).await?;
        tracing::info!(count = entries.len(), "syncing queued changes");

        let mut report = SyncReport::default();
        for entry in entries {
            match self
                .transport
                .send(entry.action, entry.table, &entry.data)
                .await
            {
                Ok(()) => {
                    self.store
                        .with(|s| {
                            s.remove(&entry.id)?;
                            if entry.action != Action::Delete {
                                if let Some(id) = entry.record_id() {
                                    s.mark_synced(entry.table, id)?;
                                }
                            }
                            Ok(())
                        })
                        .await?;
                    report.synced += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        entry = %entry.id,
                        attempts = entry.attempts + 1,
                        error = %e,
                        "failed to sync queued change"
                    );
                    let message = e.to_string();
                    self.store
                        .with(|s| s.record_failure(&entry.id, &message))
                        .await?;
                    report.failed += 1;
                }
            }
        }

        report.remaining = self.store.with(|s| s.pending_count()).await?;
        tracing::info!(
            synced = report.synced,
            failed = report.failed,
            remaining = report.remaining,
            "sync complete"
        );
        Ok(report)
    }

    /// Syncs and records the time, but only while online.
    pub async fn force_sync(&self) -> Result<SyncReport> {
        if !self.is_online() {
            return Ok(SyncReport::skipped(SkipReason::Offline));
        }
        let report = self.sync_data().await?;
        self.stamp_last_sync()?;
        Ok(report)
    }

    /// Records now as the last sync time in `state.toml`.
    pub fn stamp_last_sync(&self) -> Result<()> {
        let mut state = SyncState::load(&self.state_dir)?;
        state.last_sync = Some(Utc::now());
        state.save(&self.state_dir)
    }

    pub async fn status(&self) -> Result<SyncStatus> {
        let (pending_sync, failing) = self
            .store
            .with(|s| Ok((s.pending_count()?, s.failing_count()?)))
            .await?;
        let last_sync = SyncState::load(&self.state_dir)?.last_sync;
        Ok(SyncStatus {
            is_online: self.is_online(),
            pending_sync,
            failing,
            last_sync,
        })
    }
}
