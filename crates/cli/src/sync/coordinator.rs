// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Write path for record mutations.
//!
//! Every mutation is applied to the local store first. It is then sent to the
//! remote when online, and queued when offline or when the remote fails. Remote
//! failures never surface as errors; callers see them in [`SyncOutcome`].

use std::sync::Arc;

use serde_json::{json, Value};
use sh_core::{Action, Record, Table};
use tokio::sync::watch;

use super::store::SharedStore;
use super::transport::Transport;
use crate::error::Result;

/// Why a mutation ended up in the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueReason {
    Offline,
    RemoteFailed(String),
}

/// What happened to a mutation after it was saved locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The remote accepted the change.
    Synced,
    /// The change waits in the queue.
    Queued {
        entry_id: String,
        reason: QueueReason,
    },
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

/// Applies mutations locally and forwards them to the remote.
pub struct Coordinator<T: Transport> {
    store: SharedStore,
    transport: Arc<T>,
    online: watch::Receiver<bool>,
}

impl<T: Transport> Coordinator<T> {
    pub fn new(store: SharedStore, transport: Arc<T>, online: watch::Receiver<bool>) -> Self {
        Coordinator {
            store,
            transport,
            online,
        }
    }

    pub async fn create<R: Record>(&self, record: &R) -> Result<SyncOutcome> {
        let mut record = record.clone();
        record.set_synced(false);
        if let Err(e) = self.store.with(|s| s.create(&record)).await {
            tracing::error!(table = %R::TABLE, id = record.id(), error = %e, "failed to create record");
            return Err(e);
        }
        let data = serde_json::to_value(&record)?;
        self.dispatch(Action::Create, R::TABLE, data).await
    }

    /// Replaces the whole record, inserting it if absent.
    pub async fn update<R: Record>(&self, record: &R) -> Result<SyncOutcome> {
        let mut record = record.clone();
        record.set_synced(false);
        if let Err(e) = self.store.with(|s| s.update(&record)).await {
            tracing::error!(table = %R::TABLE, id = record.id(), error = %e, "failed to update record");
            return Err(e);
        }
        let data = serde_json::to_value(&record)?;
        self.dispatch(Action::Update, R::TABLE, data).await
    }

    /// Deletes locally and remotely. A missing local record still sends the
    /// remote delete.
    pub async fn delete<R: Record>(&self, id: &str) -> Result<SyncOutcome> {
        match self.store.with(|s| s.delete::<R>(id)).await {
            Ok(false) => tracing::debug!(table = %R::TABLE, id, "record already absent locally"),
            Ok(true) => {}
            Err(e) => {
                tracing::error!(table = %R::TABLE, id, error = %e, "failed to delete record");
                return Err(e);
            }
        }
        self.dispatch(Action::Delete, R::TABLE, json!({ "id": id }))
            .await
    }

    pub async fn get<R: Record>(&self, id: &str) -> Result<Option<R>> {
        self.store.with(|s| s.get::<R>(id)).await
    }

    /// Like [`Coordinator::get`], but an absent record is `RecordNotFound`.
    pub async fn require<R: Record>(&self, id: &str) -> Result<R> {
        self.store.with(|s| s.require::<R>(id)).await
    }

    pub async fn list<R: Record>(&self) -> Result<Vec<R>> {
        self.store.with(|s| s.list::<R>()).await
    }

    async fn dispatch(&self, action: Action, table: Table, data: Value) -> Result<SyncOutcome> {
        let online = *self.online.borrow();
        if !online {
            return self.enqueue(action, table, data, QueueReason::Offline).await;
        }

        match self.transport.send(action, table, &data).await {
            Ok(()) => {
                if action != Action::Delete {
                    if let Some(id) = data.get("id").and_then(Value::as_str) {
                        self.store.with(|s| s.mark_synced(table, id)).await?;
                    }
                }
                Ok(SyncOutcome::Synced)
            }
            Err(e) => {
                tracing::warn!(%action, %table, error = %e, "remote rejected change, queueing");
                self.enqueue(action, table, data, QueueReason::RemoteFailed(e.to_string()))
                    .await
            }
        }
    }

    async fn enqueue(
        &self,
        action: Action,
        table: Table,
        data: Value,
        reason: QueueReason,
    ) -> Result<SyncOutcome> {
        match self.store.with(|s| s.enqueue(action, table, data)).await {
            Ok(entry) => {
                tracing::debug!(entry = %entry.id, "queued change");
                Ok(SyncOutcome::Queued {
                    entry_id: entry.id,
                    reason,
                })
            }
            Err(e) => {
                tracing::error!(%action, %table, error = %e, "failed to queue change");
                Err(e)
            }
        }
    }
}
