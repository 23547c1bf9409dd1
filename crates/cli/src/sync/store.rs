// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared handle to the local store.
//!
//! The coordinator and the sync engine both hold a clone of [`SharedStore`].
//! Every access goes through an awaited lock; the lock is never held across a
//! transport call.

use std::path::Path;
use std::sync::Arc;

use sh_core::LocalStore;
use tokio::sync::Mutex;

use crate::error::{Error, Result};

/// Cloneable, closable handle to a [`LocalStore`].
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Option<LocalStore>>>,
}

impl SharedStore {
    pub fn new(store: LocalStore) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(Some(store))),
        }
    }

    /// Opens (or creates) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(SharedStore::new(LocalStore::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(SharedStore::new(LocalStore::open_in_memory()?))
    }

    /// Runs `f` against the store while holding the lock.
    ///
    /// Fails with "database not initialized" once the store has been closed.
    pub async fn with<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut LocalStore) -> sh_core::Result<R>,
    {
        let mut guard = self.inner.lock().await;
        let store = guard.as_mut().ok_or(Error::StoreClosed)?;
        Ok(f(store)?)
    }

    /// Closes the store. Returns false if it was already closed.
    pub async fn close(&self) -> bool {
        self.inner.lock().await.take().is_some()
    }

    pub async fn is_open(&self) -> bool {
        self.inner.lock().await.is_some()
    }
}
