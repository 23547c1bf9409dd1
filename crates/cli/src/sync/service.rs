// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring of the store, transport, engine, monitor and coordinator.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;

use super::connectivity::ConnectivityMonitor;
use super::coordinator::Coordinator;
use super::engine::SyncEngine;
use super::store::SharedStore;
use super::transport::Transport;

/// All sync components sharing one store, one transport and one online flag.
///
/// Starts offline; call [`ConnectivityMonitor::probe`] or
/// [`ConnectivityMonitor::set_online`] to go online.
pub struct SyncService<T: Transport> {
    store: SharedStore,
    engine: Arc<SyncEngine<T>>,
    monitor: ConnectivityMonitor<T>,
    coordinator: Coordinator<T>,
}

impl<T: Transport> SyncService<T> {
    pub fn new(store: SharedStore, transport: T, state_dir: PathBuf) -> Self {
        let transport = Arc::new(transport);
        let (online_tx, online_rx) = watch::channel(false);

        let engine = Arc::new(SyncEngine::new(
            store.clone(),
            Arc::clone(&transport),
            online_rx.clone(),
            state_dir,
        ));
        let monitor = ConnectivityMonitor::new(online_tx, Arc::clone(&engine));
        let coordinator = Coordinator::new(store.clone(), transport, online_rx);

        SyncService {
            store,
            engine,
            monitor,
            coordinator,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn engine(&self) -> &SyncEngine<T> {
        &self.engine
    }

    pub fn monitor(&self) -> &ConnectivityMonitor<T> {
        &self.monitor
    }

    pub fn coordinator(&self) -> &Coordinator<T> {
        &self.coordinator
    }
}
