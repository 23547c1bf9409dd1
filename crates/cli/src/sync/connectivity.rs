// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Online/offline tracking.
//!
//! The flag lives in a `watch` channel read by the coordinator and the engine.
//! Going from offline to online triggers a sync pass.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::engine::{SyncEngine, SyncReport};
use super::transport::Transport;
use crate::error::Result;

/// Delays for [`ConnectivityMonitor::watch`].
#[derive(Debug, Clone, Copy)]
pub struct WatchConfig {
    /// Delay between probes while online, and the cap while offline.
    pub interval: Duration,
    /// First delay after a failed probe; doubles on each further failure.
    pub initial_backoff: Duration,
}

impl WatchConfig {
    pub fn new(interval: Duration) -> Self {
        WatchConfig {
            interval,
            initial_backoff: Duration::from_secs(1).min(interval),
        }
    }
}

/// Owns the online flag and reacts to transitions.
pub struct ConnectivityMonitor<T: Transport> {
    online: watch::Sender<bool>,
    engine: Arc<SyncEngine<T>>,
}

impl<T: Transport> ConnectivityMonitor<T> {
    pub fn new(online: watch::Sender<bool>, engine: Arc<SyncEngine<T>>) -> Self {
        ConnectivityMonitor { online, engine }
    }

    pub fn is_online(&self) -> bool {
        *self.online.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.online.subscribe()
    }

    /// Updates the flag. Returns the report of the sync pass run on the
    /// offline to online edge, and `None` for any other change.
    pub async fn set_online(&self, online: bool) -> Result<Option<SyncReport>> {
        let was_online = self.online.send_replace(online);
        match (was_online, online) {
            (false, true) => {
                tracing::info!("connection restored");
                Ok(Some(self.engine.sync_data().await?))
            }
            (true, false) => {
                tracing::info!("connection lost");
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Asks the remote whether it answers and applies the result.
    pub async fn probe(&self) -> Result<Option<SyncReport>> {
        let reachable = match self.engine.transport().probe().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "probe failed");
                false
            }
        };
        self.set_online(reachable).await
    }

    /// Probes until `shutdown` resolves.
    ///
    /// While online, probes every `interval`. While offline, the delay starts
    /// at `initial_backoff` and doubles up to `interval`.
    pub async fn watch<F>(&self, config: WatchConfig, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut backoff = config.initial_backoff;

        loop {
            if let Some(report) = self.probe().await? {
                tracing::info!(
                    synced = report.synced,
                    failed = report.failed,
                    remaining = report.remaining,
                    "synced after reconnect"
                );
            }

            let delay = if self.is_online() {
                backoff = config.initial_backoff;
                config.interval
            } else {
                let delay = backoff;
                backoff = next_backoff(backoff, config.interval);
                delay
            };

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("stopping connectivity watch");
                    return Ok(());
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Doubles `current`, capped at `cap`. Saturates instead of overflowing.
pub(crate) fn next_backoff(current: Duration, cap: Duration) -> Duration {
    current.saturating_mul(2).min(cap)
}
