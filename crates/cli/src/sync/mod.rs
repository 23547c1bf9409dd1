// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline-first sync with the StudyHub REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Coordinator │────►│  Transport  │────►│   Remote    │
//! │  (writes)   │     │   (trait)   │     │   REST API  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   ▲
//!        ▼                   │
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ SharedStore │◄────│ SyncEngine  │◄────│ Connectivity │
//! │ (+ queue)   │     │  (replay)   │     │   Monitor    │
//! └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! # Features
//!
//! - Local-first writes with queue fallback when offline or on remote failure
//! - FIFO replay of the queue, one entry at a time, with failure tracking
//! - Sync on reconnect, driven by a `watch` channel online flag
//! - Probe loop with exponential backoff while offline
//! - Injectable transport trait for testing

mod connectivity;
mod coordinator;
mod engine;
mod service;
mod store;
mod transport;

pub use connectivity::{ConnectivityMonitor, WatchConfig};
pub use coordinator::{Coordinator, QueueReason, SyncOutcome};
pub use engine::{SkipReason, SyncEngine, SyncReport, SyncStatus};
pub use service::SyncService;
pub use store::SharedStore;
pub use transport::{
    HttpTransport, NoRemote, Transport, TransportError, TransportFuture, TransportResult,
};

#[cfg(test)]
pub(crate) mod test_helpers;
