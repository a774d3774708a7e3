// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline writes and reconnect sync.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  queued   ┌─────────────┐     ┌─────────────┐
//! │   Service   │──────────►│    Queue    │────►│ DurableStore│
//! │   (write)   │           │ (OffQueue)  │     │   (trait)   │
//! └─────────────┘           └─────────────┘     └─────────────┘
//!        │ online                  ▲
//!        ▼                         │ drain / remove_if_current
//! ┌─────────────┐           ┌─────────────┐
//! │ RemoteStore │◄──────────│ SyncEngine  │◄──── Online transition
//! │   (trait)   │           └─────────────┘      (ConnectivityMonitor)
//! └─────────────┘
//! ```
//!
//! # Features
//!
//! - Last-write-wins queue persisted as one JSON blob
//! - Compare-and-remove so a write queued mid-sync is never lost
//! - Connectivity transitions de-duplicated with an explicit unsubscribe
//! - Injectable store, remote and signal traits for testing

mod connectivity;
mod engine;
mod queue;
mod remote;

pub use connectivity::{
    ConnectivityMonitor, ConnectivitySignal, ConnectivityState, Subscription, TcpProbe, Transition,
};
pub use engine::{FailedWrite, SyncEngine, SyncError, SyncOutcome, SyncReport, SyncResult};
pub use queue::{OfflineQueue, QueueError, QueueResult, PENDING_WRITES_KEY};
pub use remote::{
    RemoteError, RemoteFuture, RemoteResult, RemoteStore, Unconfigured, WebSocketRemote,
};

#[cfg(test)]
pub(crate) mod test_helpers;
