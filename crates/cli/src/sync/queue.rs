// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for writes that could not be confirmed by the remote store.
//!
//! The whole [`PendingWriteSet`] lives under one store key as a JSON object.
//! Every mutation is a read-modify-write of that blob, serialized by an
//! in-process mutex so concurrent enqueues and sync removals never lose
//! updates. A missing or unreadable blob reads as an empty queue.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use uc_core::{ClockSource, Decoded, PendingWrite, PendingWriteSet, RemotePath, SystemClock};

use crate::store::{DurableStore, StoreError};

/// Store key holding the pending write set.
pub const PENDING_WRITES_KEY: &str = "@pending_writes";

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Durable store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] uc_core::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Offline write queue, last-write-wins per path.
pub struct OfflineQueue {
    store: Arc<dyn DurableStore>,
    clock: Arc<dyn ClockSource>,
    /// Guards every read-modify-write of the blob.
    lock: Mutex<()>,
}

impl OfflineQueue {
    /// Create a queue over `store` using the system clock.
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Create a queue with a custom clock source.
    pub fn with_clock(store: Arc<dyn DurableStore>, clock: Arc<dyn ClockSource>) -> Self {
        OfflineQueue {
            store,
            clock,
            lock: Mutex::new(()),
        }
    }

    /// Insert or overwrite the pending write for `path`.
    ///
    /// Returns the entry as persisted.
    pub async fn enqueue(&self, path: RemotePath, data: Value) -> QueueResult<PendingWrite> {
        let _guard = self.lock.lock().await;
        let mut set = self.load().await?;
        let write = set.upsert(path, data, self.clock.now_ms());
        self.save(&set).await?;
        debug!(path = %write.path, timestamp = write.timestamp, "queued write");
        Ok(write)
    }

    /// Snapshot of all pending writes. Order carries no meaning.
    pub async fn drain(&self) -> QueueResult<Vec<PendingWrite>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.to_vec())
    }

    /// Remove every pending write. Returns how many were dropped.
    pub async fn clear(&self) -> QueueResult<usize> {
        let _guard = self.lock.lock().await;
        let dropped = self.load().await?.len();
        self.store.remove(PENDING_WRITES_KEY).await?;
        Ok(dropped)
    }

    /// Remove the pending write for `path`, whatever it holds.
    ///
    /// The set is written back even when `path` was not queued.
    pub async fn remove(&self, path: &RemotePath) -> QueueResult<Option<PendingWrite>> {
        let _guard = self.lock.lock().await;
        let mut set = self.load().await?;
        let removed = set.remove(path);
        self.save(&set).await?;
        Ok(removed)
    }

    /// Remove `attempted` only if it is still the queued write for its path.
    ///
    /// Returns false when a newer write for the same path was queued since
    /// `attempted` was drained; that newer write stays queued.
    pub async fn remove_if_current(&self, attempted: &PendingWrite) -> QueueResult<bool> {
        let _guard = self.lock.lock().await;
        let mut set = self.load().await?;
        if !set.remove_if_current(attempted) {
            return Ok(false);
        }
        self.save(&set).await?;
        Ok(true)
    }

    /// Number of pending writes.
    pub async fn len(&self) -> QueueResult<usize> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.len())
    }

    /// Check if the queue is empty.
    pub async fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len().await? == 0)
    }

    async fn load(&self) -> QueueResult<PendingWriteSet> {
        let Some(raw) = self.store.get(PENDING_WRITES_KEY).await? else {
            return Ok(PendingWriteSet::new());
        };

        match PendingWriteSet::decode(&raw) {
            Decoded::Clean(set) => Ok(set),
            Decoded::Salvaged { set, dropped } => {
                warn!(?dropped, kept = set.len(), "dropped malformed pending writes");
                Ok(set)
            }
            Decoded::Corrupt => {
                warn!(bytes = raw.len(), "pending writes are unreadable, treating queue as empty");
                Ok(PendingWriteSet::new())
            }
        }
    }

    async fn save(&self, set: &PendingWriteSet) -> QueueResult<()> {
        if set.is_empty() {
            self.store.remove(PENDING_WRITES_KEY).await?;
        } else {
            self.store.set(PENDING_WRITES_KEY, set.to_json()?).await?;
        }
        Ok(())
    }
}
