// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engine: replays queued writes against the remote store.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use uc_core::RemotePath;

use super::queue::{OfflineQueue, QueueError};
use super::remote::RemoteStore;

/// Error type for sync runs.
///
/// Remote failures never show up here; they are per-entry results in the
/// [`SyncReport`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Queue error.
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Result type for sync runs.
pub type SyncResult<T> = Result<T, SyncError>;

/// Overall result of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing was queued.
    Idle,
    /// Every attempted write was applied.
    Complete,
    /// Some writes were applied, some stay queued.
    Partial,
    /// No write was applied.
    Failed,
}

impl SyncOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncOutcome::Idle => "idle",
            SyncOutcome::Complete => "complete",
            SyncOutcome::Partial => "partial",
            SyncOutcome::Failed => "failed",
        }
    }
}

/// A write that stayed queued after a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedWrite {
    pub path: RemotePath,
    pub error: String,
}

/// Summary of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries drained and attempted.
    pub attempted: usize,
    /// Entries applied and removed from the queue.
    pub synced: usize,
    /// Entries applied whose path was re-queued with newer data mid-run.
    pub superseded: usize,
    /// Entries that stay queued.
    pub failed: Vec<FailedWrite>,
    /// Queue length after the run.
    pub remaining: usize,
}

impl SyncReport {
    pub fn outcome(&self) -> SyncOutcome {
        if self.attempted == 0 {
            SyncOutcome::Idle
        } else if self.failed.is_empty() {
            SyncOutcome::Complete
        } else if self.failed.len() == self.attempted {
            SyncOutcome::Failed
        } else {
            SyncOutcome::Partial
        }
    }
}

/// Drains the offline queue into the remote store.
pub struct SyncEngine {
    queue: Arc<OfflineQueue>,
    remote: Arc<dyn RemoteStore>,
    /// One run at a time; a second trigger waits and then sees what is left.
    run_lock: Mutex<()>,
}

impl SyncEngine {
    pub fn new(queue: Arc<OfflineQueue>, remote: Arc<dyn RemoteStore>) -> Self {
        SyncEngine {
            queue,
            remote,
            run_lock: Mutex::new(()),
        }
    }

    pub fn queue(&self) -> &Arc<OfflineQueue> {
        &self.queue
    }

    /// Attempt every queued write once.
    ///
    /// Applied entries are removed only if they are still the queued value
    /// for their path. A failing entry never stops the others.
    pub async fn sync(&self) -> SyncResult<SyncReport> {
        let _run = self.run_lock.lock().await;

        let writes = self.queue.drain().await?;
        if writes.is_empty() {
            debug!("nothing to sync");
            return Ok(SyncReport::default());
        }

        let results = join_all(
            writes
                .iter()
                .map(|write| self.remote.write(&write.path, &write.data)),
        )
        .await;

        let mut report = SyncReport {
            attempted: writes.len(),
            ..SyncReport::default()
        };

        for (write, result) in writes.iter().zip(results) {
            if let Err(e) = result {
                warn!(path = %write.path, error = %e, "remote write failed, keeping entry");
                report.failed.push(FailedWrite {
                    path: write.path.clone(),
                    error: e.to_string(),
                });
                continue;
            }

            match self.queue.remove_if_current(write).await {
                Ok(true) => {
                    debug!(path = %write.path, "synced");
                    report.synced += 1;
                }
                Ok(false) => {
                    debug!(path = %write.path, "newer write queued during sync, keeping it");
                    report.superseded += 1;
                }
                Err(e) => {
                    warn!(path = %write.path, error = %e, "applied write could not be removed");
                    report.failed.push(FailedWrite {
                        path: write.path.clone(),
                        error: format!("could not remove from queue: {e}"),
                    });
                }
            }
        }

        report.remaining = match self.queue.len().await {
            Ok(len) => len,
            Err(e) => {
                warn!(error = %e, "could not count remaining writes");
                report.failed.len() + report.superseded
            }
        };
        info!(
            outcome = report.outcome().as_str(),
            attempted = report.attempted,
            synced = report.synced,
            superseded = report.superseded,
            failed = report.failed.len(),
            remaining = report.remaining,
            "sync finished"
        );
        Ok(report)
    }
}
