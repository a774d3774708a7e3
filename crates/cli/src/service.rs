// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The offline-capable write service.
//!
//! [`OfflineService`] is built once at startup from a durable store, a
//! remote store and a connectivity monitor, and handed to whoever needs to
//! write. It owns the offline queue, the sync engine and the session
//! records; nothing else touches them directly.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use uc_core::{
    ClockSource, Language, PendingWrite, Preferences, RemotePath, SessionMarker, SystemClock,
    Theme,
};

use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::store::DurableStore;
use crate::sync::{
    ConnectivityMonitor, OfflineQueue, RemoteStore, SyncEngine, SyncOutcome, SyncReport,
    Transition,
};

/// How a write was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// Confirmed by the remote store.
    Applied,
    /// Persisted locally, to be replayed on the next sync.
    Queued(PendingWrite),
}

/// Result of a login.
#[derive(Debug, Clone)]
pub struct Login {
    pub marker: SessionMarker,
    /// Sync run right after login, when online.
    pub sync: Option<SyncReport>,
}

pub struct OfflineService {
    queue: Arc<OfflineQueue>,
    remote: Arc<dyn RemoteStore>,
    engine: SyncEngine,
    monitor: ConnectivityMonitor,
    session: SessionStore,
}

impl OfflineService {
    pub fn new(
        store: Arc<dyn DurableStore>,
        remote: Arc<dyn RemoteStore>,
        monitor: ConnectivityMonitor,
    ) -> Self {
        Self::with_clock(store, remote, monitor, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn DurableStore>,
        remote: Arc<dyn RemoteStore>,
        monitor: ConnectivityMonitor,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        let queue = Arc::new(OfflineQueue::with_clock(store.clone(), clock.clone()));
        let engine = SyncEngine::new(queue.clone(), remote.clone());
        OfflineService {
            queue,
            remote,
            engine,
            monitor,
            session: SessionStore::with_clock(store, clock),
        }
    }

    pub fn monitor(&self) -> &ConnectivityMonitor {
        &self.monitor
    }

    /// Write `data` at `path`, falling back to the queue.
    ///
    /// Online, the remote write is tried once; if it fails the write is
    /// queued. Offline, it is queued directly. Only a queue failure is an
    /// error.
    pub async fn write(&self, path: RemotePath, data: Value) -> Result<WriteOutcome> {
        if self.monitor.is_connected() {
            match self.remote.write(&path, &data).await {
                Ok(()) => {
                    debug!(%path, "write applied");
                    return Ok(WriteOutcome::Applied);
                }
                Err(e) => warn!(%path, error = %e, "remote write failed, queueing"),
            }
        }

        let queued = self.queue.enqueue(path, data).await?;
        Ok(WriteOutcome::Queued(queued))
    }

    /// Replay the queue now.
    ///
    /// A complete run records the sync time. Failing to record it is
    /// logged and does not fail the run.
    pub async fn sync_now(&self) -> Result<SyncReport> {
        let report = self.engine.sync().await?;
        if report.outcome() == SyncOutcome::Complete {
            if let Err(e) = self.session.record_sync().await {
                warn!(error = %e, "could not record sync time");
            }
        }
        Ok(report)
    }

    /// Sync on every offline → online transition until `cancel` fires.
    ///
    /// Also syncs once at start when already online. A failed run is logged
    /// and the loop keeps going.
    pub async fn run_until_cancelled(&self, cancel: CancellationToken) {
        let mut subscription = self.monitor.subscribe();

        if self.monitor.is_connected() {
            self.sync_logged().await;
        }

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                transition = subscription.next() => match transition {
                    Some(Transition::Online) => self.sync_logged().await,
                    Some(Transition::Offline) => info!("offline, writes will be queued"),
                    None => break,
                },
            }
        }

        subscription.unsubscribe();
        debug!("reconnect loop stopped");
    }

    async fn sync_logged(&self) {
        if let Err(e) = self.sync_now().await {
            warn!(error = %e, "sync failed");
        }
    }

    /// Snapshot of pending writes, ordered by path.
    pub async fn pending(&self) -> Result<Vec<PendingWrite>> {
        let mut writes = self.queue.drain().await?;
        writes.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(writes)
    }

    /// Drop the pending write for `path`.
    pub async fn forget(&self, path: &RemotePath) -> Result<PendingWrite> {
        self.queue
            .remove(path)
            .await?
            .ok_or_else(|| Error::NotPending(path.to_string()))
    }

    /// Drop every pending write. Returns how many were dropped.
    pub async fn discard(&self) -> Result<usize> {
        Ok(self.queue.clear().await?)
    }

    /// Time of the last complete sync.
    pub async fn last_sync(&self) -> Result<Option<i64>> {
        Ok(self.session.last_sync().await?)
    }

    /// Record `user_id` as signed in and sync if online.
    pub async fn login(&self, user_id: &str) -> Result<Login> {
        // Validates the id as a path segment before anything is stored
        preferences_path(user_id)?;
        let marker = self.session.persist(user_id).await?;
        info!(user = %marker.user_id, "logged in");

        let sync = if self.monitor.is_connected() {
            Some(self.sync_now().await?)
        } else {
            None
        };
        Ok(Login { marker, sync })
    }

    /// Forget the session and cached preferences.
    ///
    /// Pending writes are dropped too unless `keep_pending`. Returns how many
    /// were dropped.
    pub async fn logout(&self, keep_pending: bool) -> Result<usize> {
        let dropped = if keep_pending { 0 } else { self.discard().await? };
        self.session.clear().await?;
        self.session.clear_preferences().await?;
        info!(dropped, "logged out");
        Ok(dropped)
    }

    pub async fn current_user(&self) -> Result<Option<SessionMarker>> {
        Ok(self.session.load().await?)
    }

    /// Cached preferences.
    pub async fn preferences(&self) -> Result<Preferences> {
        Ok(self.session.preferences().await?)
    }

    /// Merge a preference change, cache it and write it for the current user.
    pub async fn update_preferences(
        &self,
        theme: Option<Theme>,
        language: Option<Language>,
    ) -> Result<(Preferences, WriteOutcome)> {
        let user = self.current_user().await?.ok_or(Error::NotLoggedIn)?;
        let prefs = self.preferences().await?.merged(theme, language);
        self.session.save_preferences(&prefs).await?;

        let path = preferences_path(&user.user_id)?;
        let outcome = self.write(path, serde_json::to_value(prefs)?).await?;
        Ok((prefs, outcome))
    }
}

/// `users/<user_id>/preferences`, with `user_id` as a single segment.
pub fn preferences_path(user_id: &str) -> uc_core::Result<RemotePath> {
    if user_id.is_empty() || user_id.contains('/') {
        return Err(uc_core::Error::InvalidPath {
            path: format!("users/{user_id}/preferences"),
            reason: "user id must be a single path segment".to_string(),
        });
    }
    RemotePath::parse("users")?
        .child(user_id)?
        .child("preferences")
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
