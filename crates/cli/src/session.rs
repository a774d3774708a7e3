// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session, preference and sync bookkeeping records in the durable store.
//!
//! None of these records is critical: a missing or unreadable record reads
//! as absent (or default) and is logged, never returned as an error.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use uc_core::{ClockSource, Preferences, SessionMarker, SystemClock};

use crate::store::{DurableStore, StoreResult};

/// Store key holding the [`SessionMarker`].
pub const AUTH_STATE_KEY: &str = "@auth_state";
/// Store key holding cached [`Preferences`].
pub const PREFERENCES_KEY: &str = "@preferences";
/// Store key holding the time of the last complete sync.
pub const LAST_SYNC_KEY: &str = "@last_sync";

pub struct SessionStore {
    store: Arc<dyn DurableStore>,
    clock: Arc<dyn ClockSource>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn DurableStore>, clock: Arc<dyn ClockSource>) -> Self {
        SessionStore { store, clock }
    }

    /// Record `user_id` as signed in now.
    pub async fn persist(&self, user_id: &str) -> StoreResult<SessionMarker> {
        let marker = SessionMarker::new(user_id, self.clock.now_ms());
        self.put(AUTH_STATE_KEY, &marker).await?;
        Ok(marker)
    }

    /// The last signed-in user, if any.
    pub async fn load(&self) -> StoreResult<Option<SessionMarker>> {
        self.fetch(AUTH_STATE_KEY).await
    }

    pub async fn clear(&self) -> StoreResult<()> {
        self.store.remove(AUTH_STATE_KEY).await
    }

    /// Cached preferences, defaults when none are cached.
    pub async fn preferences(&self) -> StoreResult<Preferences> {
        Ok(self.fetch(PREFERENCES_KEY).await?.unwrap_or_default())
    }

    pub async fn save_preferences(&self, prefs: &Preferences) -> StoreResult<()> {
        self.put(PREFERENCES_KEY, prefs).await
    }

    pub async fn clear_preferences(&self) -> StoreResult<()> {
        self.store.remove(PREFERENCES_KEY).await
    }

    /// Record a complete sync at the current time.
    pub async fn record_sync(&self) -> StoreResult<i64> {
        let now = self.clock.now_ms();
        self.put(LAST_SYNC_KEY, &now).await?;
        Ok(now)
    }

    pub async fn last_sync(&self) -> StoreResult<Option<i64>> {
        self.fetch(LAST_SYNC_KEY).await
    }

    async fn fetch<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable record");
                Ok(None)
            }
        }
    }

    async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, raw).await
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
