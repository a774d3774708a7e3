// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local durable key-value storage.
//!
//! A [`DurableStore`] is a string-keyed, string-valued map that survives
//! process restarts. The offline queue and the session records sit on top of
//! it; neither assumes anything beyond whole-value `get`/`set`/`remove`.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

/// Error type for durable store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Another process holds the store.
    #[error("store at {} is in use by another process\n  hint: stop the running 'uc watch' before using other commands", path.display())]
    Locked { path: PathBuf },

    /// The store cannot currently be read or written.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for durable store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future returned by [`DurableStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// Persistent string-keyed, string-valued map.
pub trait DurableStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()>;

    /// List every stored key.
    fn keys(&self) -> StoreFuture<'_, Vec<String>>;
}
