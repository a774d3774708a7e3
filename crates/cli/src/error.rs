// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::store::StoreError;
use crate::sync::{QueueError, RemoteError, SyncError};

/// All possible errors that can occur in the ucrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'uc init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("no remote configured\n  hint: run 'uc init --remote ws://HOST:PORT' in a fresh home, or add a [remote] table to config.toml")]
    NoRemote,

    #[error("not logged in\n  hint: run 'uc login <user-id>' first")]
    NotLoggedIn,

    #[error("invalid JSON value '{input}': {reason}\n  hint: quote strings, e.g. '\"text\"'")]
    InvalidJson { input: String, reason: String },

    #[error("nothing pending for {0}")]
    NotPending(String),

    #[error("sync incomplete: {failed} write(s) failed, {remaining} still pending\n  hint: run 'uc sync' again once the remote is reachable")]
    SyncIncomplete { failed: usize, remaining: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] uc_core::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ucrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
