// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use uc_core::RemotePath;

use super::connectivity::ConnectivitySignal;
use super::remote::{RemoteError, RemoteFuture, RemoteStore};
use crate::store::{DurableStore, MemoryStore, StoreError, StoreFuture};

/// Parse a path, panicking on invalid input.
pub fn path(s: &str) -> RemotePath {
    RemotePath::parse(s).unwrap()
}

/// Remote that records writes and fails on demand.
#[derive(Default)]
pub struct MockRemote {
    offline: AtomicBool,
    failing: Mutex<HashSet<String>>,
    writes: Mutex<Vec<(RemotePath, Value)>>,
}

impl MockRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail every write.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Fail writes to `path`.
    pub fn fail_path(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    pub fn heal_path(&self, path: &str) {
        self.failing.lock().unwrap().remove(path);
    }

    /// Writes applied so far, in completion order.
    pub fn writes(&self) -> Vec<(RemotePath, Value)> {
        self.writes.lock().unwrap().clone()
    }
}

impl RemoteStore for MockRemote {
    fn write<'a>(&'a self, path: &'a RemotePath, data: &'a Value) -> RemoteFuture<'a> {
        Box::pin(async move {
            if self.offline.load(Ordering::SeqCst) {
                return Err(RemoteError::ConnectionFailed("offline".to_string()));
            }
            if self.failing.lock().unwrap().contains(path.as_str()) {
                return Err(RemoteError::Rejected("permission denied".to_string()));
            }
            self.writes
                .lock()
                .unwrap()
                .push((path.clone(), data.clone()));
            Ok(())
        })
    }
}

/// Memory store whose reads and writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    failing_keys: Mutex<HashSet<String>>,
    /// Reads left before every read fails; `None` means unlimited.
    reads_left: Mutex<Option<usize>>,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fail writes to `key` only.
    pub fn fail_key(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    /// Allow `n` more reads, then fail every read.
    pub fn fail_reads_after(&self, n: usize) {
        *self.reads_left.lock().unwrap() = Some(n);
    }

    fn check_write(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst)
            || self.failing_keys.lock().unwrap().contains(key)
        {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), StoreError> {
        let mut left = self.reads_left.lock().unwrap();
        match left.as_mut() {
            Some(0) => Err(StoreError::Unavailable("read error".to_string())),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl DurableStore for FlakyStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        Box::pin(async move {
            self.check_read()?;
            self.inner.get(key).await
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.check_write(key)?;
            self.inner.set(key, value).await
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.check_write(key)?;
            self.inner.remove(key).await
        })
    }

    fn keys(&self) -> StoreFuture<'_, Vec<String>> {
        self.inner.keys()
    }
}

/// Connectivity signal with a settable reading.
#[derive(Default)]
pub struct MockSignal {
    reachable: AtomicBool,
}

impl MockSignal {
    pub fn new(reachable: bool) -> Arc<Self> {
        Arc::new(MockSignal {
            reachable: AtomicBool::new(reachable),
        })
    }

    pub fn set(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

impl ConnectivitySignal for MockSignal {
    fn probe(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        let reachable = self.reachable.load(Ordering::SeqCst);
        Box::pin(async move { reachable })
    }
}
