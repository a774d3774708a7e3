// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed store.
//!
//! All keys live in one JSON object file (`store.json`). Every mutation
//! rewrites the file through a temp file, fsync, and rename, so a crash leaves
//! either the old or the new contents. The store directory is owned by a
//! single process at a time via an exclusive lock on `store.lock`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{DurableStore, StoreError, StoreFuture, StoreResult};

const STORE_FILE_NAME: &str = "store.json";
const LOCK_FILE_NAME: &str = "store.lock";

pub struct FileStore {
    /// Path to `store.json`.
    path: PathBuf,
    /// Authoritative copy of the file contents.
    entries: Mutex<BTreeMap<String, String>>,
    /// Held for the lifetime of the store.
    _lock: fs::File,
}

impl FileStore {
    /// Open (or create) the store in `dir`.
    ///
    /// Fails with [`StoreError::Locked`] when another process has it open.
    /// An unreadable store file is moved aside and the store starts empty.
    pub fn open(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir)?;

        let lock = acquire_lock(&dir.join(LOCK_FILE_NAME))?;
        let path = dir.join(STORE_FILE_NAME);
        let entries = load_entries(&path)?;
        debug!(path = %path.display(), keys = entries.len(), "opened store");

        Ok(FileStore {
            path,
            entries: Mutex::new(entries),
            _lock: lock,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Apply `change` to a copy of the entries, persist it, then commit it in
    /// memory. A failed write leaves the in-memory state untouched.
    async fn mutate<F>(&self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        if !change(&mut next) {
            return Ok(());
        }
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }
}

impl DurableStore for FileStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        Box::pin(async move { Ok(self.entries.lock().await.get(key).cloned()) })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.mutate(|entries| {
                entries.insert(key.to_string(), value);
                true
            })
            .await
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move { self.mutate(|entries| entries.remove(key).is_some()).await })
    }

    fn keys(&self) -> StoreFuture<'_, Vec<String>> {
        Box::pin(async move { Ok(self.entries.lock().await.keys().cloned().collect()) })
    }
}

fn acquire_lock(lock_path: &Path) -> StoreResult<fs::File> {
    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)?;
    file.try_lock_exclusive().map_err(|_| StoreError::Locked {
        path: lock_path.parent().unwrap_or(lock_path).to_path_buf(),
    })?;
    Ok(file)
}

fn load_entries(path: &Path) -> StoreResult<BTreeMap<String, String>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    match serde_json::from_str(&content) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            let aside = quarantine_path(path);
            warn!(
                path = %path.display(),
                moved_to = %aside.display(),
                error = %e,
                "store file is unreadable, starting empty"
            );
            fs::rename(path, &aside)?;
            Ok(BTreeMap::new())
        }
    }
}

fn quarantine_path(path: &Path) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    path.with_extension(format!("json.corrupt-{}", stamp))
}
