// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Holds the JSON tree for thread-safe access and persists it to
//! `tree.json` after every change.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use uc_core::RemotePath;

const TREE_FILE_NAME: &str = "tree.json";

/// Error type for state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tree file: {0}")]
    Json(#[from] serde_json::Error),

    /// Writes under a rejected prefix are refused.
    #[error("permission denied at {0}")]
    PermissionDenied(String),
}

pub type Result<T> = std::result::Result<T, StateError>;

/// Shared server state containing the canonical tree.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    /// The tree (protected by mutex for writes).
    tree: Mutex<Value>,
    /// Where the tree is persisted.
    tree_path: PathBuf,
    /// Paths under which every write is refused.
    rejected: Vec<RemotePath>,
}

impl ServerState {
    /// Creates server state persisted in the given directory, loading any
    /// existing tree.
    pub fn new(data_dir: &Path, rejected: Vec<RemotePath>) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let tree_path = data_dir.join(TREE_FILE_NAME);

        let tree = match fs::read_to_string(&tree_path) {
            Ok(content) if !content.trim().is_empty() => serde_json::from_str(&content)?,
            Ok(_) => Value::Null,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Value::Null,
            Err(e) => return Err(e.into()),
        };
        info!(path = %tree_path.display(), "loaded tree");

        Ok(ServerState {
            inner: Arc::new(ServerStateInner {
                tree: Mutex::new(tree),
                tree_path,
                rejected,
            }),
        })
    }

    /// Replaces the value at `path`, creating intermediate objects.
    ///
    /// `null` deletes the value; parents left empty are removed too.
    pub async fn set(&self, path: &RemotePath, value: Value) -> Result<()> {
        if self.is_rejected(path) {
            return Err(StateError::PermissionDenied(path.to_string()));
        }

        let mut tree = self.inner.tree.lock().await;
        let mut updated = tree.clone();
        let segments: Vec<&str> = path.segments().collect();
        if value.is_null() {
            remove_at(&mut updated, &segments);
        } else {
            set_at(&mut updated, &segments, value);
        }

        persist(&self.inner.tree_path, &updated)?;
        *tree = updated;
        debug!(%path, "set");
        Ok(())
    }

    /// Returns the value at `path`, `null` when absent.
    pub async fn get(&self, path: &RemotePath) -> Value {
        let tree = self.inner.tree.lock().await;
        path.segments()
            .try_fold(&*tree, |node, segment| node.get(segment))
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn is_rejected(&self, path: &RemotePath) -> bool {
        self.inner.rejected.iter().any(|prefix| {
            let mut segments = path.segments();
            prefix.segments().all(|p| segments.next() == Some(p))
        })
    }
}

fn set_at(node: &mut Value, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry(first.to_string()).or_insert(Value::Null);
        set_at(child, rest, value);
    }
}

/// Returns true if `node` is left empty.
fn remove_at(node: &mut Value, segments: &[&str]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        *node = Value::Null;
        return true;
    };
    let Value::Object(map) = node else {
        return false;
    };
    let emptied = match map.get_mut(*first) {
        Some(child) => remove_at(child, rest),
        None => false,
    };
    if emptied {
        map.remove(*first);
    }
    if map.is_empty() {
        *node = Value::Null;
        return true;
    }
    false
}

fn persist(path: &Path, tree: &Value) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp)?;
    file.write_all(serde_json::to_string_pretty(tree)?.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
