// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending writes awaiting confirmation from the remote store.
//!
//! A [`PendingWriteSet`] holds at most one [`PendingWrite`] per path. It is
//! persisted as a single JSON object keyed by path:
//!
//! ```json
//! {"users/42/preferences": {"path": "users/42/preferences", "data": {"theme": "dark"}, "timestamp": 1718000000000}}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::path::RemotePath;

/// A queued write that has not been confirmed by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingWrite {
    /// Remote location the write targets.
    pub path: RemotePath,
    /// Value to set at `path`.
    pub data: Value,
    /// Enqueue time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl PendingWrite {
    pub fn new(path: RemotePath, data: Value, timestamp: i64) -> Self {
        PendingWrite {
            path,
            data,
            timestamp,
        }
    }

    /// Returns true if `other` is the same queued write (path and timestamp).
    pub fn same_entry(&self, other: &PendingWrite) -> bool {
        self.path == other.path && self.timestamp == other.timestamp
    }
}

/// Mapping from path to the latest pending write for that path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingWriteSet {
    entries: BTreeMap<RemotePath, PendingWrite>,
}

/// Result of decoding a persisted set that may be damaged.
#[derive(Debug, PartialEq)]
pub enum Decoded {
    /// Every entry was well-formed.
    Clean(PendingWriteSet),
    /// The blob was a JSON object but some entries were malformed and dropped.
    Salvaged {
        set: PendingWriteSet,
        dropped: Vec<String>,
    },
    /// The blob was not a JSON object at all.
    Corrupt,
}

impl Decoded {
    /// Returns the recovered set, empty when corrupt.
    pub fn into_set(self) -> PendingWriteSet {
        match self {
            Decoded::Clean(set) | Decoded::Salvaged { set, .. } => set,
            Decoded::Corrupt => PendingWriteSet::new(),
        }
    }
}

impl PendingWriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &RemotePath) -> Option<&PendingWrite> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingWrite> {
        self.entries.values()
    }

    /// Inserts or overwrites the entry for `path`.
    ///
    /// The stored timestamp is `now_ms`, bumped past any existing entry's
    /// timestamp so every overwrite is distinguishable from the one it replaced.
    pub fn upsert(&mut self, path: RemotePath, data: Value, now_ms: i64) -> PendingWrite {
        let timestamp = match self.entries.get(&path) {
            Some(existing) if existing.timestamp >= now_ms => existing.timestamp.saturating_add(1),
            _ => now_ms,
        };
        let write = PendingWrite::new(path.clone(), data, timestamp);
        self.entries.insert(path, write.clone());
        write
    }

    /// Removes the entry for `path`, returning it if present.
    pub fn remove(&mut self, path: &RemotePath) -> Option<PendingWrite> {
        self.entries.remove(path)
    }

    /// Removes the entry only if it is still the write that was attempted.
    ///
    /// Returns false when the path is gone or holds a newer write.
    pub fn remove_if_current(&mut self, attempted: &PendingWrite) -> bool {
        match self.entries.get(&attempted.path) {
            Some(current) if current.same_entry(attempted) => {
                self.entries.remove(&attempted.path);
                true
            }
            _ => false,
        }
    }

    /// Returns all entries as an owned vector.
    pub fn to_vec(&self) -> Vec<PendingWrite> {
        self.entries.values().cloned().collect()
    }

    /// Serializes the set to its persisted JSON form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a persisted blob, salvaging what it can.
    ///
    /// Entries are keyed by path; the key is authoritative when a record's
    /// own `path` field disagrees with it.
    pub fn decode(raw: &str) -> Decoded {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return Decoded::Corrupt;
        };

        let mut set = PendingWriteSet::new();
        let mut dropped = Vec::new();

        for (key, value) in map {
            let Ok(path) = RemotePath::parse(&key) else {
                dropped.push(key);
                continue;
            };
            match serde_json::from_value::<PendingWrite>(value) {
                Ok(mut write) => {
                    write.path = path.clone();
                    set.entries.insert(path, write);
                }
                Err(_) => dropped.push(key),
            }
        }

        if dropped.is_empty() {
            Decoded::Clean(set)
        } else {
            Decoded::Salvaged { set, dropped }
        }
    }
}

impl FromIterator<PendingWrite> for PendingWriteSet {
    fn from_iter<I: IntoIterator<Item = PendingWrite>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|w| (w.path.clone(), w)).collect();
        PendingWriteSet { entries }
    }
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
