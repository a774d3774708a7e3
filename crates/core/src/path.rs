// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote path addressing.
//!
//! The remote store is a hierarchical namespace addressed by slash-separated
//! paths such as `users/42/preferences`. Segment rules follow the realtime
//! database key rules: no `.`, `#`, `$`, `[`, `]`, or control characters.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

const FORBIDDEN: [char; 5] = ['.', '#', '$', '[', ']'];

/// Maximum length of a normalized path in bytes.
pub const MAX_PATH_LEN: usize = 768;

/// A normalized, validated remote path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RemotePath(String);

impl RemotePath {
    /// Parses and normalizes a path.
    ///
    /// Leading and trailing slashes are trimmed. The remaining path must be
    /// non-empty and every segment must be a valid key.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Err(invalid("path is empty"));
        }
        if trimmed.len() > MAX_PATH_LEN {
            return Err(invalid("path is too long"));
        }

        for segment in trimmed.split('/') {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            if let Some(c) = segment.chars().find(|c| FORBIDDEN.contains(c)) {
                return Err(invalid(&format!("segment '{}' contains '{}'", segment, c)));
            }
            if segment.chars().any(char::is_control) {
                return Err(invalid("control characters are not allowed"));
            }
        }

        Ok(RemotePath(trimmed.to_string()))
    }

    /// Returns the normalized path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Appends a child segment, validating the result.
    pub fn child(&self, segment: &str) -> Result<Self> {
        RemotePath::parse(&format!("{}/{}", self.0, segment))
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RemotePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RemotePath::parse(s)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RemotePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RemotePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RemotePath::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
