// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session marker persisted for best-effort session continuity.

use serde::{Deserialize, Serialize};

/// Records who was last signed in, so a restart while the auth service is
/// unreachable can still resume as that user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMarker {
    /// Remote user identifier.
    #[serde(alias = "uid")]
    pub user_id: String,
    /// Login time in milliseconds since the Unix epoch.
    #[serde(alias = "lastLogin")]
    pub last_login_epoch_ms: i64,
}

impl SessionMarker {
    pub fn new(user_id: impl Into<String>, last_login_epoch_ms: i64) -> Self {
        SessionMarker {
            user_id: user_id.into(),
            last_login_epoch_ms,
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
