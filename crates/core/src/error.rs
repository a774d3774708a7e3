// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for uc-core operations.

use thiserror::Error;

/// All possible errors that can occur in uc-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid path '{path}': {reason}\n  hint: paths are slash-separated, e.g. users/42/preferences")]
    InvalidPath { path: String, reason: String },

    #[error("invalid theme: '{0}'\n  hint: valid themes are: light, dark")]
    InvalidTheme(String),

    #[error("invalid language: '{0}'\n  hint: valid languages are: en, ru, kk")]
    InvalidLanguage(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for uc-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
