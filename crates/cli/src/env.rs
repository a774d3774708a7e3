// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `UC_HOME` if set and non-empty.
pub fn uc_home() -> Option<PathBuf> {
    non_empty(vars::UC_HOME).map(PathBuf::from)
}

/// Returns the value of `UC_LOG` if set and non-empty.
pub fn uc_log() -> Option<String> {
    non_empty(vars::UC_LOG)
}

/// Returns the value of `XDG_DATA_HOME` if set and non-empty.
pub fn xdg_data_home() -> Option<PathBuf> {
    non_empty(vars::XDG_DATA_HOME).map(PathBuf::from)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
