// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.
//!
//! The filter comes from `UC_LOG` (same syntax as `RUST_LOG`). Without it,
//! only warnings are shown, or debug output with `-v`.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::env;

fn filter(default: &str) -> EnvFilter {
    env::uc_log()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Log to stderr.
pub fn init_stderr(verbose: bool) {
    // Fails only when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(if verbose { "debug" } else { "warn" }))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to `log_path`, appending. Falls back to stderr when the file cannot
/// be opened.
pub fn init_file(log_path: &Path, verbose: bool) {
    let filter = filter(if verbose { "debug" } else { "info" });

    if let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
