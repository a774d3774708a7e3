// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::config::{init_home, Config};
use crate::error::Result;

pub fn run(home: &Path, remote: Option<String>) -> Result<()> {
    let config = Config::new(remote)?;
    init_home(home, &config)?;

    println!("Initialized uc at {}", home.display());
    match config.remote_url() {
        Some(url) => println!("Remote: {}", url),
        None => println!("Remote: none (writes will be queued until one is configured)"),
    }
    Ok(())
}
