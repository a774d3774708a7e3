// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `uc` with `--home` pointing at `home` and a clean environment.
pub fn uc(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("uc").unwrap();
    cmd.arg("--home")
        .arg(home.path())
        .env_remove("UC_HOME")
        .env_remove("UC_LOG");
    cmd
}

/// Helper to create an initialized home without a remote.
pub fn init_home() -> TempDir {
    let home = TempDir::new().unwrap();
    uc(&home).arg("init").assert().success();
    home
}

/// Helper to create an initialized home whose remote nobody listens on.
pub fn init_home_unreachable() -> TempDir {
    let home = TempDir::new().unwrap();
    uc(&home)
        .arg("init")
        .arg("--remote")
        .arg(format!("ws://127.0.0.1:{}", closed_port()))
        .assert()
        .success();
    home
}

/// A local port with no listener.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Parse stdout of a successful `-o json` command.
pub fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("-o").arg("json").output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
