// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod init;
pub mod pending;
pub mod prefs;
pub mod session;
pub mod status;
pub mod sync;
pub mod watch;
pub mod write;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::DateTime;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::service::OfflineService;
use crate::store::FileStore;
use crate::sync::{
    ConnectivityMonitor, ConnectivityState, RemoteStore, TcpProbe, Unconfigured, WebSocketRemote,
};

/// Everything a command needs, built once per invocation.
pub struct Context {
    pub home: PathBuf,
    pub config: Config,
    pub service: OfflineService,
    probe: Option<TcpProbe>,
}

impl Context {
    /// Open the store under `home` and wire the service to the configured
    /// remote. Starts offline; call [`Context::refresh`] to probe.
    pub fn open(home: &Path) -> Result<Self> {
        let config = Config::load(home)?;
        let store = Arc::new(FileStore::open(home)?);

        let (remote, probe): (Arc<dyn RemoteStore>, Option<TcpProbe>) = match &config.remote {
            Some(remote) => (
                Arc::new(WebSocketRemote::new(&remote.url, remote.request_timeout())),
                remote
                    .socket_address()
                    .map(|addr| TcpProbe::new(addr, remote.probe_timeout())),
            ),
            None => (Arc::new(Unconfigured), None),
        };

        let service = OfflineService::new(store, remote, ConnectivityMonitor::offline());
        Ok(Context {
            home: home.to_path_buf(),
            config,
            service,
            probe,
        })
    }

    /// Probe the remote once. Without a remote this stays offline.
    pub async fn refresh(&self) -> ConnectivityState {
        match &self.probe {
            Some(probe) => self.service.monitor().refresh(probe).await,
            None => self.service.monitor().current(),
        }
    }

    pub fn probe(&self) -> Option<&TcpProbe> {
        self.probe.as_ref()
    }
}

/// Format milliseconds since the epoch for display.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
