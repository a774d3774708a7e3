// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Home directory and configuration management.
//!
//! Everything `uc` persists lives under one home directory:
//! - `config.toml`: remote endpoint and timing settings
//! - `store.json` / `store.lock`: the durable store
//! - `watch.log`: log output of `uc watch`
//!
//! Without a `[remote]` table the client runs offline-only and every write
//! is queued.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

const HOME_DIR_NAME: &str = "uc";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration stored in `<home>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote store settings (optional - if absent, writes are only queued).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

/// Remote store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// WebSocket URL: `ws://...` or `wss://...`.
    pub url: String,
    /// Max time to wait for one remote write in milliseconds (default: 5000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Interval between reachability probes in milliseconds (default: 2000).
    /// Only relevant for `uc watch`.
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    /// Max time to wait for one probe in milliseconds (default: 1000).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_probe_interval_ms() -> u64 {
    2_000
}

fn default_probe_timeout_ms() -> u64 {
    1_000
}

impl RemoteConfig {
    /// Creates remote settings for `url` with default timings.
    pub fn new(url: impl Into<String>) -> Self {
        RemoteConfig {
            url: url.into(),
            request_timeout_ms: default_request_timeout_ms(),
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }

    /// Validates that the URL is a WebSocket URL with a host.
    ///
    /// Returns an error message if the URL is invalid.
    pub fn validate_url(&self) -> Option<String> {
        let Some(rest) = self
            .url
            .strip_prefix("ws://")
            .or_else(|| self.url.strip_prefix("wss://"))
        else {
            return Some(format!(
                "invalid remote URL '{}': must start with ws:// or wss://",
                self.url
            ));
        };

        if authority(rest).is_empty() {
            return Some(format!("invalid remote URL '{}': missing host", self.url));
        }
        None
    }

    /// Returns `host:port` for TCP reachability probes.
    ///
    /// The port defaults to 80 for `ws://` and 443 for `wss://`.
    pub fn socket_address(&self) -> Option<String> {
        let (rest, default_port) = if let Some(rest) = self.url.strip_prefix("ws://") {
            (rest, 80)
        } else if let Some(rest) = self.url.strip_prefix("wss://") {
            (rest, 443)
        } else {
            return None;
        };

        let authority = authority(rest);
        if authority.is_empty() {
            return None;
        }

        // Bracketed IPv6 literals contain colons of their own
        let has_port = match authority.rfind(']') {
            Some(end) => authority[end..].contains(':'),
            None => authority.contains(':'),
        };
        if has_port {
            Some(authority.to_string())
        } else {
            Some(format!("{authority}:{default_port}"))
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Host and port part of a URL with the scheme already stripped.
fn authority(rest: &str) -> &str {
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    // Drop userinfo
    match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    }
}

impl Config {
    /// Creates a config, validating the remote URL if one is given.
    pub fn new(remote_url: Option<String>) -> Result<Self> {
        let remote = remote_url.map(RemoteConfig::new);
        if let Some(msg) = remote.as_ref().and_then(RemoteConfig::validate_url) {
            return Err(Error::Config(msg));
        }
        Ok(Config { remote })
    }

    /// Loads configuration from the given home directory.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Err(Error::NotInitialized);
        }
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if let Some(msg) = config.remote.as_ref().and_then(RemoteConfig::validate_url) {
            return Err(Error::Config(msg));
        }
        Ok(config)
    }

    /// Saves configuration to the given home directory.
    pub fn save(&self, home: &Path) -> Result<()> {
        let config_path = home.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Returns the remote URL if configured.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.url.as_str())
    }
}

/// Resolve the home directory.
///
/// Order: explicit `--home`, `UC_HOME`, `$XDG_DATA_HOME/uc`, the platform
/// data directory, then `~/.local/share/uc`.
pub fn resolve_home(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(env::uc_home)
        .or_else(|| env::xdg_data_home().map(|d| d.join(HOME_DIR_NAME)))
        .or_else(|| dirs::data_dir().map(|d| d.join(HOME_DIR_NAME)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local/share")
                .join(HOME_DIR_NAME)
        })
}

/// Initialize a new home directory with the given config.
pub fn init_home(home: &Path, config: &Config) -> Result<()> {
    if home.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(home.display().to_string()));
    }
    fs::create_dir_all(home)?;
    config.save(home)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
