// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ucrs - Offline write queue and reconnect sync.
//!
//! This crate provides the functionality behind the `uc` CLI: writes
//! addressed to a hierarchical remote store are applied directly while the
//! remote is reachable and queued in a local durable store otherwise. The
//! queue is replayed when connectivity returns.
//!
//! # Main Components
//!
//! - [`OfflineService`] - write-through with offline fallback, sync, session
//! - [`store`] - durable key-value storage ([`FileStore`], [`MemoryStore`])
//! - [`sync`] - offline queue, connectivity monitor, remote client, sync engine
//! - [`Config`] - home directory configuration
//! - [`Error`] - Error types for all operations
//!
//! # Embedding
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ucrs::sync::{ConnectivityMonitor, WebSocketRemote};
//! use ucrs::{FileStore, OfflineService};
//!
//! let store = Arc::new(FileStore::open(&home)?);
//! let remote = Arc::new(WebSocketRemote::new("ws://127.0.0.1:7890", timeout));
//! let service = OfflineService::new(store, remote, ConnectivityMonitor::offline());
//!
//! service.write(path, serde_json::json!({"theme": "dark"})).await?;
//! ```

mod cli;
mod commands;
mod logging;

pub mod config;
pub mod env;
pub mod error;
pub mod service;
pub mod session;
pub mod store;
pub mod sync;

pub use cli::{Cli, Command, OutputArgs, OutputFormat, PrefsCommand};
pub use config::{init_home, resolve_home, Config, RemoteConfig};
pub use error::{Error, Result};
pub use service::{Login, OfflineService, WriteOutcome};
pub use session::SessionStore;
pub use store::{DurableStore, FileStore, MemoryStore, StoreError};

use clap::CommandFactory;
use clap_complete::generate;

use commands::Context;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    if let Command::Completion { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "uc", &mut std::io::stdout());
        return Ok(());
    }

    // Watch logs to a file once it knows its home
    if !matches!(cli.command, Command::Watch) {
        logging::init_stderr(cli.verbose);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let home = resolve_home(cli.home);

    if let Command::Init { remote } = cli.command {
        return commands::init::run(&home, remote);
    }

    let ctx = Context::open(&home)?;
    match cli.command {
        Command::Write { path, value } => commands::write::run(&ctx, &path, &value).await,
        Command::Pending { output } => commands::pending::run(&ctx, output.output).await,
        Command::Sync { output } => commands::sync::run(&ctx, output.output).await,
        Command::Status { output } => commands::status::run(&ctx, output.output).await,
        Command::Login { user_id } => commands::session::login(&ctx, &user_id).await,
        Command::Logout { keep_pending } => commands::session::logout(&ctx, keep_pending).await,
        Command::Whoami { output } => commands::session::whoami(&ctx, output.output).await,
        Command::Prefs(PrefsCommand::Show { output }) => {
            commands::prefs::show(&ctx, output.output).await
        }
        Command::Prefs(PrefsCommand::Set { theme, language }) => {
            commands::prefs::set(&ctx, theme, language).await
        }
        Command::Watch => commands::watch::run(ctx, cli.verbose).await,
        Command::Forget { path } => commands::write::forget(&ctx, &path).await,
        Command::Discard => commands::write::discard(&ctx).await,
        // Handled before the runtime starts
        Command::Init { .. } | Command::Completion { .. } => Ok(()),
    }
}
