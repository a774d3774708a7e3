// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! uc-remote: development stand-in for the hosted realtime database.
//!
//! Holds a JSON tree, applies `set` at slash-separated paths and answers
//! `get` and `ping` over WebSocket.

mod server;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use uc_core::RemotePath;

/// uc-remote: hierarchical JSON store over WebSocket
#[derive(Parser, Debug)]
#[command(name = "uc-remote")]
#[command(about = "WebSocket JSON tree server for the uc offline sync client")]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1:7890")]
    bind: SocketAddr,

    /// Directory for tree storage
    #[arg(short, long, default_value = ".")]
    data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Refuse writes at or below this path (repeatable)
    #[arg(long, value_name = "PATH")]
    reject: Vec<RemotePath>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting uc-remote server");
    info!("  Bind address: {}", args.bind);
    info!("  Data directory: {}", args.data.display());
    for prefix in &args.reject {
        info!("  Rejecting writes under: {}", prefix);
    }

    let state = state::ServerState::new(&args.data, args.reject)?;

    server::run(args.bind, state).await?;

    Ok(())
}
