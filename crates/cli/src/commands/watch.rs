// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `uc watch`: reconnect sync loop.
//!
//! Watch holds the store lock for as long as it runs, so it also takes
//! writes on stdin, one per line. Stdin closing does not stop it; only
//! `quit` or an interrupt does.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uc_core::RemotePath;

use super::sync::print_report;
use super::write::parse_value;
use super::Context;
use crate::error::Result;
use crate::logging;
use crate::service::{OfflineService, WriteOutcome};

/// One stdin line.
#[derive(Debug, PartialEq)]
pub(crate) enum Line {
    Blank,
    Write(RemotePath, Value),
    Sync,
    Quit,
}

pub(crate) fn parse_line(line: &str) -> Result<Line> {
    let line = line.trim();
    match line {
        "" => return Ok(Line::Blank),
        "sync" => return Ok(Line::Sync),
        "quit" | "exit" => return Ok(Line::Quit),
        _ => {}
    }

    let (path, value) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let path = RemotePath::parse(path)?;
    Ok(Line::Write(path, parse_value(value.trim())?))
}

pub async fn run(ctx: Context, verbose: bool) -> Result<()> {
    logging::init_file(&ctx.home.join("watch.log"), verbose);

    let cancel = CancellationToken::new();
    let service = Arc::new(ctx.service);

    let poller = match (ctx.probe, ctx.config.remote.as_ref()) {
        (Some(probe), Some(remote)) => Some(service.monitor().spawn_poller(
            Arc::new(probe),
            remote.probe_interval(),
            cancel.clone(),
        )),
        _ => {
            println!("No remote configured, writes will only be queued");
            None
        }
    };

    let runner = {
        let service = service.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { service.run_until_cancelled(cancel).await })
    };
    info!(home = %ctx.home.display(), "watching");
    println!("Watching for connectivity changes (Ctrl-C to stop)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if !handle_line(&service, &line).await {
                        break;
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    warn!(error = %e, "stdin closed");
                    stdin_open = false;
                }
            },
        }
    }

    cancel.cancel();
    if let Err(e) = runner.await {
        warn!(error = %e, "reconnect loop ended abnormally");
    }
    if let Some(poller) = poller {
        let _ = poller.await;
    }
    info!("watch stopped");
    Ok(())
}

/// Returns false when the line asks to stop.
async fn handle_line(service: &OfflineService, line: &str) -> bool {
    let result = match parse_line(line) {
        Ok(Line::Blank) => Ok(()),
        Ok(Line::Quit) => return false,
        Ok(Line::Sync) => service.sync_now().await.map(|report| print_report(&report)),
        Ok(Line::Write(path, data)) => {
            service
                .write(path.clone(), data)
                .await
                .map(|outcome| match outcome {
                    WriteOutcome::Applied => println!("Applied {}", path),
                    WriteOutcome::Queued(_) => println!("Queued {}", path),
                })
        }
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        println!("error: {}", e);
    }
    true
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
