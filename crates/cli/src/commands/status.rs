// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use super::{format_timestamp, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::Result;

#[derive(Serialize)]
struct StatusJson<'a> {
    home: String,
    remote: Option<&'a str>,
    connected: bool,
    user: Option<String>,
    pending: usize,
    last_sync: Option<i64>,
}

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let connected = ctx.refresh().await.connected;
    let user = ctx.service.current_user().await?.map(|m| m.user_id);
    let pending = ctx.service.pending().await?.len();
    let last_sync = ctx.service.last_sync().await?;

    let status = StatusJson {
        home: ctx.home.display().to_string(),
        remote: ctx.config.remote_url(),
        connected,
        user,
        pending,
        last_sync,
    };

    match output {
        OutputFormat::Json => print_json(&status)?,
        OutputFormat::Text => {
            println!("Home: {}", status.home);
            match status.remote {
                Some(url) => println!(
                    "Remote: {} ({})",
                    url,
                    if connected { "online" } else { "offline" }
                ),
                None => println!("Remote: none"),
            }
            println!("User: {}", status.user.as_deref().unwrap_or("not logged in"));
            println!("Pending: {}", status.pending);
            println!(
                "Last sync: {}",
                status
                    .last_sync
                    .map(format_timestamp)
                    .unwrap_or_else(|| "never".to_string())
            );
        }
    }
    Ok(())
}
