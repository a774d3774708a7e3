// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `login`, `logout` and `whoami`.

use super::sync::print_report;
use super::{format_timestamp, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::{Error, Result};

pub async fn login(ctx: &Context, user_id: &str) -> Result<()> {
    ctx.refresh().await;
    let login = ctx.service.login(user_id).await?;
    println!("Logged in as {}", login.marker.user_id);
    if let Some(report) = login.sync {
        print_report(&report);
    }
    Ok(())
}

pub async fn logout(ctx: &Context, keep_pending: bool) -> Result<()> {
    let dropped = ctx.service.logout(keep_pending).await?;
    if dropped > 0 {
        println!("Logged out, discarded {} pending write(s)", dropped);
    } else {
        println!("Logged out");
    }
    Ok(())
}

pub async fn whoami(ctx: &Context, output: OutputFormat) -> Result<()> {
    let marker = ctx.service.current_user().await?.ok_or(Error::NotLoggedIn)?;
    match output {
        OutputFormat::Json => print_json(&marker)?,
        OutputFormat::Text => println!(
            "{} (since {})",
            marker.user_id,
            format_timestamp(marker.last_login_epoch_ms)
        ),
    }
    Ok(())
}
