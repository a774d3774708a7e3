// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::Value;
use uc_core::RemotePath;

use super::Context;
use crate::error::{Error, Result};
use crate::service::WriteOutcome;

pub async fn run(ctx: &Context, path: &str, value: &str) -> Result<()> {
    let path = RemotePath::parse(path)?;
    let data = parse_value(value)?;

    ctx.refresh().await;
    match ctx.service.write(path.clone(), data).await? {
        WriteOutcome::Applied => println!("Applied {}", path),
        WriteOutcome::Queued(_) => println!("Queued {} (remote unreachable)", path),
    }
    Ok(())
}

/// Parse a command-line JSON value.
pub(crate) fn parse_value(input: &str) -> Result<Value> {
    serde_json::from_str(input).map_err(|e| Error::InvalidJson {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Forget the queued write for one path.
pub async fn forget(ctx: &Context, path: &str) -> Result<()> {
    let path = RemotePath::parse(path)?;
    ctx.service.forget(&path).await?;
    println!("Forgot pending write for {}", path);
    Ok(())
}

/// Drop every queued write.
pub async fn discard(ctx: &Context) -> Result<()> {
    let count = ctx.service.discard().await?;
    println!("Discarded {} pending write(s)", count);
    Ok(())
}

#[cfg(test)]
#[path = "write_tests.rs"]
mod tests;
