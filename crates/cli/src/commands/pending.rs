// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{format_timestamp, print_json, Context};
use crate::cli::OutputFormat;
use crate::error::Result;

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let writes = ctx.service.pending().await?;

    match output {
        OutputFormat::Json => print_json(&writes)?,
        OutputFormat::Text => {
            if writes.is_empty() {
                println!("No pending writes");
            }
            for write in &writes {
                println!(
                    "{}  {}  {}",
                    format_timestamp(write.timestamp),
                    write.path,
                    write.data
                );
            }
        }
    }
    Ok(())
}
