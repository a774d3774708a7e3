// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use uc_core::{Language, Preferences, Theme};

use super::{print_json, Context};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::service::WriteOutcome;

pub async fn show(ctx: &Context, output: OutputFormat) -> Result<()> {
    let prefs = ctx.service.preferences().await?;
    match output {
        OutputFormat::Json => print_json(&prefs)?,
        OutputFormat::Text => print_prefs(&prefs),
    }
    Ok(())
}

pub async fn set(ctx: &Context, theme: Option<Theme>, language: Option<Language>) -> Result<()> {
    ctx.refresh().await;
    let (prefs, outcome) = ctx.service.update_preferences(theme, language).await?;
    print_prefs(&prefs);
    if matches!(outcome, WriteOutcome::Queued(_)) {
        println!("Queued for sync (remote unreachable)");
    }
    Ok(())
}

fn print_prefs(prefs: &Preferences) {
    println!("theme: {}", prefs.theme);
    println!("language: {}", prefs.language);
}
