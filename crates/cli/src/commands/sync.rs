// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use super::{print_json, Context};
use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::sync::{SyncOutcome, SyncReport};

#[derive(Serialize)]
struct FailedJson<'a> {
    path: &'a str,
    error: &'a str,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    outcome: &'static str,
    attempted: usize,
    synced: usize,
    superseded: usize,
    failed: Vec<FailedJson<'a>>,
    remaining: usize,
}

impl<'a> From<&'a SyncReport> for ReportJson<'a> {
    fn from(report: &'a SyncReport) -> Self {
        ReportJson {
            outcome: report.outcome().as_str(),
            attempted: report.attempted,
            synced: report.synced,
            superseded: report.superseded,
            failed: report
                .failed
                .iter()
                .map(|f| FailedJson {
                    path: f.path.as_str(),
                    error: &f.error,
                })
                .collect(),
            remaining: report.remaining,
        }
    }
}

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    if ctx.config.remote.is_none() {
        return Err(Error::NoRemote);
    }

    let report = ctx.service.sync_now().await?;
    match output {
        OutputFormat::Json => print_json(&ReportJson::from(&report))?,
        OutputFormat::Text => print_report(&report),
    }

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(Error::SyncIncomplete {
            failed: report.failed.len(),
            remaining: report.remaining,
        })
    }
}

/// One-paragraph text summary of a sync run.
pub(crate) fn print_report(report: &SyncReport) {
    match report.outcome() {
        SyncOutcome::Idle => println!("Nothing to sync"),
        SyncOutcome::Complete => println!("Synced {} write(s)", report.synced + report.superseded),
        SyncOutcome::Partial | SyncOutcome::Failed => println!(
            "Synced {} of {} write(s)",
            report.synced + report.superseded,
            report.attempted
        ),
    }
    for failed in &report.failed {
        println!("  failed: {}: {}", failed.path, failed.error);
    }
    if report.superseded > 0 {
        println!(
            "  {} path(s) were written again during the sync and stay queued",
            report.superseded
        );
    }
}
