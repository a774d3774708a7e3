// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use uc_core::{Language, Theme};

pub use args::OutputArgs;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "uc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline write queue with reconnect sync for a hierarchical remote store")]
#[command(
    long_about = "Offline write queue with reconnect sync for a hierarchical remote store.\n\n\
    Writes go straight to the remote when it is reachable and are queued locally otherwise.\n\
    Queued writes are replayed by 'uc sync', or automatically by 'uc watch' when the remote comes back."
)]
pub struct Cli {
    /// Use <path> as the home directory instead of UC_HOME or the data directory
    #[arg(long, global = true, value_name = "path")]
    pub home: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the home directory and configuration
    #[command(after_help = "\
Examples:
  uc init                                 Offline only, every write is queued
  uc init --remote ws://127.0.0.1:7890    Write through to a uc-remote server")]
    Init {
        /// Remote store URL (ws:// or wss://)
        #[arg(long)]
        remote: Option<String>,
    },

    /// Write a JSON value at a remote path, queueing it when offline
    #[command(after_help = "\
Examples:
  uc write users/42/name '\"Ada\"'
  uc write users/42/preferences '{\"theme\":\"dark\"}'")]
    Write {
        /// Slash-separated remote path
        #[arg(value_parser = non_empty_string)]
        path: String,

        /// JSON value
        value: String,
    },

    /// List queued writes
    Pending {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Replay queued writes against the remote
    Sync {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show connectivity, session and queue state
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Record a signed-in user and sync if online
    Login {
        /// Remote user id
        #[arg(value_parser = non_empty_string)]
        user_id: String,
    },

    /// Forget the session, cached preferences and queued writes
    Logout {
        /// Keep queued writes
        #[arg(long)]
        keep_pending: bool,
    },

    /// Show the signed-in user
    Whoami {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show or change preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// Sync whenever the remote becomes reachable, until interrupted
    #[command(long_about = "Sync whenever the remote becomes reachable, until interrupted.\n\n\
    While running, watch owns the store. Lines on stdin are handled as commands:\n\
    \x20 <path> <json>   write a value\n\
    \x20 sync            replay queued writes now\n\
    \x20 quit            stop")]
    Watch,

    /// Drop the queued write for one path
    Forget {
        /// Slash-separated remote path
        path: String,
    },

    /// Drop every queued write
    Discard,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Show cached preferences
    Show {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Change preferences and write them for the signed-in user
    #[command(group(
        ArgGroup::new("change")
            .required(true)
            .multiple(true)
            .args(["theme", "language"])
    ))]
    Set {
        /// Theme: light, dark
        #[arg(long)]
        theme: Option<Theme>,

        /// Language: en, ru, kk
        #[arg(long)]
        language: Option<Language>,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
