// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! uc-core: Shared library for the uc offline sync client and remote store.
//!
//! This crate provides the data model for queued writes, remote path
//! addressing, session and preference records, and the wire protocol spoken
//! between `uc` and `uc-remote`.

pub mod clock;
pub mod error;
pub mod path;
pub mod pending;
pub mod prefs;
pub mod protocol;
pub mod session;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use path::RemotePath;
pub use pending::{Decoded, PendingWrite, PendingWriteSet};
pub use prefs::{Language, Preferences, Theme};
pub use session::SessionMarker;
