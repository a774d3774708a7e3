// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `uc` binary.
//!
//! The files under `cli/` are built as integration tests of the `unitconv`
//! package so that the `uc` binary is built for them.
