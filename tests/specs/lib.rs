// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `studyhub` binary.
//!
//! `cli/task.rs` and `cli/sync.rs` are integration tests of the `studyhub`
//! package, which also makes cargo build the binary these modules run.

#[cfg(test)]
mod cli;
