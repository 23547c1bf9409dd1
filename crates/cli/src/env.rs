// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `STUDYHUB_API_URL` if set and not blank.
pub fn api_url() -> Option<String> {
    non_empty(std::env::var(vars::STUDYHUB_API_URL).ok())
}

/// Returns the value of `STUDYHUB_LOG` if set and not blank.
pub fn log_filter() -> Option<String> {
    non_empty(std::env::var(vars::STUDYHUB_LOG).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
