// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier generation for records and queue entries.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a record ID from a kind prefix, seed text, and timestamp.
/// Format: {prefix}-{hash} where hash is first 8 hex chars of SHA256(seed + timestamp)
pub fn generate_id(prefix: &str, seed: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}", seed, created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    format!("{}-{}", prefix, hex::encode(&hash[..4]))
}

/// Generate a unique record ID, appending an incrementing suffix on collision.
///
/// The first error from `exists` is returned as is.
pub fn generate_unique_id<F, E>(
    prefix: &str,
    seed: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let base_id = generate_id(prefix, seed, created_at);
    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

/// A short hex token that differs between calls, processes and instants.
pub fn random_suffix() -> String {
    let now = Utc::now();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    let input = format!(
        "{}:{}:{}",
        now.timestamp_nanos_opt().unwrap_or_default(),
        std::process::id(),
        count
    );
    let hash = Sha256::digest(input.as_bytes());
    hex::encode(&hash[..6])
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
