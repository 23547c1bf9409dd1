// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use sh_core::LocalStore;

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(remote: Option<String>, path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let work_dir = run_impl(&target_path, remote.as_deref())?;
    println!("Initialized StudyHub at {}", work_dir.display());

    let config = Config::load(&work_dir)?;
    match config.remote_url() {
        Some(url) => println!("Remote: {}", url),
        None => println!("Mode: local only (no remote configured)"),
    }
    Ok(())
}

/// Create `.studyhub/` under `target_path` with its config and database.
pub(crate) fn run_impl(target_path: &Path, remote: Option<&str>) -> Result<PathBuf> {
    let work_dir = init_work_dir(target_path, remote)?;
    LocalStore::open(&get_db_path(&work_dir))?;
    tracing::debug!(path = %work_dir.display(), "initialized work dir");
    Ok(work_dir)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
