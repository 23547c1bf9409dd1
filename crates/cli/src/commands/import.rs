// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::path::Path;

use sh_core::{ImportSummary, Snapshot};

use crate::display::format_report;
use crate::error::{Error, Result};
use crate::sync::{SyncService, Transport};
use crate::validate::validate_file_path;

use super::{connect, with_local};

pub fn run(filepath: &str, requeue: bool) -> Result<()> {
    let path = validate_file_path(filepath)?;
    with_local(|ctx| async move {
        let snapshot = read_snapshot(&path)?;
        let summary = run_impl(&ctx.service, &snapshot, requeue).await?;
        print_summary(&summary);

        if requeue {
            if let Some(report) = connect(&ctx).await? {
                println!("{}", format_report(&report));
            }
        }
        Ok(())
    })
}

/// Read and check a snapshot file. Only `1.x` snapshots are accepted.
pub(crate) fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&content)?;
    if !snapshot.version.starts_with("1.") {
        return Err(Error::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot)
}

/// Internal implementation that accepts the service for testing.
///
/// Imported records are unsynced. With `requeue` they are also queued for
/// upload; returns the summary either way.
pub(crate) async fn run_impl<T: Transport>(
    service: &SyncService<T>,
    snapshot: &Snapshot,
    requeue: bool,
) -> Result<ImportSummary> {
    let snapshot = snapshot.clone();
    let summary = service.store().with(move |s| s.import(&snapshot)).await?;
    tracing::info!(records = summary.total(), "imported snapshot");

    if requeue {
        let queued = service.store().with(|s| s.requeue_unsynced()).await?;
        tracing::info!(queued, "queued imported records");
    }
    Ok(summary)
}

fn print_summary(summary: &ImportSummary) {
    let tables = [
        ("tasks", summary.tasks),
        ("flashcards", summary.flashcards),
        ("notes", summary.notes),
        ("study sessions", summary.study_sessions),
    ];
    for (name, count) in tables {
        if let Some(count) = count {
            println!("  {}: {}", name, count);
        }
    }
    println!("Imported {} record(s)", summary.total());
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod tests;
