// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sh_core::Snapshot;

use crate::error::Result;
use crate::sync::{SyncService, Transport};
use crate::validate::validate_file_path;

use super::with_local;

pub fn run(filepath: &str) -> Result<()> {
    let path = validate_file_path(filepath)?;
    with_local(|ctx| async move {
        let snapshot = run_impl(&ctx.service, &path).await?;
        println!(
            "Exported {} record(s) to {}",
            record_count(&snapshot),
            path.display()
        );
        Ok(())
    })
}

/// Internal implementation that accepts the service for testing.
pub(crate) async fn run_impl<T: Transport>(
    service: &SyncService<T>,
    path: &Path,
) -> Result<Snapshot> {
    let snapshot = service.store().with(|s| s.export()).await?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writeln!(writer)?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), "exported snapshot");
    Ok(snapshot)
}

fn record_count(snapshot: &Snapshot) -> usize {
    snapshot.tasks.as_ref().map_or(0, Vec::len)
        + snapshot.flashcards.as_ref().map_or(0, Vec::len)
        + snapshot.notes.as_ref().map_or(0, Vec::len)
        + snapshot.study_sessions.as_ref().map_or(0, Vec::len)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
