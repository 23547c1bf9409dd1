// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync management commands.
//!
//! Every command here probes the remote first, so a reachable server always
//! gets the queue flushed before anything is reported.

use std::time::Duration;

use crate::cli::OutputFormat;
use crate::display::{format_report, format_status};
use crate::error::{Error, Result};
use crate::sync::{SyncReport, SyncService, Transport, WatchConfig};

use super::{block_on, connect, open_context, print_json};

const LOCAL_ONLY_HINT: &str = "No remote configured (local only).

To enable sync, add a [remote] section to .studyhub/config.toml:

  [remote]
  url = \"https://your-server/api\"";

/// Show connection state, queue size and last sync time.
pub fn status(output: OutputFormat) -> Result<()> {
    block_on(async {
        let ctx = open_context()?;
        connect(&ctx).await?;
        status_impl(&ctx.service, ctx.config.remote_url(), output).await
    })
}

pub(crate) async fn status_impl<T: Transport>(
    service: &SyncService<T>,
    remote: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let status = service.engine().status().await?;
    match output {
        OutputFormat::Text => println!("{}", format_status(&status, remote)),
        OutputFormat::Json => print_json(&status)?,
    }
    Ok(())
}

/// Replay the queue now.
pub fn run() -> Result<()> {
    block_on(async {
        let ctx = open_context()?;
        if !ctx.config.is_remote_mode() {
            println!("{}", LOCAL_ONLY_HINT);
            return Ok(());
        }
        let report = run_impl(&ctx.service).await?;
        println!("{}", format_report(&report));
        Ok(())
    })
}

/// Probe, then sync. Coming online already replays the queue, so that pass
/// is only stamped; a forced pass runs when the probe caused no transition.
pub(crate) async fn run_impl<T: Transport>(service: &SyncService<T>) -> Result<SyncReport> {
    match service.monitor().probe().await? {
        Some(report) => {
            if !report.is_skipped() {
                service.engine().stamp_last_sync()?;
            }
            Ok(report)
        }
        None => service.engine().force_sync().await,
    }
}

/// Probe the remote in a loop until Ctrl-C, syncing whenever it comes back.
pub fn watch(interval_secs: Option<u64>) -> Result<()> {
    block_on(async {
        let ctx = open_context()?;
        let remote = ctx.config.remote.as_ref().ok_or_else(|| {
            Error::Config("sync watch needs a [remote] section in config.toml".to_string())
        })?;
        let interval = interval_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| remote.probe_interval());
        if interval.is_zero() {
            return Err(Error::InvalidInput(
                "interval must be at least 1 second".to_string(),
            ));
        }

        eprintln!(
            "Watching {} every {}s (Ctrl-C to stop)",
            remote.url,
            interval.as_secs()
        );
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        ctx.service
            .monitor()
            .watch(WatchConfig::new(interval), shutdown)
            .await?;

        let status = ctx.service.engine().status().await?;
        println!("{}", format_status(&status, Some(&remote.url)));
        Ok(())
    })
}

/// Queue every unsynced record again, then sync.
pub fn resync() -> Result<()> {
    block_on(async {
        let ctx = open_context()?;
        let queued = resync_impl(&ctx.service).await?;
        println!("Queued {} unsynced record(s)", queued);
        if let Some(report) = connect(&ctx).await? {
            println!("{}", format_report(&report));
        }
        Ok(())
    })
}

pub(crate) async fn resync_impl<T: Transport>(service: &SyncService<T>) -> Result<usize> {
    service.store().with(|s| s.requeue_unsynced()).await
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
