// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod card;
pub mod clear;
pub mod export;
pub mod import;
pub mod init;
pub mod note;
pub mod session;
pub mod sync;
pub mod task;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::future::Future;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sh_core::id::generate_unique_id;
use sh_core::Table;

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::{Error, Result};
use crate::sync::{
    HttpTransport, NoRemote, SharedStore, SyncReport, SyncService, Transport,
};

/// Sync service used by the binary: HTTP when a remote is configured.
pub type CliService = SyncService<Box<dyn Transport>>;

/// Everything a command needs: the work dir, its config and the sync service.
pub struct Context {
    pub service: CliService,
    pub config: Config,
    pub work_dir: PathBuf,
}

/// Helper to open the store and build the sync service from the current context.
pub fn open_context() -> Result<Context> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let store = SharedStore::open(&get_db_path(&work_dir))?;

    let transport: Box<dyn Transport> = match &config.remote {
        Some(remote) => Box::new(HttpTransport::from_config(remote)?),
        None => Box::new(NoRemote),
    };
    let service = SyncService::new(store, transport, work_dir.clone());

    Ok(Context {
        service,
        config,
        work_dir,
    })
}

/// Probe the remote when one is configured. Local-only mode stays offline.
///
/// A successful probe flushes the queue; its report is returned.
pub async fn connect(ctx: &Context) -> Result<Option<SyncReport>> {
    if !ctx.config.is_remote_mode() {
        return Ok(None);
    }
    let report = ctx.service.monitor().probe().await?;
    if !ctx.service.monitor().is_online() {
        tracing::info!("remote unreachable, working offline");
    }
    Ok(report)
}

/// Run a command future on a fresh single-threaded runtime.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))?;
    runtime.block_on(future)
}

/// Open the context, probe the remote, then run `f`.
pub fn with_connected<F, Fut, T>(f: F) -> Result<T>
where
    F: FnOnce(Context) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    block_on(async move {
        let ctx = open_context()?;
        connect(&ctx).await?;
        f(ctx).await
    })
}

/// Open the context without touching the remote, then run `f`.
pub fn with_local<F, Fut, T>(f: F) -> Result<T>
where
    F: FnOnce(Context) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    block_on(async move { f(open_context()?).await })
}

/// Generate a record id that is not yet used in `table`.
pub(crate) async fn new_id<T: Transport>(
    service: &SyncService<T>,
    prefix: &str,
    table: Table,
    seed: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    service
        .store()
        .with(|s| generate_unique_id(prefix, seed, &now, |id| s.exists(table, id)))
        .await
}

/// Category filter: `None` matches everything, otherwise case-insensitive equality.
pub(crate) fn matches_category(filter: Option<&str>, category: &str) -> bool {
    match filter {
        Some(wanted) => wanted.trim().eq_ignore_ascii_case(category),
        None => true,
    }
}

pub(crate) fn print_json<S: Serialize + ?Sized>(value: &S) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
