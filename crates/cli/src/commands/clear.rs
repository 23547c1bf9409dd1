// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::{Error, Result};
use crate::sync::{SyncService, Transport};

use super::with_local;

/// Delete every local record and the whole sync queue.
///
/// Nothing is sent to the remote.
pub fn run(yes: bool) -> Result<()> {
    if !yes {
        return Err(Error::ConfirmationRequired { operation: "clear" });
    }
    with_local(|ctx| async move {
        run_impl(&ctx.service).await?;
        println!("Cleared all local data");
        Ok(())
    })
}

pub(crate) async fn run_impl<T: Transport>(service: &SyncService<T>) -> Result<()> {
    service.store().with(|s| s.clear_all()).await?;
    tracing::info!("cleared local store");
    Ok(())
}

#[cfg(test)]
#[path = "clear_tests.rs"]
mod tests;
