// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use studyhub::{Cli, Command, SyncCommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let watching = matches!(
        cli.command,
        Command::Sync {
            command: Some(SyncCommand::Watch { .. })
        }
    );
    setup_logging(if watching { "info" } else { "warn" });

    if let Err(e) = studyhub::run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins, then `STUDYHUB_LOG`, then `default_level`.
fn setup_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            studyhub::env::log_filter()
                .map(EnvFilter::try_new)
                .unwrap_or_else(|| EnvFilter::try_new(default_level))
        })
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
