// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Test helpers are shared across spec files; not every file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The `studyhub` binary with the environment overrides cleared.
pub fn sh() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("studyhub").unwrap();
    cmd.env_remove("STUDYHUB_API_URL").env_remove("RUST_LOG");
    cmd
}

/// A temp directory with `studyhub init` run in local-only mode.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    sh().arg("init").current_dir(temp.path()).assert().success();
    temp
}

/// Runs `args` with `-o json` and returns the `id` of the printed record.
pub fn json_id(temp: &TempDir, args: &[&str]) -> String {
    let output = sh()
        .args(args)
        .args(["-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}
