// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.studyhub/config.toml` and includes:
//! - `remote`: Optional remote API settings (absent means local-only mode)
//!
//! Runtime sync state (the last successful forced sync) lives next to it in
//! `.studyhub/state.toml` so that rewriting it never touches user config.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};

pub(crate) const WORK_DIR_NAME: &str = ".studyhub";
pub(crate) const CONFIG_FILE_NAME: &str = "config.toml";
pub(crate) const STATE_FILE_NAME: &str = "state.toml";
pub(crate) const DB_FILE_NAME: &str = "studyhub.db";
pub(crate) const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.studyhub/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote sync configuration (optional - if absent, runs in local-only mode).
    pub remote: Option<RemoteConfig>,
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the REST API, e.g. `https://api.example.com/v1`.
    pub url: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seconds between connectivity probes in `sync watch` (default: 30).
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_probe_interval_secs() -> u64 {
    30
}

impl RemoteConfig {
    pub fn new(url: String) -> Self {
        RemoteConfig {
            url,
            timeout_secs: default_timeout_secs(),
            probe_interval_secs: default_probe_interval_secs(),
        }
    }

    /// Validates that the URL is an http(s) URL.
    ///
    /// Returns an error message if the URL is invalid.
    pub fn validate_url(&self) -> Option<String> {
        parse_remote_url(&self.url).err()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }
}

/// Parses a remote base URL. Only http(s) URLs with a host are accepted.
pub fn parse_remote_url(url: &str) -> std::result::Result<reqwest::Url, String> {
    let url = url.trim();
    let parsed =
        reqwest::Url::parse(url).map_err(|e| format!("invalid remote URL '{}': {}", url, e))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "invalid remote URL '{}': must start with http:// or https://",
            url
        ));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(format!("invalid remote URL '{}': missing host", url));
    }
    Ok(parsed)
}

impl Config {
    /// Creates a config, with a remote when `url` is given.
    pub fn new(url: Option<String>) -> Result<Self> {
        let remote = url.map(RemoteConfig::new);
        if let Some(msg) = remote.as_ref().and_then(RemoteConfig::validate_url) {
            return Err(Error::Config(msg));
        }
        Ok(Config { remote })
    }

    /// Loads configuration from the given `.studyhub/` directory.
    ///
    /// `STUDYHUB_API_URL` overrides the configured remote URL, and enables
    /// remote mode when the file has no `[remote]` section.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        if let Some(url) = env::api_url() {
            match config.remote.as_mut() {
                Some(remote) => remote.url = url,
                None => config.remote = Some(RemoteConfig::new(url)),
            }
        }
        if let Some(msg) = config.remote.as_ref().and_then(RemoteConfig::validate_url) {
            return Err(Error::Config(msg));
        }
        Ok(config)
    }

    /// Returns true if remote sync is configured.
    pub fn is_remote_mode(&self) -> bool {
        self.remote.is_some()
    }

    /// Returns the remote URL if configured.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.url.as_str())
    }

    /// Saves configuration to the given `.studyhub/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Sync state stored in `.studyhub/state.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    /// Time of the last forced sync that ran while online.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
}

impl SyncState {
    /// Loads state, treating a missing file as empty state.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let path = work_dir.join(STATE_FILE_NAME);
        if !path.exists() {
            return Ok(SyncState::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", STATE_FILE_NAME, e)))
    }

    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize state: {}", e)))?;
        fs::write(work_dir.join(STATE_FILE_NAME), content)?;
        Ok(())
    }
}

/// Find the .studyhub directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    find_work_dir_from(&current)
}

/// Find the .studyhub directory by walking up from `start`
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path for a work directory
pub fn get_db_path(work_dir: &Path) -> PathBuf {
    work_dir.join(DB_FILE_NAME)
}

/// Initialize a new .studyhub directory at the given path
pub fn init_work_dir(path: &Path, remote_url: Option<&str>) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    let config = Config::new(remote_url.map(String::from))?;

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

/// Write a .gitignore file to the work directory.
///
/// The database and sync state are per-machine and never committed.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let content = format!(
        "# Local database\n{db}\n{db}-wal\n{db}-shm\n\n# Sync state\n{state}\n",
        db = DB_FILE_NAME,
        state = STATE_FILE_NAME
    );
    fs::write(work_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
