// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use chrono::TimeZone;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_init_and_load_local_config() {
    let temp = TempDir::new().unwrap();
    let work_dir = init_work_dir(temp.path(), None).unwrap();

    assert_eq!(work_dir, temp.path().join(".studyhub"));
    let config = Config::load(&work_dir).unwrap();
    assert!(!config.is_remote_mode());
    assert_eq!(config.remote_url(), None);
}

#[test]
fn test_init_and_load_remote_config() {
    let temp = TempDir::new().unwrap();
    let work_dir = init_work_dir(temp.path(), Some("http://localhost:3000/api")).unwrap();

    let config = Config::load(&work_dir).unwrap();
    let remote = config.remote.unwrap();
    assert_eq!(remote.url, "http://localhost:3000/api");
    assert_eq!(remote.timeout(), Duration::from_secs(10));
    assert_eq!(remote.probe_interval(), Duration::from_secs(30));
}

#[test]
fn test_already_initialized() {
    let temp = TempDir::new().unwrap();
    init_work_dir(temp.path(), None).unwrap();

    let result = init_work_dir(temp.path(), None);
    assert!(matches!(result, Err(Error::AlreadyInitialized(_))));
}

#[test]
fn test_config_load_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(Config::load(temp.path()), Err(Error::Config(_))));
}

#[test]
fn test_config_load_invalid_toml() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "invalid toml {{{").unwrap();

    let result = Config::load(temp.path());
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("parse")));
}

#[test]
fn test_config_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let mut remote = RemoteConfig::new("https://study.example.com".to_string());
    remote.timeout_secs = 3;
    let config = Config {
        remote: Some(remote),
    };
    config.save(temp.path()).unwrap();

    let loaded = Config::load(temp.path()).unwrap();
    assert_eq!(loaded.remote.unwrap().timeout_secs, 3);
}

#[test]
fn test_parse_remote_defaults() {
    let config: Config = toml::from_str(
        r#"
[remote]
url = "http://localhost:3000"
"#,
    )
    .unwrap();
    let remote = config.remote.unwrap();
    assert_eq!(remote.timeout_secs, 10);
    assert_eq!(remote.probe_interval_secs, 30);
}

#[test]
fn test_parse_empty_config_is_local() {
    let config: Config = toml::from_str("").unwrap();
    assert!(!config.is_remote_mode());
}

#[parameterized(
    http = { "http://localhost:3000", true },
    https = { "https://api.example.com/v1", true },
    no_host = { "http://", false },
    port_without_host = { "http://:80", false },
    padded = { "  https://api.example.com  ", true },
    websocket = { "ws://localhost:3000", false },
    bare = { "localhost:3000", false },
)]
fn test_validate_url(url: &str, ok: bool) {
    let remote = RemoteConfig::new(url.to_string());
    assert_eq!(remote.validate_url().is_none(), ok);
}

#[test]
fn test_config_new_rejects_invalid_url() {
    assert!(matches!(
        Config::new(Some("ftp://example.com".to_string())),
        Err(Error::Config(_))
    ));
    assert!(Config::new(None).unwrap().remote.is_none());
}

#[test]
fn test_zero_durations_clamp_to_one_second() {
    let mut remote = RemoteConfig::new("http://localhost".to_string());
    remote.timeout_secs = 0;
    remote.probe_interval_secs = 0;
    assert_eq!(remote.timeout(), Duration::from_secs(1));
    assert_eq!(remote.probe_interval(), Duration::from_secs(1));
}

#[test]
fn test_sync_state_missing_is_default() {
    let temp = TempDir::new().unwrap();
    assert_eq!(SyncState::load(temp.path()).unwrap(), SyncState::default());
}

#[test]
fn test_sync_state_round_trip() {
    let temp = TempDir::new().unwrap();
    let state = SyncState {
        last_sync: Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()),
    };
    state.save(temp.path()).unwrap();
    assert_eq!(SyncState::load(temp.path()).unwrap(), state);
}

#[test]
fn test_find_work_dir_walks_up() {
    let temp = TempDir::new().unwrap();
    let work_dir = init_work_dir(temp.path(), None).unwrap();
    let nested = temp.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_work_dir_from(&nested).unwrap(), work_dir);
}

#[test]
fn test_find_work_dir_not_initialized() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        find_work_dir_from(temp.path()),
        Err(Error::NotInitialized)
    ));
}

#[test]
fn test_write_gitignore_ignores_db_and_state() {
    let temp = TempDir::new().unwrap();
    write_gitignore(temp.path()).unwrap();

    let content = std::fs::read_to_string(temp.path().join(".gitignore")).unwrap();
    assert!(content.contains("studyhub.db"));
    assert!(content.contains("state.toml"));
    assert!(!content.contains("config.toml"));
}

#[test]
fn test_db_path() {
    let work_dir = PathBuf::from("/project/.studyhub");
    assert_eq!(
        get_db_path(&work_dir),
        PathBuf::from("/project/.studyhub/studyhub.db")
    );
}
