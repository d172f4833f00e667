//! Configuration loading tests
//!
//! Tests that quiz configuration loads correctly and provides expected
//! default values

use spelldrill::session::config::{BackendKind, Config};

#[test]
fn test_defaults_created_on_first_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".spelldrill.cfg");

    let config = Config::load_from(path.clone()).expect("Failed to create default config");
    assert!(path.exists(), "default config file should be written");

    assert_eq!(config.backend().unwrap(), BackendKind::Local);
    assert_eq!(config.voice(), "en-us");
    assert_eq!(config.rate_wpm(), 140);
    assert_eq!(config.timeout_secs(), 10);
    assert!(config.wordlist_path().is_none());
}

#[test]
fn test_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".spelldrill.cfg");

    // First load writes defaults, second load reads them back
    let _ = Config::load_from(path.clone()).unwrap();
    let config = Config::load_from(path).unwrap();
    assert_eq!(config.backend().unwrap(), BackendKind::Local);
}

#[test]
fn test_custom_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".spelldrill.cfg");
    std::fs::write(
        &path,
        "[speech]\nbackend = cloud\nvoice = en-gb\nrate = 120\ntimeout_secs = 5\n\
         [cloud]\napi_key = abc123\n\
         [quiz]\nwordlist = /tmp/words.txt\n",
    )
    .unwrap();

    let config = Config::load_from(path).unwrap();
    assert_eq!(config.backend().unwrap(), BackendKind::Cloud);
    assert_eq!(config.voice(), "en-gb");
    assert_eq!(config.rate_wpm(), 120);
    assert_eq!(config.timeout_secs(), 5);
    assert_eq!(
        config.wordlist_path().unwrap().to_str().unwrap(),
        "/tmp/words.txt"
    );
}

#[test]
fn test_unknown_backend_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".spelldrill.cfg");
    std::fs::write(&path, "[speech]\nbackend = telepathy\n").unwrap();

    let config = Config::load_from(path).unwrap();
    assert!(config.backend().is_err());
}

#[test]
fn test_in_memory_defaults() {
    let config = Config::default_in_memory();
    assert_eq!(config.backend().unwrap(), BackendKind::Local);
    assert!(config.cloud_endpoint().starts_with("https://"));
    assert!(!config.cloud_voice_id().is_empty());
}
