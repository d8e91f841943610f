//! Configuration Tests

use std::env;
use std::path::PathBuf;

use slatekv::config::{ENV_BASE_URL, ENV_DB_PATH, ENV_REDIRECTION_PATH};
use slatekv::{Config, SlateError, SyncStrategy};

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.log_path, PathBuf::from("urls.db"));
    assert_eq!(config.redirect_dir, PathBuf::from("redirection"));
    assert_eq!(config.sync_strategy, SyncStrategy::OsBuffered);
    assert!(config.base_url.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = Config::builder()
        .log_path("/tmp/data/store.db")
        .redirect_dir("/tmp/pages")
        .sync_strategy(SyncStrategy::EveryWrite)
        .base_url("https://sho.rt/r//")
        .build();

    assert_eq!(config.log_path, PathBuf::from("/tmp/data/store.db"));
    assert_eq!(config.redirect_dir, PathBuf::from("/tmp/pages"));
    assert_eq!(config.sync_strategy, SyncStrategy::EveryWrite);
    assert_eq!(config.base_url.as_deref(), Some("https://sho.rt/r"));
}

#[test]
fn test_validate_rejects_empty_log_path() {
    let config = Config::builder().log_path("").build();

    assert!(matches!(config.validate(), Err(SlateError::Config(_))));
}

#[test]
fn test_validate_rejects_non_http_base_url() {
    let config = Config::builder().base_url("sho.rt/r").build();

    assert!(matches!(config.validate(), Err(SlateError::Config(_))));
}

// Only test in this binary that touches the process environment
#[test]
fn test_from_env() {
    env::set_var(ENV_DB_PATH, "/var/lib/slatekv/urls.db");
    env::set_var(ENV_REDIRECTION_PATH, "/srv/www/r");
    env::set_var(ENV_BASE_URL, "");

    let config = Config::from_env();

    assert_eq!(config.log_path, PathBuf::from("/var/lib/slatekv/urls.db"));
    assert_eq!(config.redirect_dir, PathBuf::from("/srv/www/r"));
    assert!(config.base_url.is_none());

    env::set_var(ENV_BASE_URL, "https://sho.rt/r/");
    assert_eq!(Config::from_env().base_url.as_deref(), Some("https://sho.rt/r"));

    env::remove_var(ENV_DB_PATH);
    env::remove_var(ENV_REDIRECTION_PATH);
    env::remove_var(ENV_BASE_URL);
    assert_eq!(Config::from_env().log_path, PathBuf::from("urls.db"));
}
