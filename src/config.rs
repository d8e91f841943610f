//! Configuration for SlateKV
//!
//! Centralized configuration with sensible defaults.

use std::env;
use std::path::PathBuf;

use crate::error::{Result, SlateError};

/// Environment variable naming the log file
pub const ENV_DB_PATH: &str = "DB_PATH";

/// Environment variable naming the redirect page directory
pub const ENV_REDIRECTION_PATH: &str = "REDIRECTION_PATH";

/// Environment variable holding the public short-link prefix
pub const ENV_BASE_URL: &str = "BASE_URL";

/// Main configuration for a SlateKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The single append-only log file backing the store.
    /// Compaction writes `{log_path}.compact.tmp` next to it.
    pub log_path: PathBuf,

    /// Sync strategy: whether appends are fsynced
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Link Configuration
    // -------------------------------------------------------------------------
    /// Root directory for per-slug redirect pages
    ///   {redirect_dir}/
    ///     └── {slug}/index.html
    pub redirect_dir: PathBuf,

    /// Public prefix for short links, e.g. `https://sho.rt/r`
    pub base_url: Option<String>,
}

/// Log sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStrategy {
    /// fsync after every append (safest, slowest)
    EveryWrite,

    /// Leave flushing to the OS page cache
    #[default]
    OsBuffered,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("urls.db"),
            sync_strategy: SyncStrategy::default(),
            redirect_dir: PathBuf::from("redirection"),
            base_url: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from `DB_PATH`, `REDIRECTION_PATH` and `BASE_URL`,
    /// falling back to defaults for unset variables
    pub fn from_env() -> Self {
        let mut builder = Config::builder();

        if let Ok(path) = env::var(ENV_DB_PATH) {
            builder = builder.log_path(path);
        }
        if let Ok(dir) = env::var(ENV_REDIRECTION_PATH) {
            builder = builder.redirect_dir(dir);
        }
        if let Ok(url) = env::var(ENV_BASE_URL) {
            if !url.is_empty() {
                builder = builder.base_url(url);
            }
        }

        builder.build()
    }

    /// Check the config for values the store cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.log_path.as_os_str().is_empty() {
            return Err(SlateError::Config("log path must not be empty".to_string()));
        }

        if let Some(base) = &self.base_url {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(SlateError::Config(format!(
                    "base url must be an http(s) URL, got {:?}",
                    base
                )));
            }
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set the redirect page directory
    pub fn redirect_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.redirect_dir = path.into();
        self
    }

    /// Set the public short-link prefix (trailing slashes are dropped)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
