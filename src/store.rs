//! Store Module
//!
//! The key-value store that coordinates the log and the index.
//!
//! ## Responsibilities
//! - Replay the log into the index on open
//! - Route reads to the index
//! - Append one record per effective mutation
//! - Compact the log on demand (vacuum)

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, SlateError};
use crate::index::{Entry, Index, Value};
use crate::log::{now_millis, validate_key, Compactor, LogRecovery, LogWriter, Record, RecoveryResult};

/// Summary of a vacuum run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacuumReport {
    /// Live records written to the new log
    pub records_written: usize,

    /// Tombstones dropped from the index
    pub tombstones_purged: usize,

    /// Log size before the rewrite
    pub bytes_before: u64,

    /// Log size after the rewrite
    pub bytes_after: u64,
}

/// A single-file, append-only key-value store
///
/// ## Concurrency Model: one owner
///
/// Mutations take `&mut self`, so a `Store` serializes its writers by
/// construction. The log file must not be shared with another process.
/// To share a store between threads use [`crate::concurrent::SharedStore`]
/// or [`crate::concurrent::StoreWorker`].
pub struct Store {
    /// Store configuration
    config: Config,

    /// Latest state per key (source of truth for reads)
    index: Index,

    /// Append handle on the log
    writer: LogWriter,

    /// What the last open replayed
    recovery: RecoveryResult,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create the parent directory of the log if needed
    /// 2. Remove a leftover compaction temp file
    /// 3. Replay the log into a fresh index
    /// 4. Open the log for appending (creating it if absent)
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let path = config.log_path.clone();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Compactor::cleanup_stale(&path)?;

        let mut index = Index::new();
        let recovery = LogRecovery::replay(&path, &mut index)?;

        let writer = LogWriter::open(&path, config.sync_strategy)?;

        tracing::info!(
            path = %path.display(),
            records = recovery.records_replayed,
            live = recovery.live_keys,
            tombstones = recovery.tombstones,
            "store opened"
        );

        Ok(Self {
            config,
            index,
            writer,
            recovery,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified log file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder().log_path(path.as_ref()).build();
        Self::open(config)
    }

    /// Store a value under `key`
    ///
    /// - `None` deletes the key.
    /// - With `replace == false` a live key fails with `DuplicateKey`.
    /// - A value equal to the live one is a no-op: nothing is appended.
    ///
    /// Returns the stored value (`None` when the call was a delete).
    pub fn put(&mut self, key: &str, value: Option<Value>, replace: bool) -> Result<Option<Value>> {
        let Some(value) = value else {
            self.del(key)?;
            return Ok(None);
        };

        validate_key(key)?;

        if let Some(current) = self.index.get_live(key) {
            if !replace {
                return Err(SlateError::DuplicateKey(key.to_string()));
            }
            // serde_json maps keep sorted keys, so equal values encode identically
            if current.value.as_ref() == Some(&value) {
                tracing::trace!(key, "unchanged value, skipping append");
                return Ok(Some(value));
            }
        }

        let record = Record::live(now_millis(), key, value);
        self.writer.append(&record)?;
        self.index.apply(record.clone());

        Ok(record.value)
    }

    /// Store a value, replacing any live one
    pub fn set(&mut self, key: &str, value: Value) -> Result<Value> {
        let stored = self.put(key, Some(value), true)?;
        Ok(stored.unwrap_or(Value::Null))
    }

    /// Store a value only if the key is not live
    pub fn insert_new(&mut self, key: &str, value: Value) -> Result<Value> {
        let stored = self.put(key, Some(value), false)?;
        Ok(stored.unwrap_or(Value::Null))
    }

    /// Delete a key
    ///
    /// Absent keys and tombstones are left alone; otherwise a tombstone is
    /// appended and kept in the index until the next vacuum.
    pub fn del(&mut self, key: &str) -> Result<()> {
        if self.index.get_live(key).is_none() {
            return Ok(());
        }

        let record = Record::tombstone(now_millis(), key);
        self.writer.append(&record)?;
        self.index.apply(record);

        Ok(())
    }

    /// Get the entry for a key
    ///
    /// Tombstones are only returned when `include_deleted` is set.
    pub fn get(&self, key: &str, include_deleted: bool) -> Option<&Entry> {
        if include_deleted {
            self.index.get(key)
        } else {
            self.index.get_live(key)
        }
    }

    /// All entries, in no particular order
    ///
    /// Tombstones are only returned when `include_deleted` is set.
    pub fn list(&self, include_deleted: bool) -> Vec<(String, Entry)> {
        self.index
            .iter()
            .filter(|(_, entry)| include_deleted || !entry.is_tombstone())
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    /// Rewrite the log to hold only live entries, oldest first
    ///
    /// Tombstones are purged from the index only after the new log is in
    /// place.
    pub fn vacuum(&mut self) -> Result<VacuumReport> {
        let bytes_before = self.writer.file_size()?;
        let records = self.index.live_records();

        let bytes_after = Compactor::rewrite(self.writer.path(), &records)?;
        self.writer.reopen()?;

        let tombstones_purged = self.index.purge_tombstones();

        let report = VacuumReport {
            records_written: records.len(),
            tombstones_purged,
            bytes_before,
            bytes_after,
        };

        tracing::info!(
            path = %self.writer.path().display(),
            records = report.records_written,
            purged = report.tombstones_purged,
            bytes_before = report.bytes_before,
            bytes_after = report.bytes_after,
            "vacuum complete"
        );

        Ok(report)
    }

    /// Force sync the log to disk
    pub fn sync(&mut self) -> Result<()> {
        self.writer.sync()
    }

    /// Close the store gracefully, syncing the log
    pub fn close(mut self) -> Result<()> {
        self.sync()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Returns true if `key` holds a live value
    pub fn contains(&self, key: &str) -> bool {
        self.index.get_live(key).is_some()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.index.live_count()
    }

    /// Returns true if no key holds a live value
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tombstones waiting for a vacuum
    pub fn tombstone_count(&self) -> usize {
        self.index.tombstone_count()
    }

    /// Records appended since open
    pub fn appended(&self) -> u64 {
        self.writer.appended()
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    /// What the last open replayed
    pub fn recovery(&self) -> &RecoveryResult {
        &self.recovery
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
