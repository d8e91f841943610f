//! Log Writer
//!
//! Handles appending records to the log file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::{Result, SlateError};
use super::Record;

/// Appends records to the log file
pub struct LogWriter {
    /// Path of the log file
    path: PathBuf,

    /// Handle opened in append mode
    file: File,

    /// Whether each append is followed by an fsync
    sync_strategy: SyncStrategy,

    /// Records appended through this writer since it was opened
    appended: u64,
}

impl LogWriter {
    /// Open or create the log file for appending
    pub fn open(path: &Path, sync_strategy: SyncStrategy) -> Result<Self> {
        let file = Self::open_append(path).map_err(|source| SlateError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            sync_strategy,
            appended: 0,
        })
    }

    fn open_append(path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Append one record, returning the number of bytes written
    ///
    /// The line is written with a single `write_all` so a record is never
    /// interleaved with another one from this process.
    pub fn append(&mut self, record: &Record) -> Result<usize> {
        let line = record.encode()?;

        self.file
            .write_all(line.as_bytes())
            .map_err(|e| SlateError::write(&self.path, e))?;

        if self.sync_strategy == SyncStrategy::EveryWrite {
            self.sync()?;
        }

        self.appended += 1;
        tracing::debug!(
            key = %record.key,
            tombstone = record.is_tombstone(),
            bytes = line.len(),
            "appended record"
        );

        Ok(line.len())
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file
            .sync_all()
            .map_err(|e| SlateError::write(&self.path, e))
    }

    /// Reopen the handle after the file was replaced on disk
    ///
    /// The old handle still points at the replaced inode, so appends made
    /// through it would be lost.
    pub fn reopen(&mut self) -> Result<()> {
        self.file = Self::open_append(&self.path).map_err(|e| SlateError::write(&self.path, e))?;
        Ok(())
    }

    /// Current size of the log file in bytes
    pub fn file_size(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Number of records appended since open
    pub fn appended(&self) -> u64 {
        self.appended
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
