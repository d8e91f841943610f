//! Log Recovery
//!
//! Rebuilds the index by replaying the log in file order.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, SlateError};
use crate::index::Index;
use super::Record;

/// Replays a log file into an index
pub struct LogRecovery;

/// Result of a recovery operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Whether the log file was present on disk
    pub file_existed: bool,

    /// Number of records decoded and applied
    pub records_replayed: u64,

    /// Keys holding a live value after replay
    pub live_keys: usize,

    /// Keys holding a tombstone after replay
    pub tombstones: usize,
}

impl RecoveryResult {
    /// Records that were superseded by a later record for the same key
    pub fn superseded(&self) -> u64 {
        self.records_replayed
            .saturating_sub((self.live_keys + self.tombstones) as u64)
    }
}

impl LogRecovery {
    /// Read every record in the log, in file order
    ///
    /// A missing file is an empty log. Any line that fails to decode aborts
    /// the whole read; there is no best-effort recovery.
    pub fn read_records(path: &Path) -> Result<Option<Vec<Record>>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SlateError::Open {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut records = Vec::new();
        for (idx, line) in raw.split('\n').enumerate() {
            if line.is_empty() {
                continue;
            }
            records.push(Record::decode(line, idx + 1)?);
        }

        Ok(Some(records))
    }

    /// Replay the log into `index`
    ///
    /// Every record overwrites whatever the index holds for its key, so the
    /// last line in the file wins regardless of timestamps.
    pub fn replay(path: &Path, index: &mut Index) -> Result<RecoveryResult> {
        let Some(records) = Self::read_records(path)? else {
            return Ok(RecoveryResult::default());
        };

        let mut result = RecoveryResult {
            file_existed: true,
            ..Default::default()
        };

        for record in records {
            tracing::trace!(key = %record.key, ts = record.timestamp, "replaying record");
            index.apply(record);
            result.records_replayed += 1;
        }

        result.live_keys = index.live_count();
        result.tombstones = index.tombstone_count();

        Ok(result)
    }

    /// Verify a log file without opening a store on it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        let mut scratch = Index::new();
        Self::replay(path, &mut scratch)
    }
}
