//! Index implementation
//!
//! HashMap keyed by the record key.

use std::collections::HashMap;

use crate::log::Record;
use super::Entry;

/// Latest entry per key
#[derive(Debug, Default)]
pub struct Index {
    entries: HashMap<String, Entry>,
}

impl Index {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Get the entry for a key, tombstones included
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Get the entry for a key only if it holds a live value
    pub fn get_live(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key).filter(|e| !e.is_tombstone())
    }

    /// Set the entry for a key, replacing any previous one
    pub fn insert(&mut self, key: String, entry: Entry) {
        self.entries.insert(key, entry);
    }

    /// Apply a replayed record, unconditionally overwriting the key
    pub fn apply(&mut self, record: Record) {
        self.entries.insert(
            record.key,
            Entry {
                updated_at: record.timestamp,
                value: record.value,
            },
        );
    }

    /// Iterate over all entries, tombstones included, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    /// Live entries as records, oldest first
    ///
    /// Ties on `updated_at` are broken by key so the same index always
    /// produces the same file.
    pub fn live_records(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .entries
            .iter()
            .filter_map(|(key, entry)| {
                entry.value.as_ref().map(|value| Record {
                    timestamp: entry.updated_at,
                    key: key.clone(),
                    value: Some(value.clone()),
                })
            })
            .collect();

        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.key.cmp(&b.key)));
        records
    }

    /// Drop every tombstone, returning how many were removed
    pub fn purge_tombstones(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_tombstone());
        before - self.entries.len()
    }

    /// Number of keys, tombstones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key is tracked at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys holding a live value
    pub fn live_count(&self) -> usize {
        self.entries.values().filter(|e| !e.is_tombstone()).count()
    }

    /// Number of keys holding a tombstone
    pub fn tombstone_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_tombstone()).count()
    }
}
