//! Index Module
//!
//! In-memory view of the latest state of every key.
//!
//! ## Responsibilities
//! - Serve every read (the log is never read after open)
//! - Be the replay target during recovery
//! - Keep tombstones until a vacuum makes the deletion permanent
//! - Produce the snapshot a vacuum writes back to disk
//!
//! ## Data Structure Choice
//! A `HashMap`: lookups are by key only and callers that need ordering sort
//! explicitly.

mod table;

use serde::Serialize;

pub use table::Index;

/// The data type stored under each key
pub type Value = serde_json::Value;

/// Latest state of a key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Timestamp (unix millis) of the mutation that produced this state
    #[serde(rename = "updatedAt")]
    pub updated_at: u64,

    /// The live value, `None` for a tombstone
    pub value: Option<Value>,
}

impl Entry {
    /// Create a live entry
    pub fn live(updated_at: u64, value: Value) -> Self {
        Self {
            updated_at,
            value: Some(value),
        }
    }

    /// Create a tombstone entry
    pub fn tombstone(updated_at: u64) -> Self {
        Self {
            updated_at,
            value: None,
        }
    }

    /// Returns true if this entry marks a deleted key
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}
