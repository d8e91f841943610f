//! Append-Only Log Module
//!
//! The single file that makes the store durable.
//!
//! ## Responsibilities
//! - Encode/decode one record per line
//! - Append a record for every mutation
//! - Replay the whole file into the index on open
//! - Rewrite the file from the index during vacuum
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ <unix-ms>\t<key>\t<json-value>\n     live record     │
//! │ <unix-ms>\t<key>\n                   tombstone       │
//! │ ...                                                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Several records may exist for one key; the last one in file order wins.

mod record;
mod writer;
mod recovery;
mod compact;

pub use record::{now_millis, validate_key, Record};
pub use writer::LogWriter;
pub use recovery::{LogRecovery, RecoveryResult};
pub use compact::{tmp_path, Compactor};
