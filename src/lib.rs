//! # SlateKV
//!
//! A single-file, log-structured key-value store with:
//! - An append-only, line-oriented log (one record per mutation)
//! - Crash recovery by replaying the log, last write wins
//! - Tombstones for deletes, dropped on compaction
//! - Online compaction (vacuum) with an atomic file swap
//! - Short-link helpers built on top of the store
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │           Shortener / CLI / SharedStore / StoreWorker        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ put / del / get / list / vacuum
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Store                                │
//! └──────┬──────────────────────┬──────────────────────┬────────┘
//!        │ reads                │ mutations            │ vacuum
//!        ▼                      ▼                      ▼
//!   ┌──────────┐         ┌─────────────┐        ┌─────────────┐
//!   │  Index   │◄────────│  LogWriter  │        │  Compactor  │
//!   │ (HashMap)│ replay  │  (append)   │        │ (tmp+rename)│
//!   └──────────┘         └──────┬──────┘        └──────┬──────┘
//!                               └──────────┬───────────┘
//!                                          ▼
//!                                   ┌─────────────┐
//!                                   │  log file   │
//!                                   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod log;
pub mod index;
pub mod store;
pub mod concurrent;
pub mod links;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SlateError, Result};
pub use config::{Config, SyncStrategy};
pub use index::{Entry, Value};
pub use store::{Store, VacuumReport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SlateKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
