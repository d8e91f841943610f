//! Concurrency Module
//!
//! Ways to share one store between threads without breaking the
//! single-writer rule.
//!
//! ## Architecture
//! - `SharedStore`: every call takes one mutex, callers run the I/O
//! - `StoreWorker`: one thread owns the store, callers send requests over
//!   a channel and block on the reply

mod shared;
mod worker;

pub use shared::SharedStore;
pub use worker::{Request, StoreHandle, StoreWorker};
