//! Shared Store
//!
//! Cloneable store handle guarded by a single mutex.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::index::{Entry, Value};
use crate::store::{Store, VacuumReport};

/// Thread-safe wrapper around a [`Store`]
///
/// Reads and writes both take the lock: the store is small and every
/// operation is short, and a vacuum must not overlap any mutation.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Open a store and wrap it
    pub fn open(config: Config) -> Result<Self> {
        Ok(Self::new(Store::open(config)?))
    }

    /// Wrap an already opened store
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn put(&self, key: &str, value: Option<Value>, replace: bool) -> Result<Option<Value>> {
        self.inner.lock().put(key, value, replace)
    }

    pub fn del(&self, key: &str) -> Result<()> {
        self.inner.lock().del(key)
    }

    pub fn get(&self, key: &str, include_deleted: bool) -> Option<Entry> {
        self.inner.lock().get(key, include_deleted).cloned()
    }

    pub fn list(&self, include_deleted: bool) -> Vec<(String, Entry)> {
        self.inner.lock().list(include_deleted)
    }

    pub fn vacuum(&self) -> Result<VacuumReport> {
        self.inner.lock().vacuum()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with exclusive access to the store
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.inner.lock();
        f(&mut store)
    }
}
