//! Store Worker
//!
//! Runs a store on a dedicated thread and serializes every request through
//! a channel.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};

use crate::error::{Result, SlateError};
use crate::index::{Entry, Value};
use crate::store::{Store, VacuumReport};

/// A request to the worker thread, carrying its reply channel
pub enum Request {
    Put {
        key: String,
        value: Option<Value>,
        replace: bool,
        reply: Sender<Result<Option<Value>>>,
    },
    Del {
        key: String,
        reply: Sender<Result<()>>,
    },
    Get {
        key: String,
        include_deleted: bool,
        reply: Sender<Option<Entry>>,
    },
    List {
        include_deleted: bool,
        reply: Sender<Vec<(String, Entry)>>,
    },
    Vacuum {
        reply: Sender<Result<VacuumReport>>,
    },
    Sync {
        reply: Sender<Result<()>>,
    },
    Shutdown,
}

/// Owns the worker thread
pub struct StoreWorker {
    handle: StoreHandle,
    thread: Option<JoinHandle<Store>>,
}

/// Cloneable client side of a [`StoreWorker`]
#[derive(Clone)]
pub struct StoreHandle {
    requests: Sender<Request>,
}

impl StoreWorker {
    /// Move `store` onto a new thread
    pub fn spawn(store: Store) -> Result<Self> {
        let (tx, rx) = channel::unbounded();

        let thread = thread::Builder::new()
            .name("slatekv-store".to_string())
            .spawn(move || run(store, rx))?;

        tracing::debug!("store worker started");

        Ok(Self {
            handle: StoreHandle { requests: tx },
            thread: Some(thread),
        })
    }

    /// Get a handle for sending requests
    pub fn handle(&self) -> StoreHandle {
        self.handle.clone()
    }

    /// Stop the thread once queued requests are served and get the store back
    pub fn shutdown(mut self) -> Result<Store> {
        self.stop().ok_or(SlateError::WorkerStopped)
    }

    fn stop(&mut self) -> Option<Store> {
        let thread = self.thread.take()?;
        let _ = self.handle.requests.send(Request::Shutdown);
        match thread.join() {
            Ok(store) => Some(store),
            Err(_) => {
                tracing::error!("store worker panicked");
                None
            }
        }
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(mut store: Store, requests: Receiver<Request>) -> Store {
    for request in requests.iter() {
        // A dropped reply receiver means the caller gave up; the work is done anyway
        match request {
            Request::Put {
                key,
                value,
                replace,
                reply,
            } => {
                let _ = reply.send(store.put(&key, value, replace));
            }
            Request::Del { key, reply } => {
                let _ = reply.send(store.del(&key));
            }
            Request::Get {
                key,
                include_deleted,
                reply,
            } => {
                let _ = reply.send(store.get(&key, include_deleted).cloned());
            }
            Request::List {
                include_deleted,
                reply,
            } => {
                let _ = reply.send(store.list(include_deleted));
            }
            Request::Vacuum { reply } => {
                let _ = reply.send(store.vacuum());
            }
            Request::Sync { reply } => {
                let _ = reply.send(store.sync());
            }
            Request::Shutdown => break,
        }
    }

    if let Err(e) = store.sync() {
        tracing::warn!(error = %e, "final sync failed");
    }
    tracing::debug!("store worker stopped");

    store
}

impl StoreHandle {
    fn call<T>(&self, make: impl FnOnce(Sender<T>) -> Request) -> Result<T> {
        let (tx, rx) = channel::bounded(1);
        self.requests
            .send(make(tx))
            .map_err(|_| SlateError::WorkerStopped)?;
        rx.recv().map_err(|_| SlateError::WorkerStopped)
    }

    pub fn put(&self, key: &str, value: Option<Value>, replace: bool) -> Result<Option<Value>> {
        self.call(|reply| Request::Put {
            key: key.to_string(),
            value,
            replace,
            reply,
        })?
    }

    pub fn del(&self, key: &str) -> Result<()> {
        self.call(|reply| Request::Del {
            key: key.to_string(),
            reply,
        })?
    }

    pub fn get(&self, key: &str, include_deleted: bool) -> Result<Option<Entry>> {
        self.call(|reply| Request::Get {
            key: key.to_string(),
            include_deleted,
            reply,
        })
    }

    pub fn list(&self, include_deleted: bool) -> Result<Vec<(String, Entry)>> {
        self.call(|reply| Request::List {
            include_deleted,
            reply,
        })
    }

    pub fn vacuum(&self) -> Result<VacuumReport> {
        self.call(|reply| Request::Vacuum { reply })?
    }

    pub fn sync(&self) -> Result<()> {
        self.call(|reply| Request::Sync { reply })?
    }
}
