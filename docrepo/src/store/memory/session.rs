use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::store::memory::collection::MemoryCollection;
use crate::store::StoreSessionProvider;
use im::OrdMap;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

use crate::document::{Document, DocumentId};

type CollectionSnapshot = (MemoryCollection, OrdMap<DocumentId, Document>);

/// Admission gate serializing write sessions over one store.
///
/// At most one session is open at a time; `acquire` blocks until the
/// current holder releases. Sessions never interleave, so a whole-store
/// snapshot taken at session start only ever differs from the live state
/// by that session's own writes.
pub(crate) struct SessionGate {
    busy: Mutex<bool>,
    released: Condvar,
}

impl SessionGate {
    pub(crate) fn new() -> Self {
        SessionGate {
            busy: Mutex::new(false),
            released: Condvar::new(),
        }
    }

    fn acquire(&self) {
        let mut busy = self.busy.lock();
        while *busy {
            self.released.wait(&mut busy);
        }
        *busy = true;
    }

    fn release(&self) {
        *self.busy.lock() = false;
        self.released.notify_one();
    }
}

/// A write session over the in-memory store.
///
/// Takes the store's [SessionGate], then captures a snapshot of every
/// registered collection (O(1) per collection through the persistent map).
/// `commit` discards the snapshots; `abort` restores them, returning the
/// store to its pre-session state. Either call releases the gate and
/// finishes the session; finishing twice is an error. Dropping an
/// unfinished session aborts it.
pub(crate) struct InMemorySession {
    gate: Arc<SessionGate>,
    snapshots: Mutex<Option<Vec<CollectionSnapshot>>>,
}

impl InMemorySession {
    pub(crate) fn begin(collections: Vec<MemoryCollection>, gate: Arc<SessionGate>) -> Self {
        gate.acquire();
        let snapshots = collections
            .into_iter()
            .map(|collection| {
                let snapshot = collection.snapshot();
                (collection, snapshot)
            })
            .collect();
        InMemorySession {
            gate,
            snapshots: Mutex::new(Some(snapshots)),
        }
    }

    fn finish(&self) -> RepoResult<Vec<CollectionSnapshot>> {
        self.snapshots.lock().take().ok_or_else(|| {
            log::error!("Session already finished");
            RepoError::new("Session already finished", ErrorKind::Transaction)
        })
    }

    fn rollback(snapshots: Vec<CollectionSnapshot>) {
        for (collection, snapshot) in snapshots {
            log::debug!("Rolling back collection {}", collection.name());
            collection.restore(snapshot);
        }
    }
}

impl StoreSessionProvider for InMemorySession {
    fn commit(&self) -> RepoResult<()> {
        let _ = self.finish()?;
        self.gate.release();
        Ok(())
    }

    fn abort(&self) -> RepoResult<()> {
        let snapshots = self.finish()?;
        Self::rollback(snapshots);
        self.gate.release();
        Ok(())
    }
}

impl Drop for InMemorySession {
    fn drop(&mut self) {
        if let Some(snapshots) = self.snapshots.lock().take() {
            Self::rollback(snapshots);
            self.gate.release();
        }
    }
}
