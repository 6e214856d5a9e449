use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::store::memory::collection::MemoryCollection;
use crate::store::memory::session::{InMemorySession, SessionGate};
use crate::store::{StoreClient, StoreClientProvider, StoreCollection, StoreConfig, StoreSession};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// URI scheme accepted by the in-memory client.
pub const MEMORY_URI_SCHEME: &str = "memory://";

/// An in-memory document store client.
///
/// # Purpose
/// A complete, dependency-free backend implementing the store client
/// contract: collections live in process memory, sessions roll back through
/// persistent-map snapshots, and nothing survives the process. It hosts the
/// integration test-suite and serves as the reference semantics for the
/// contract.
///
/// # Characteristics
/// - **Thread-safe**: Collection registry in a concurrent map, collection
///   data behind reader-writer locks
/// - **Cheap sharing**: Cloning the handle shares the same store
/// - **Session rollback**: Sessions snapshot all collections at start and
///   restore them on abort
/// - **Serialized sessions**: one write session at a time; concurrent
///   `start_session` calls queue on the store's session gate, so a rollback
///   never undoes another caller's committed writes
///
/// # Usage
/// ```rust,ignore
/// use docrepo::store::{InMemoryClient, StoreConfig};
///
/// let client = InMemoryClient::connect(&StoreConfig::new("memory://test"))?;
/// let collection = client.collection("db", "people");
/// ```
pub struct InMemoryClient {
    inner: Arc<InMemoryClientInner>,
}

struct InMemoryClientInner {
    uri: String,
    collections: DashMap<String, MemoryCollection>,
    session_gate: Arc<SessionGate>,
    closed: AtomicBool,
}

impl InMemoryClient {
    /// Connects an in-memory client using the given configuration.
    ///
    /// The configuration is consumed once here; it is never re-read.
    ///
    /// # Arguments
    ///
    /// * `config` - Store configuration; the URI must use the `memory://`
    ///   scheme
    ///
    /// # Returns
    /// * `Ok(StoreClient)` - A connected client handle
    /// * `Err(RepoError)` - [ErrorKind::Connection] if the URI does not use
    ///   the `memory://` scheme
    pub fn connect(config: &StoreConfig) -> RepoResult<StoreClient> {
        if !config.uri().starts_with(MEMORY_URI_SCHEME) {
            log::error!("Unsupported store uri: {}", config.uri());
            return Err(RepoError::new(
                &format!("Cannot connect to store at {}", config.uri()),
                ErrorKind::Connection,
            ));
        }

        log::debug!("Connected in-memory store at {}", config.uri());
        Ok(StoreClient::new(InMemoryClient {
            inner: Arc::new(InMemoryClientInner {
                uri: config.uri().to_string(),
                collections: DashMap::new(),
                session_gate: Arc::new(SessionGate::new()),
                closed: AtomicBool::new(false),
            }),
        }))
    }

    fn collection_key(database_name: &str, collection_name: &str) -> String {
        format!("{}/{}", database_name, collection_name)
    }
}

impl StoreClientProvider for InMemoryClient {
    fn collection(&self, database_name: &str, collection_name: &str) -> StoreCollection {
        let key = Self::collection_key(database_name, collection_name);
        let collection = self
            .inner
            .collections
            .entry(key.clone())
            .or_insert_with(|| MemoryCollection::new(&key))
            .clone();
        StoreCollection::new(collection)
    }

    fn start_session(&self) -> RepoResult<StoreSession> {
        if self.inner.closed.load(Ordering::SeqCst) {
            log::error!("Cannot start session: client {} is closed", self.inner.uri);
            return Err(RepoError::new(
                "Store client is disconnected",
                ErrorKind::Connection,
            ));
        }

        let collections: Vec<MemoryCollection> = self
            .inner
            .collections
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Ok(StoreSession::new(InMemorySession::begin(
            collections,
            self.inner.session_gate.clone(),
        )))
    }

    fn disconnect(&self) -> RepoResult<()> {
        self.inner.closed.store(true, Ordering::SeqCst);
        log::debug!("Disconnected in-memory store at {}", self.inner.uri);
        Ok(())
    }
}
