use crate::document::{Document, DocumentId};
use crate::errors::RepoResult;
use crate::repository::FilterOptions;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A streaming cursor over documents matched by a find operation.
///
/// Yields `RepoResult<Document>` so transport failures can surface in the
/// middle of a result stream. Repositories decode each yielded document
/// into the bound entity type as they iterate.
pub struct DocumentCursor {
    inner: Box<dyn Iterator<Item = RepoResult<Document>> + Send>,
}

impl DocumentCursor {
    /// Creates a cursor from any iterator of document results.
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = RepoResult<Document>> + Send + 'static,
    {
        DocumentCursor {
            inner: Box::new(inner),
        }
    }

    /// Creates a cursor over an already-materialized batch of documents.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        DocumentCursor {
            inner: Box::new(documents.into_iter().map(Ok)),
        }
    }
}

impl Iterator for DocumentCursor {
    type Item = RepoResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Trait implemented by a store backend for one physical collection.
///
/// Every method accepts native query/mutation documents produced by the
/// filter and partial-update capabilities; the semantics of those documents
/// belong entirely to the backend. An empty query document matches all
/// documents in the collection.
pub trait StoreCollectionProvider: Send + Sync {
    /// Inserts a document, assigning and returning its store-generated id.
    fn insert(&self, document: Document) -> RepoResult<DocumentId>;

    /// Streams documents matching the query, honoring the set parts of
    /// `options` (limit, offset, sort).
    fn find(&self, query: &Document, options: &FilterOptions) -> RepoResult<DocumentCursor>;

    /// Returns the number of documents matching the query without
    /// materializing them.
    fn count(&self, query: &Document) -> RepoResult<u64>;

    /// Returns the first matching document in the store's natural order.
    fn find_one(&self, query: &Document) -> RepoResult<Option<Document>>;

    /// Applies the mutation document atomically to the first document
    /// matching the query. Returns the number of documents matched (0 or 1).
    fn update(&self, query: &Document, mutation: &Document) -> RepoResult<u64>;

    /// Removes the first document matching the query. Returns the number of
    /// documents removed (0 or 1).
    fn delete(&self, query: &Document) -> RepoResult<u64>;
}

/// A handle to one physical collection inside a store.
///
/// Cheap to clone; all clones share the provider.
#[derive(Clone)]
pub struct StoreCollection {
    inner: Arc<dyn StoreCollectionProvider>,
}

impl StoreCollection {
    /// Creates a collection handle from a provider implementation.
    pub fn new<P: StoreCollectionProvider + 'static>(inner: P) -> Self {
        StoreCollection {
            inner: Arc::new(inner),
        }
    }

    pub fn insert(&self, document: Document) -> RepoResult<DocumentId> {
        self.inner.insert(document)
    }

    pub fn find(&self, query: &Document, options: &FilterOptions) -> RepoResult<DocumentCursor> {
        self.inner.find(query, options)
    }

    pub fn count(&self, query: &Document) -> RepoResult<u64> {
        self.inner.count(query)
    }

    pub fn find_one(&self, query: &Document) -> RepoResult<Option<Document>> {
        self.inner.find_one(query)
    }

    pub fn update(&self, query: &Document, mutation: &Document) -> RepoResult<u64> {
        self.inner.update(query, mutation)
    }

    pub fn delete(&self, query: &Document) -> RepoResult<u64> {
        self.inner.delete(query)
    }
}

/// Trait implemented by a store backend for one write session.
///
/// A session scopes exactly one repository write call. Commit makes the
/// write durable; abort restores the pre-call state. Both are terminal:
/// after either, the session is released and must not be reused.
pub trait StoreSessionProvider: Send + Sync {
    fn commit(&self) -> RepoResult<()>;
    fn abort(&self) -> RepoResult<()>;
}

/// A handle to one store write session.
#[derive(Clone)]
pub struct StoreSession {
    inner: Arc<dyn StoreSessionProvider>,
}

impl StoreSession {
    /// Creates a session handle from a provider implementation.
    pub fn new<P: StoreSessionProvider + 'static>(inner: P) -> Self {
        StoreSession {
            inner: Arc::new(inner),
        }
    }

    pub fn commit(&self) -> RepoResult<()> {
        self.inner.commit()
    }

    pub fn abort(&self) -> RepoResult<()> {
        self.inner.abort()
    }
}

impl Debug for StoreSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "StoreSession")
    }
}

/// Trait implemented by a document store client.
///
/// The client owns the connection lifecycle and low-level collection
/// access. Connection establishment happens in the backend's constructor,
/// which consumes a [crate::store::StoreConfig] once; it is never re-read
/// per call.
pub trait StoreClientProvider: Send + Sync {
    /// Returns a handle to a collection in the named database, creating it
    /// on first access if the backend supports that.
    fn collection(&self, database_name: &str, collection_name: &str) -> StoreCollection;

    /// Starts a new write session.
    ///
    /// # Returns
    /// * `Ok(StoreSession)` - A session ready to scope one write call
    /// * `Err(RepoError)` - [crate::errors::ErrorKind::Transaction] if the
    ///   session cannot be started, or
    ///   [crate::errors::ErrorKind::Connection] if the client is closed
    fn start_session(&self) -> RepoResult<StoreSession>;

    /// Disconnects the client, releasing backend resources.
    fn disconnect(&self) -> RepoResult<()>;
}

/// A handle to a connected document store client.
///
/// Cheap to clone; all clones share the underlying connection.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<dyn StoreClientProvider>,
}

impl StoreClient {
    /// Creates a client handle from a provider implementation.
    pub fn new<P: StoreClientProvider + 'static>(inner: P) -> Self {
        StoreClient {
            inner: Arc::new(inner),
        }
    }

    pub fn collection(&self, database_name: &str, collection_name: &str) -> StoreCollection {
        self.inner.collection(database_name, collection_name)
    }

    pub fn start_session(&self) -> RepoResult<StoreSession> {
        self.inner.start_session()
    }

    pub fn disconnect(&self) -> RepoResult<()> {
        self.inner.disconnect()
    }
}

impl Debug for StoreClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "StoreClient")
    }
}
