use crate::common::CancelToken;
use crate::document::{Document, DocumentId};
use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::filter::{DefaultFilter, Filter, FilterProvider};
use crate::repository::{Convertible, Entity, FilterOptions};
use crate::store::{StoreClient, StoreCollection};
use crate::transaction::Transaction;
use crate::update::PartialUpdate;
use std::marker::PhantomData;

// Cancellation check interval inside the streaming decode loop.
const DECODE_CHECK_INTERVAL: usize = 64;

/// A typed repository binding one entity type to one collection.
///
/// # Purpose
///
/// `Repository<T>` exposes create/read/update/delete and filtered-query
/// operations for a single entity type without any per-type query
/// translation: filtering and mutation semantics are delegated entirely to
/// caller-supplied [Filter] and [PartialUpdate] capabilities, whose native
/// documents are handed to the store client untouched.
///
/// # Characteristics
///
/// - **Immutable binding**: Client, database name, and collection handle
///   are fixed at construction; the repository holds no mutable state, so
///   every operation is safe to call concurrently.
/// - **Call-scoped transactions**: Each mutating operation (create, update,
///   delete) runs inside one dedicated [Transaction] that commits on
///   success, aborts on any failure, and always releases its session.
/// - **Cancellable**: Every operation takes a [CancelToken] checked on
///   entry and between store round trips.
///
/// # Usage
///
/// ```rust,ignore
/// use docrepo::repository::Repository;
/// use docrepo::store::{InMemoryClient, StoreConfig};
///
/// let client = InMemoryClient::connect(&StoreConfig::new("memory://app"))?;
/// let repo: Repository<Person> = Repository::new(client, "app");
///
/// let ctx = CancelToken::none();
/// let id = repo.create(&Person { name: "Jon Snow".into() }, &ctx)?;
/// let person = repo.get(&id, &ctx)?;
/// ```
pub struct Repository<T> {
    client: StoreClient,
    database_name: String,
    collection_name: String,
    collection: StoreCollection,
    entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            client: self.client.clone(),
            database_name: self.database_name.clone(),
            collection_name: self.collection_name.clone(),
            collection: self.collection.clone(),
            entity: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Convertible + Entity + Send + Sync,
{
    /// Creates a repository bound to the collection named after `T`.
    ///
    /// # Arguments
    ///
    /// * `client` - A connected store client
    /// * `database_name` - The database holding the collection
    pub fn new(client: StoreClient, database_name: &str) -> Self {
        let collection_name = T::entity_name();
        Self::with_collection(client, database_name, &collection_name)
    }

    /// Creates a repository bound to an explicitly named collection.
    ///
    /// # Arguments
    ///
    /// * `client` - A connected store client
    /// * `database_name` - The database holding the collection
    /// * `collection_name` - Overrides the type-derived collection name
    pub fn with_collection(
        client: StoreClient,
        database_name: &str,
        collection_name: &str,
    ) -> Self {
        let collection = client.collection(database_name, collection_name);
        Repository {
            client,
            database_name: database_name.to_string(),
            collection_name: collection_name.to_string(),
            collection,
            entity: PhantomData,
        }
    }

    /// Returns the database name this repository is bound to.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Returns the collection name this repository is bound to.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Inserts an entity inside a dedicated transaction.
    ///
    /// # Arguments
    ///
    /// * `object` - The entity to insert
    /// * `ctx` - Cancellation token for this call
    ///
    /// # Returns
    /// * `Ok(String)` - The opaque store-generated identifier
    /// * `Err(RepoError)` - [ErrorKind::Write] if the insert itself failed,
    ///   [ErrorKind::Transaction] if the session could not start or commit
    pub fn create(&self, object: &T, ctx: &CancelToken) -> RepoResult<String> {
        ctx.ensure_active()?;
        let document = object.to_document()?;

        let tx = Transaction::begin(&self.client)?;
        match self.collection.insert(document) {
            Ok(id) => {
                tx.commit()?;
                log::debug!("Created document {} in {}", id, self.collection_name);
                Ok(id.to_hex())
            }
            Err(e) => {
                self.abort_quietly(tx);
                Err(RepoError::new_with_cause(
                    "Failed to insert document",
                    ErrorKind::Write,
                    e,
                ))
            }
        }
    }

    /// Returns all entities matching a filter.
    ///
    /// Streams matches from the store and decodes each into `T`. The
    /// returned vector is empty (never an error) when nothing matches.
    ///
    /// # Arguments
    ///
    /// * `filter` - The query filter; `None` means match everything
    /// * `options` - Pagination and ordering; only set parts are applied
    /// * `ctx` - Cancellation token for this call
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The decoded matches
    /// * `Err(RepoError)` - [ErrorKind::Query] on transport or decode
    ///   failure
    pub fn filter(
        &self,
        filter: Option<&Filter>,
        options: &FilterOptions,
        ctx: &CancelToken,
    ) -> RepoResult<Vec<T>> {
        ctx.ensure_active()?;
        let query = self.query_for(filter)?;

        let cursor = self.collection.find(&query, options).map_err(|e| {
            RepoError::new_with_cause("Failed to query documents", ErrorKind::Query, e)
        })?;

        let mut items = Vec::new();
        for (index, entry) in cursor.enumerate() {
            if index % DECODE_CHECK_INTERVAL == 0 {
                ctx.ensure_active()?;
            }

            let document = entry.map_err(|e| {
                RepoError::new_with_cause("Failed to read result stream", ErrorKind::Query, e)
            })?;
            items.push(Self::decode(&document)?);
        }
        Ok(items)
    }

    /// Returns the number of entities matching a filter without
    /// materializing them.
    ///
    /// For a quiescent store and identical filter, agrees with the length
    /// of the result of [Repository::filter].
    ///
    /// # Arguments
    ///
    /// * `filter` - The query filter; `None` means match everything
    /// * `ctx` - Cancellation token for this call
    pub fn count(&self, filter: Option<&Filter>, ctx: &CancelToken) -> RepoResult<u64> {
        ctx.ensure_active()?;
        let query = self.query_for(filter)?;
        self.collection.count(&query).map_err(|e| {
            RepoError::new_with_cause("Failed to count documents", ErrorKind::Query, e)
        })
    }

    /// Returns the first entity matching a filter, in the store's natural
    /// order.
    ///
    /// # Arguments
    ///
    /// * `filter` - The query filter; `None` means match everything
    /// * `ctx` - Cancellation token for this call
    ///
    /// # Returns
    /// * `Ok(T)` - The first match
    /// * `Err(RepoError)` - [ErrorKind::NotFound] if nothing matches,
    ///   [ErrorKind::Query] on transport or decode failure
    pub fn find_one(&self, filter: Option<&Filter>, ctx: &CancelToken) -> RepoResult<T> {
        ctx.ensure_active()?;
        let query = self.query_for(filter)?;

        let found = self.collection.find_one(&query).map_err(|e| {
            RepoError::new_with_cause("Failed to query documents", ErrorKind::Query, e)
        })?;
        match found {
            Some(document) => Self::decode(&document),
            None => Err(RepoError::new(
                "No document matched the filter",
                ErrorKind::NotFound,
            )),
        }
    }

    /// Returns the entity with the given identifier.
    ///
    /// The identifier is parsed before any store round trip; a malformed
    /// identifier never reaches the store.
    ///
    /// # Arguments
    ///
    /// * `id` - The opaque identifier returned by [Repository::create]
    /// * `ctx` - Cancellation token for this call
    ///
    /// # Returns
    /// * `Ok(T)` - The entity
    /// * `Err(RepoError)` - [ErrorKind::InvalidId] if the identifier cannot
    ///   be parsed, [ErrorKind::NotFound] if no document has that id
    pub fn get(&self, id: &str, ctx: &CancelToken) -> RepoResult<T> {
        ctx.ensure_active()?;
        let native_id = DocumentId::parse(id)?;

        let found = self
            .collection
            .find_one(&Self::id_query(native_id))
            .map_err(|e| {
                RepoError::new_with_cause("Failed to query documents", ErrorKind::Query, e)
            })?;
        match found {
            Some(document) => Self::decode(&document),
            None => Err(RepoError::new(
                &format!("No document with id {}", id),
                ErrorKind::NotFound,
            )),
        }
    }

    /// Applies a partial update to the entity with the given identifier,
    /// atomically, inside a dedicated transaction.
    ///
    /// Matching no document is a silent no-op: no match count or version
    /// check is surfaced.
    ///
    /// # Arguments
    ///
    /// * `id` - The opaque identifier of the entity to mutate
    /// * `update` - The partial update to apply
    /// * `ctx` - Cancellation token for this call
    ///
    /// # Returns
    /// * `Ok(())` - The mutation was applied (or matched nothing)
    /// * `Err(RepoError)` - [ErrorKind::InvalidId] for a malformed
    ///   identifier, [ErrorKind::Write] if the mutation failed,
    ///   [ErrorKind::Transaction] on session start/commit failure
    pub fn update(
        &self,
        id: &str,
        update: &PartialUpdate<T>,
        ctx: &CancelToken,
    ) -> RepoResult<()> {
        ctx.ensure_active()?;
        let native_id = DocumentId::parse(id)?;
        let mutation = update.to_update().map_err(|e| {
            RepoError::new_with_cause("Failed to translate update", ErrorKind::Filter, e)
        })?;

        let tx = Transaction::begin(&self.client)?;
        match self.collection.update(&Self::id_query(native_id), &mutation) {
            Ok(matched) => {
                tx.commit()?;
                if matched == 0 {
                    log::debug!("Update of {} matched no document", id);
                }
                Ok(())
            }
            Err(e) => {
                self.abort_quietly(tx);
                Err(RepoError::new_with_cause(
                    "Failed to update document",
                    ErrorKind::Write,
                    e,
                ))
            }
        }
    }

    /// Removes the entity with the given identifier inside a dedicated
    /// transaction.
    ///
    /// Matching no document is a silent no-op, as for
    /// [Repository::update].
    ///
    /// # Arguments
    ///
    /// * `id` - The opaque identifier of the entity to remove
    /// * `ctx` - Cancellation token for this call
    pub fn delete(&self, id: &str, ctx: &CancelToken) -> RepoResult<()> {
        ctx.ensure_active()?;
        let native_id = DocumentId::parse(id)?;

        let tx = Transaction::begin(&self.client)?;
        match self.collection.delete(&Self::id_query(native_id)) {
            Ok(matched) => {
                tx.commit()?;
                if matched == 0 {
                    log::debug!("Delete of {} matched no document", id);
                }
                Ok(())
            }
            Err(e) => {
                self.abort_quietly(tx);
                Err(RepoError::new_with_cause(
                    "Failed to delete document",
                    ErrorKind::Write,
                    e,
                ))
            }
        }
    }

    fn query_for(&self, filter: Option<&Filter>) -> RepoResult<Document> {
        let translated = match filter {
            Some(filter) => filter.to_query(),
            None => DefaultFilter.to_query(),
        };
        translated.map_err(|e| {
            RepoError::new_with_cause("Failed to translate filter", ErrorKind::Filter, e)
        })
    }

    fn id_query(id: DocumentId) -> Document {
        let mut query = Document::new();
        query.set_id(id);
        query
    }

    fn decode(document: &Document) -> RepoResult<T> {
        T::from_document(document).map_err(|e| {
            RepoError::new_with_cause("Failed to decode document", ErrorKind::Query, e)
        })
    }

    fn abort_quietly(&self, tx: Transaction) {
        if let Err(e) = tx.abort() {
            log::error!("Failed to abort transaction: {}", e);
        }
    }
}
