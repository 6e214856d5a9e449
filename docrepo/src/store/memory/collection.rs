use crate::common::{SortOrder, Value};
use crate::document::{Document, DocumentId};
use crate::errors::RepoResult;
use crate::repository::FilterOptions;
use crate::store::{DocumentCursor, StoreCollectionProvider};
use im::OrdMap;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::sync::Arc;

/// An in-memory collection of documents.
///
/// Documents live in a persistent ordered map keyed by [DocumentId]; the
/// map's key order is the collection's natural order. The native query
/// language is a conjunction of top-level field-equality predicates (an
/// empty query document matches everything), and the native mutation
/// language is a set of field replacements.
///
/// Snapshots are O(1) thanks to the persistent map, which is what makes
/// session rollback cheap.
#[derive(Clone)]
pub(crate) struct MemoryCollection {
    inner: Arc<MemoryCollectionInner>,
}

struct MemoryCollectionInner {
    name: String,
    data: RwLock<OrdMap<DocumentId, Document>>,
}

impl MemoryCollection {
    pub(crate) fn new(name: &str) -> Self {
        MemoryCollection {
            inner: Arc::new(MemoryCollectionInner {
                name: name.to_string(),
                data: RwLock::new(OrdMap::new()),
            }),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.inner.name
    }

    /// Captures the current state of the collection.
    pub(crate) fn snapshot(&self) -> OrdMap<DocumentId, Document> {
        self.inner.data.read().clone()
    }

    /// Replaces the collection content with a previously captured snapshot.
    pub(crate) fn restore(&self, snapshot: OrdMap<DocumentId, Document>) {
        *self.inner.data.write() = snapshot;
    }

    fn matches(document: &Document, query: &Document) -> bool {
        query
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    fn compare(a: &Document, b: &Document, sort: &[(String, SortOrder)]) -> Ordering {
        for (field, order) in sort {
            let left = a.get(field).unwrap_or(&Value::Null);
            let right = b.get(field).unwrap_or(&Value::Null);
            let ordering = match order {
                SortOrder::Ascending => left.cmp(right),
                SortOrder::Descending => right.cmp(left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Collects matching documents in natural order, then applies the set
    /// parts of `options`.
    fn select(&self, query: &Document, options: &FilterOptions) -> Vec<Document> {
        let data = self.inner.data.read().clone();
        let mut matched: Vec<Document> = data
            .values()
            .filter(|document| Self::matches(document, query))
            .cloned()
            .collect();

        if !options.sort.is_empty() {
            matched.sort_by(|a, b| Self::compare(a, b, &options.sort));
        }

        let offset = options.offset as usize;
        if offset > 0 {
            matched = matched.split_off(offset.min(matched.len()));
        }
        if options.limit > 0 {
            matched.truncate(options.limit as usize);
        }
        matched
    }
}

impl StoreCollectionProvider for MemoryCollection {
    fn insert(&self, mut document: Document) -> RepoResult<DocumentId> {
        let id = document.id().unwrap_or_else(DocumentId::new);
        document.set_id(id);

        let mut data = self.inner.data.write();
        data.insert(id, document);
        log::debug!("Inserted document {} into {}", id, self.name());
        Ok(id)
    }

    fn find(&self, query: &Document, options: &FilterOptions) -> RepoResult<DocumentCursor> {
        Ok(DocumentCursor::from_documents(self.select(query, options)))
    }

    fn count(&self, query: &Document) -> RepoResult<u64> {
        let data = self.inner.data.read();
        let count = data
            .values()
            .filter(|document| Self::matches(document, query))
            .count();
        Ok(count as u64)
    }

    fn find_one(&self, query: &Document) -> RepoResult<Option<Document>> {
        let data = self.inner.data.read();
        Ok(data
            .values()
            .find(|document| Self::matches(document, query))
            .cloned())
    }

    fn update(&self, query: &Document, mutation: &Document) -> RepoResult<u64> {
        let mut data = self.inner.data.write();
        let target = data
            .values()
            .find(|document| Self::matches(document, query))
            .cloned();

        let Some(mut document) = target else {
            log::debug!("Update matched no document in {}", self.name());
            return Ok(0);
        };

        for (field, value) in mutation.iter() {
            document.put(field, value.clone())?;
        }
        // id is immutable once assigned, so the key is stable
        if let Some(id) = document.id() {
            data.insert(id, document);
        }
        Ok(1)
    }

    fn delete(&self, query: &Document) -> RepoResult<u64> {
        let mut data = self.inner.data.write();
        let target = data
            .values()
            .find(|document| Self::matches(document, query))
            .and_then(|document| document.id());

        let Some(id) = target else {
            log::debug!("Delete matched no document in {}", self.name());
            return Ok(0);
        };

        data.remove(&id);
        Ok(1)
    }
}
