use crate::document::Document;
use crate::errors::RepoResult;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

/// Trait for implementing query filters.
///
/// A `FilterProvider` translates caller intent into a native query document
/// understood by the store client. The repository never inspects document
/// field values itself; all filtering semantics live in caller-supplied
/// implementations of this trait.
///
/// # Purity
///
/// `to_query` must be pure: no side effects and no state retained between
/// calls. The repository may invoke it any number of times for one logical
/// operation.
///
/// # Examples
///
/// A caller-defined filter matching people by name:
///
/// ```rust,ignore
/// struct ByName(String);
///
/// impl FilterProvider for ByName {
///     fn to_query(&self) -> RepoResult<Document> {
///         let mut query = Document::new();
///         query.put("name", self.0.as_str())?;
///         Ok(query)
///     }
/// }
///
/// impl Display for ByName {
///     fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
///         write!(f, "ByName({})", self.0)
///     }
/// }
/// ```
pub trait FilterProvider: Send + Sync + Display {
    /// Translates this filter into a native query document.
    ///
    /// # Returns
    ///
    /// The query document, or an error if translation fails. Translation
    /// failures surface to the caller with [crate::errors::ErrorKind::Filter].
    fn to_query(&self) -> RepoResult<Document>;
}

/// A query filter handle.
///
/// Wraps a [FilterProvider] implementation behind an `Arc` so filters are
/// cheap to clone and share. Construct with [Filter::new] from any provider,
/// or use [all] for the match-everything filter.
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new filter from a filter provider implementation.
    ///
    /// # Arguments
    ///
    /// * `inner` - A type implementing [FilterProvider]
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }
}

impl Display for Filter {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Deref for Filter {
    type Target = dyn FilterProvider;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

/// The only built-in filter: matches every document in a collection.
///
/// Used by the repository whenever the caller passes no filter. Translates
/// to the empty query document, which every store client treats as
/// match-everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFilter;

impl FilterProvider for DefaultFilter {
    fn to_query(&self) -> RepoResult<Document> {
        Ok(Document::new())
    }
}

impl Display for DefaultFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(all)")
    }
}

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::new(DefaultFilter)
}
