use crate::document::Document;
use crate::errors::RepoResult;
use std::fmt::Display;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

/// Trait for implementing partial updates of an entity type `T`.
///
/// An `UpdateProvider` translates caller intent into a native mutation
/// document: a set of field-to-new-value pairs the store applies atomically
/// to a single matching document. As with filters, translation must be pure
/// and the repository never inspects the produced document.
///
/// The type parameter ties a mutation to the entity type it is allowed to
/// modify; it carries no runtime data.
///
/// # Examples
///
/// ```rust,ignore
/// struct RenamePerson(String);
///
/// impl UpdateProvider<Person> for RenamePerson {
///     fn to_update(&self) -> RepoResult<Document> {
///         let mut mutation = Document::new();
///         mutation.put("name", self.0.as_str())?;
///         Ok(mutation)
///     }
/// }
/// ```
pub trait UpdateProvider<T>: Send + Sync + Display {
    /// Translates this update into a native mutation document.
    ///
    /// # Returns
    ///
    /// The mutation document, or an error if translation fails. Translation
    /// failures surface to the caller with [crate::errors::ErrorKind::Filter].
    fn to_update(&self) -> RepoResult<Document>;
}

/// A partial-update handle for entity type `T`.
///
/// Wraps an [UpdateProvider] implementation behind an `Arc` so updates are
/// cheap to clone and share.
#[derive(Clone)]
pub struct PartialUpdate<T> {
    inner: Arc<dyn UpdateProvider<T>>,
    entity: PhantomData<fn() -> T>,
}

impl<T> PartialUpdate<T> {
    /// Creates a new partial update from a provider implementation.
    ///
    /// # Arguments
    ///
    /// * `inner` - A type implementing [UpdateProvider] for `T`
    pub fn new<U: UpdateProvider<T> + 'static>(inner: U) -> Self {
        PartialUpdate {
            inner: Arc::new(inner),
            entity: PhantomData,
        }
    }
}

impl<T> Display for PartialUpdate<T> {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl<T> Deref for PartialUpdate<T> {
    type Target = dyn UpdateProvider<T>;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}
