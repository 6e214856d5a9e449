use crate::document::Document;
use crate::errors::RepoResult;

/// Declares how an entity type binds to a collection.
///
/// The only configuration is the collection name. The default
/// implementation derives it from the type's name (the last path segment,
/// generic arguments stripped), so most types implement the trait with an
/// empty body:
///
/// ```rust,ignore
/// struct Person { name: String }
///
/// impl Entity for Person {}
/// assert_eq!(Person::entity_name(), "Person");
/// ```
///
/// Override `entity_name` to bind to a differently-named collection. A
/// per-repository override is also available through
/// [crate::repository::Repository::with_collection].
pub trait Entity {
    /// Returns the collection name this entity type binds to.
    fn entity_name() -> String {
        let full_name = std::any::type_name::<Self>();
        let base = full_name.split('<').next().unwrap_or(full_name);
        base.rsplit("::").next().unwrap_or(base).to_string()
    }
}

/// Enables bidirectional conversion between an entity and its document
/// form.
///
/// `to_document` is invoked on every create; `from_document` on every
/// decode of a query result. Mapping failures should carry
/// [crate::errors::ErrorKind::ObjectMapping].
///
/// The store-assigned `_id` field is managed by the store and should be
/// ignored by `from_document`; round-tripping an entity through the store
/// yields a value field-equal to the original, identifier excluded.
///
/// # Examples
///
/// ```rust,ignore
/// impl Convertible for Person {
///     fn to_document(&self) -> RepoResult<Document> {
///         let mut doc = Document::new();
///         doc.put("name", self.name.as_str())?;
///         Ok(doc)
///     }
///
///     fn from_document(document: &Document) -> RepoResult<Self> {
///         let name = document
///             .get("name")
///             .and_then(|v| v.as_str())
///             .ok_or_else(|| RepoError::new("missing name", ErrorKind::ObjectMapping))?;
///         Ok(Person { name: name.to_string() })
///     }
/// }
/// ```
pub trait Convertible: Sized {
    /// Converts this entity into its document form.
    fn to_document(&self) -> RepoResult<Document>;

    /// Reconstructs an entity from its document form.
    fn from_document(document: &Document) -> RepoResult<Self>;
}
