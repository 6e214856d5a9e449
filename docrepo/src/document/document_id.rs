use crate::errors::{ErrorKind, RepoError, RepoResult};
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

/// A unique identifier for documents in a collection.
///
/// Each document in a collection is uniquely identified by a `DocumentId`.
/// The id is generated by the store during insertion and never mutated
/// afterwards. It is stored in the reserved `_id` field of the document.
///
/// # Encoding
///
/// The store-native form is a v4 UUID. The opaque string form handed to
/// callers is the 32-character lowercase hex encoding produced by
/// [DocumentId::to_hex] and `Display`. [DocumentId::parse] converts the
/// opaque form back without contacting the store and fails with
/// [ErrorKind::InvalidId] for malformed input.
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::document::DocumentId;
///
/// let id = DocumentId::new();
/// let opaque = id.to_hex();
/// let parsed = DocumentId::parse(&opaque)?;
/// assert_eq!(id, parsed);
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentId {
    id_value: Uuid,
}

impl DocumentId {
    /// Generates a new unique `DocumentId`.
    pub fn new() -> Self {
        DocumentId {
            id_value: Uuid::new_v4(),
        }
    }

    /// Parses an opaque identifier string into a `DocumentId`.
    ///
    /// # Arguments
    ///
    /// * `id` - The opaque string form of the identifier
    ///
    /// # Returns
    /// * `Ok(DocumentId)` - The decoded identifier
    /// * `Err(RepoError)` - [ErrorKind::InvalidId] if the string is not a
    ///   valid identifier encoding
    pub fn parse(id: &str) -> RepoResult<Self> {
        match Uuid::try_parse(id) {
            Ok(id_value) => Ok(DocumentId { id_value }),
            Err(e) => {
                log::error!("Failed to parse document id '{}': {}", id, e);
                Err(RepoError::new(
                    &format!("Invalid document id: {}", id),
                    ErrorKind::InvalidId,
                ))
            }
        }
    }

    /// Returns the opaque string form of this identifier.
    pub fn to_hex(&self) -> String {
        self.id_value.simple().to_string()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        DocumentId::new()
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id_value.simple())
    }
}

impl Debug for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocumentId({})", self.id_value.simple())
    }
}
