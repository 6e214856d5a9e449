use crate::common::Value;
use crate::document::{DocumentId, DOC_ID};
use crate::errors::{ErrorKind, RepoError, RepoResult};
use im::OrdMap;
use std::fmt::{Debug, Display, Formatter};

/// A document: an ordered collection of key-value pairs.
///
/// Documents are the unit of storage, the unit of query (a filter translates
/// caller intent into a query document understood by the store client) and
/// the unit of mutation (a partial update translates into a field-mutation
/// document). The key is always a [String] and the value is a [Value].
///
/// The `_id` field is reserved: it holds the store-assigned [DocumentId]
/// after insertion and only accepts [Value::Id] values.
///
/// ## Lock-free design
///
/// The backing map is `im::OrdMap`, a persistent ordered map: cloning is
/// O(1) through internal structural sharing, and each mutated document is
/// completely independent of the original. This is what makes session
/// snapshots in the in-memory store cheap.
#[derive(Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key.
    ///
    /// If the key already exists its value is replaced.
    ///
    /// # Arguments
    ///
    /// * `key` - The field name. Cannot be empty.
    /// * `value` - Anything convertible into a [Value].
    ///
    /// # Errors
    ///
    /// * The key is empty
    /// * The key is the reserved `_id` field and the value is not a
    ///   [Value::Id]
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let mut doc = Document::new();
    /// doc.put("name", "Alice")?;
    /// doc.put("age", 30i64)?;
    /// assert_eq!(doc.size(), 2);
    /// ```
    pub fn put<V: Into<Value>>(&mut self, key: &str, value: V) -> RepoResult<()> {
        if key.is_empty() {
            log::error!("Cannot put value with empty key");
            return Err(RepoError::new(
                "Document key cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();
        if key == DOC_ID && !matches!(value, Value::Id(_)) {
            log::error!("Reserved field {} only accepts document ids", DOC_ID);
            return Err(RepoError::new(
                "Reserved field _id only accepts document ids",
                ErrorKind::InvalidOperation,
            ));
        }

        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Gets the value associated with a key, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Removes a key from the document, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Returns the store-assigned id of this document, if it has one.
    pub fn id(&self) -> Option<DocumentId> {
        match self.data.get(DOC_ID) {
            Some(Value::Id(id)) => Some(*id),
            _ => None,
        }
    }

    /// Assigns the store-native id of this document.
    pub(crate) fn set_id(&mut self, id: DocumentId) {
        self.data.insert(DOC_ID.to_string(), Value::Id(id));
    }

    /// Iterates over the fields of the document in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Returns the field names of the document in key order.
    pub fn fields(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (idx, (key, value)) in self.data.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document {
            data: iter.into_iter().collect(),
        }
    }
}

/// Creates a [Document] from key-value pairs.
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::doc;
///
/// let doc = doc! {
///     "name": "Jon Snow",
///     "house": "Stark",
///     "age": 24i64,
/// };
/// assert_eq!(doc.size(), 3);
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::document::Document::new()
    };

    ( $($key:literal : $value:expr),* $(,)? ) => {{
        let mut doc = $crate::document::Document::new();
        $(
            doc.put($key, $value)
                .expect(concat!("Failed to put field ", $key, " in document"));
        )*
        doc
    }};
}
