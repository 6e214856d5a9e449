//! Documents and store-native identifiers.

#[allow(clippy::module_inception)]
mod document;
mod document_id;

pub use document::*;
pub use document_id::*;

/// Reserved field holding the store-assigned id of a document.
pub const DOC_ID: &str = "_id";
