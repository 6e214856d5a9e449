//! Store client contract and backends.
//!
//! The repository talks to a document store exclusively through the
//! provider traits in this module: [StoreClientProvider] for connection and
//! session lifecycle, [StoreCollectionProvider] for per-collection
//! operations, and [StoreSessionProvider] for write-session commit/abort.
//! Backend crates implement the traits; the [memory] module ships a
//! process-local reference backend.

mod client;
mod config;
pub mod memory;

pub use client::*;
pub use config::*;
pub use memory::{InMemoryClient, MEMORY_URI_SCHEME};
