//! # docrepo - Typed document repositories
//!
//! `docrepo` is a generic document-repository abstraction: it binds any
//! document-shaped type to a named collection in a document-oriented store
//! and provides typed create/read/update/delete and filtered-query
//! operations without hand-written query translation per type.
//!
//! ## Key features
//!
//! - **Typed repositories**: `Repository<T>` works with strongly-typed
//!   entities; conversion to and from document form goes through the
//!   [repository::Convertible] trait
//! - **Delegated translation**: query and mutation semantics live entirely
//!   in caller-supplied [filter::FilterProvider] and
//!   [update::UpdateProvider] capabilities
//! - **Call-scoped transactions**: every write runs in a dedicated
//!   transaction that commits on success, aborts on failure, and always
//!   releases its session
//! - **Pluggable backends**: all store access goes through the provider
//!   traits in [store]; an in-memory reference backend ships in
//!   [store::memory]
//! - **Per-call cancellation**: every operation takes a
//!   [common::CancelToken] with optional deadline
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use docrepo::common::CancelToken;
//! use docrepo::repository::{FilterOptions, Repository};
//! use docrepo::store::{InMemoryClient, StoreConfig};
//!
//! # fn main() -> docrepo::errors::RepoResult<()> {
//! let client = InMemoryClient::connect(&StoreConfig::new("memory://app"))?;
//! let repo: Repository<Person> = Repository::new(client, "app");
//!
//! let ctx = CancelToken::none();
//! let id = repo.create(&Person { name: "Jon Snow".into() }, &ctx)?;
//!
//! let person = repo.get(&id, &ctx)?;
//! let everyone = repo.filter(None, &FilterOptions::new(), &ctx)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design pattern
//!
//! Public handles (`Filter`, `PartialUpdate`, `StoreClient`,
//! `StoreCollection`, `StoreSession`) wrap their provider trait objects
//! behind `Arc`, so handles are cheap to clone, safe to share across
//! threads, and stable against backend changes.
//!
//! ## Module organization
//!
//! - [`common`] - Values, sort order, cancellation tokens
//! - [`document`] - Documents and store-native identifiers
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and filter providers
//! - [`repository`] - Typed repositories
//! - [`store`] - Store client contract and backends
//! - [`transaction`] - Call-scoped transactions
//! - [`update`] - Partial-update capabilities

pub mod common;
pub mod document;
pub mod errors;
pub mod filter;
pub mod repository;
pub mod store;
pub mod transaction;
pub mod update;
