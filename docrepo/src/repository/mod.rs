//! Typed repositories for document persistence.
//!
//! A [Repository] binds one entity type to one collection and exposes
//! typed CRUD plus filtered queries. It never interprets document field
//! values itself: filters and partial updates translate caller intent into
//! native query/mutation documents, and [Convertible] moves entities in and
//! out of document form.
//!
//! # Creating repositories
//!
//! ```rust,ignore
//! use docrepo::repository::{Convertible, Entity, Repository};
//! use docrepo::store::{InMemoryClient, StoreConfig};
//!
//! struct Person { name: String }
//!
//! impl Entity for Person {}
//! impl Convertible for Person { /* to_document / from_document */ }
//!
//! let client = InMemoryClient::connect(&StoreConfig::new("memory://app"))?;
//!
//! // Bound to the "Person" collection by default
//! let repo: Repository<Person> = Repository::new(client.clone(), "app");
//!
//! // Or bound to an explicitly named collection
//! let repo: Repository<Person> = Repository::with_collection(client, "app", "people");
//! ```

mod entity;
mod options;
#[allow(clippy::module_inception)]
mod repository;

pub use entity::*;
pub use options::*;
pub use repository::*;
