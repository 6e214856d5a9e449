//! Query filters and filter providers.
//!
//! A filter is a polymorphic query-predicate capability: caller-defined
//! [FilterProvider] variants translate domain intent into a native query
//! document, and the repository hands that document to the store client
//! untouched. [DefaultFilter] (constructed by [all]) is the only built-in
//! variant.

#[allow(clippy::module_inception)]
mod filter;

pub use filter::*;
