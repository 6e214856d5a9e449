//! Partial-update capabilities.
//!
//! A partial update is the mutation-side counterpart of a filter:
//! caller-defined [UpdateProvider] variants translate domain intent into a
//! native field-mutation document that the store applies atomically to
//! exactly one document.

mod update;

pub use update::*;
