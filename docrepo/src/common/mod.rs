//! Common types shared across the crate.

mod context;
mod sort_order;
mod value;

pub use context::*;
pub use sort_order::*;
pub use value::*;
