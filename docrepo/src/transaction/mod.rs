//! Call-scoped transactions.
//!
//! Every mutating repository operation wraps its single store round trip in
//! a [Transaction]: an ephemeral session that commits on success, aborts on
//! any failure, and never outlives the call that created it.

mod transaction;

pub use transaction::*;
