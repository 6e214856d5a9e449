//! In-memory store backend.
//!
//! A process-local implementation of the store client contract, used as the
//! reference backend and the host of the integration test-suite.

mod client;
mod collection;
mod session;

pub use client::*;
