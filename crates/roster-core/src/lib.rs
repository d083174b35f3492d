//! Core types and trait definitions for the Roster friend-management
//! service.
//!
//! This crate is deliberately free of HTTP and database dependencies:
//! domain records, the repository contract, and the business rules only.
//! Storage and transport crates depend on it, never the reverse.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod model;
pub mod resolver;
pub mod store;

pub use error::{Error, Result};
pub use resolver::Resolver;
