//! impex library interface
//!
//! Import/export core for REST-client applications: ingests heterogeneous
//! environment-variable files and round-trips cURL command strings. All
//! operations are synchronous, single-shot transforms over in-memory text;
//! no I/O, no network, no shared mutable state.
//!
//! # Module Organization
//!
//! - [`curl`] - cURL command tokenizing, parsing, and generation
//! - [`formats`] - format strategies, detection scoring, and the registry
//! - [`models`] - shared value objects (records, requests, validation)
//! - [`errors`] - error types (ImpexError, Result)

pub mod curl;
pub mod errors;
pub mod formats;
pub mod models;
pub mod strings;
