//! Shared value objects
//!
//! Everything here is a plain value created fresh per parse call and handed
//! to the caller. The core holds no state beyond the read-only strategy
//! registry in [`crate::formats`].

pub mod types;

pub use types::{
    AuthScheme, EnvironmentRecord, FormatInfo, HttpMethod, ParsedRequest, QueryParam,
    ValidationResult,
};
