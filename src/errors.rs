//! Error types for impex

use thiserror::Error;

/// Main error type for impex
#[derive(Error, Debug)]
pub enum ImpexError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty cURL command")]
    EmptyCommand,

    #[error("URL not found in cURL command")]
    MissingUrl,

    #[error("Unrecognized environment format")]
    UnrecognizedFormat,

    #[error("Export not supported for format: {0}")]
    ExportUnsupported(String),
}

pub type Result<T> = std::result::Result<T, ImpexError>;
