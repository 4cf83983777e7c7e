//! cURL command import and generation
//!
//! Round-trips HTTP request descriptions to and from shell command strings:
//!
//! - **Import**: tokenize a pasted `curl` invocation and recover the
//!   method, URL, headers, body, auth metadata, and query parameters.
//! - **Generation**: re-serialize a [`crate::models::ParsedRequest`] into a
//!   readable, shell-escaped `curl` command for sharing and debugging.
//!
//! ```
//! use impex::curl::{generate_curl_command, parse_curl_command};
//!
//! let request = parse_curl_command(
//!     "curl -X POST https://api.example.com/users -d '{\"name\":\"John\"}'",
//! ).unwrap();
//! assert_eq!(request.body, "{\"name\":\"John\"}");
//!
//! let command = generate_curl_command(&request);
//! assert!(command.starts_with("curl -X POST"));
//! ```

pub mod generator;
pub mod parser;
pub mod tokenizer;

pub use generator::generate_curl_command;
pub use parser::{
    extract_request, parse_curl_command, parse_curl_commands, suggest_name, BatchParseItem,
};
pub use tokenizer::tokenize;
