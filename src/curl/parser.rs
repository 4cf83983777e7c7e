//! cURL command parsing
//!
//! Walks tokenized `curl` arguments and recovers a [`ParsedRequest`]:
//! method, URL, headers, body, auth metadata, and query parameters.

use indexmap::IndexMap;
use url::Url;

use crate::curl::tokenizer::tokenize;
use crate::errors::{ImpexError, Result};
use crate::models::{AuthScheme, HttpMethod, ParsedRequest, QueryParam};

/// Header names recognized as API-key carriers, checked in this order
/// against the exact spelling used in the command.
const API_KEY_HEADERS: [&str; 5] = ["X-API-Key", "X-Api-Key", "API-Key", "apikey", "x-api-key"];

/// Parse a raw cURL command string into a [`ParsedRequest`].
pub fn parse_curl_command(command: &str) -> Result<ParsedRequest> {
    extract_request(&tokenize(command))
}

/// One entry of a batch parse: the 1-based input position plus either the
/// parsed request or a human-readable failure message embedding that
/// position.
#[derive(Debug, Clone)]
pub struct BatchParseItem {
    pub index: usize,
    pub result: std::result::Result<ParsedRequest, String>,
}

/// Parse a list of raw cURL commands. Inputs are isolated: one bad command
/// never prevents the others from parsing.
pub fn parse_curl_commands<S: AsRef<str>>(commands: &[S]) -> Vec<BatchParseItem> {
    commands
        .iter()
        .enumerate()
        .map(|(i, command)| {
            let index = i + 1;
            let result = parse_curl_command(command.as_ref())
                .map_err(|e| format!("Command {}: {}", index, e));
            if let Err(ref message) = result {
                tracing::debug!(index, %message, "batch cURL parse failed");
            }
            BatchParseItem { index, result }
        })
        .collect()
}

/// Extract a [`ParsedRequest`] from tokenized cURL arguments.
///
/// Each extraction step scans the full token list independently, so flag
/// order in the source command is irrelevant except for flag/value
/// adjacency.
pub fn extract_request(tokens: &[String]) -> Result<ParsedRequest> {
    if tokens.is_empty() {
        return Err(ImpexError::EmptyCommand);
    }

    // Skip a leading "curl" token if present
    let tokens = if tokens[0].eq_ignore_ascii_case("curl") {
        &tokens[1..]
    } else {
        tokens
    };

    let method = extract_method(tokens);
    let raw_url = extract_url(tokens).ok_or(ImpexError::MissingUrl)?;
    let headers = extract_headers(tokens);
    let body = extract_body(tokens).unwrap_or_default();
    let auth = extract_auth(tokens, &headers);
    let (url, query_params) = split_query(&raw_url);

    Ok(ParsedRequest {
        method,
        url,
        headers,
        body,
        query_params,
        auth,
    })
}

fn extract_method(tokens: &[String]) -> HttpMethod {
    for (i, token) in tokens.iter().enumerate() {
        if token == "-X" || token == "--request" {
            if let Some(value) = tokens.get(i + 1) {
                if let Some(method) = HttpMethod::from_token(value) {
                    return method;
                }
            }
        }
    }
    HttpMethod::Get
}

fn extract_url(tokens: &[String]) -> Option<String> {
    // Explicit --url wins over positional detection
    for (i, token) in tokens.iter().enumerate() {
        if token == "--url" {
            if let Some(value) = tokens.get(i + 1) {
                return Some(value.clone());
            }
        }
    }

    tokens
        .iter()
        .find(|t| !t.starts_with('-') && (t.starts_with("http://") || t.starts_with("https://")))
        .cloned()
}

fn extract_headers(tokens: &[String]) -> IndexMap<String, String> {
    let mut headers = IndexMap::new();

    for (i, token) in tokens.iter().enumerate() {
        if token == "-H" || token == "--header" {
            if let Some(value) = tokens.get(i + 1) {
                if let Some(colon) = value.find(':') {
                    let name = value[..colon].trim();
                    let val = value[colon + 1..].trim();
                    // Map semantics: a later duplicate name overwrites
                    headers.insert(name.to_string(), val.to_string());
                }
            }
        }
    }

    headers
}

/// Locate the request body. Only one data source is honored even if several
/// are present; the forms are checked in precedence order, each with its own
/// scan of the full token list.
fn extract_body(tokens: &[String]) -> Option<String> {
    for (i, token) in tokens.iter().enumerate() {
        if token == "-d" || token == "--data" || token == "--data-raw" {
            if let Some(value) = tokens.get(i + 1) {
                return Some(value.clone());
            }
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if token == "--data-binary" {
            if let Some(value) = tokens.get(i + 1) {
                return Some(value.clone());
            }
        }
    }

    for token in tokens {
        if let Some(value) = token.strip_prefix("--data=") {
            return Some(value.to_string());
        }
    }

    // Attached short form: -dVALUE with no separating space
    for token in tokens {
        if token.len() > 2 && !token.starts_with("--") {
            if let Some(value) = token.strip_prefix("-d") {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Derive auth metadata; the first matching rule wins. A matched header is
/// left in the header map — the generator deduplicates on output.
fn extract_auth(tokens: &[String], headers: &IndexMap<String, String>) -> AuthScheme {
    for (name, value) in headers {
        if name.eq_ignore_ascii_case("Authorization") {
            if let Some(prefix) = value.get(..7) {
                if prefix.eq_ignore_ascii_case("Bearer ") {
                    return AuthScheme::Bearer {
                        token: value[7..].trim().to_string(),
                    };
                }
            }
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        if token == "-u" || token == "--user" {
            if let Some(value) = tokens.get(i + 1) {
                return match value.find(':') {
                    Some(colon) => AuthScheme::Basic {
                        username: value[..colon].to_string(),
                        password: value[colon + 1..].to_string(),
                    },
                    None => AuthScheme::Basic {
                        username: value.clone(),
                        password: String::new(),
                    },
                };
            }
        }
    }

    for candidate in API_KEY_HEADERS {
        if let Some(value) = headers.get(candidate) {
            return AuthScheme::ApiKey {
                header: candidate.to_string(),
                key: value.clone(),
            };
        }
    }

    AuthScheme::None
}

/// Split the query string off a URL into `QueryParam` entries.
///
/// Falls back to a bare substring cut at the first `?` when the URL does
/// not parse; parameters are lost in that case.
fn split_query(raw_url: &str) -> (String, Vec<QueryParam>) {
    match Url::parse(raw_url) {
        Ok(parsed) => {
            let params: Vec<QueryParam> = parsed
                .query_pairs()
                .map(|(k, v)| QueryParam::new(k.into_owned(), v.into_owned()))
                .collect();

            let mut stripped = parsed;
            stripped.set_query(None);
            stripped.set_fragment(None);
            (stripped.to_string(), params)
        }
        Err(_) => {
            let base = match raw_url.find('?') {
                Some(pos) => &raw_url[..pos],
                None => raw_url,
            };
            (base.to_string(), Vec::new())
        }
    }
}

/// Suggest a display name for a parsed request: `"{METHOD} {last path
/// segment}"`, falling back to `"{METHOD} Request"`.
pub fn suggest_name(request: &ParsedRequest) -> String {
    let segment = Url::parse(&request.url).ok().and_then(|url| {
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(String::from))
    });

    match segment {
        Some(segment) => format!("{} {}", request.method, segment),
        None => format!("{} Request", request.method),
    }
}
