//! cURL command generation
//!
//! The inverse of the parser: re-serializes a [`ParsedRequest`] into a
//! readable, shell-escaped `curl` invocation for sharing and debugging.

use url::Url;

use crate::models::{AuthScheme, HttpMethod, ParsedRequest};

/// Commands short enough to stay on one line regardless of width.
const SINGLE_LINE_MAX_PARTS: usize = 3;

/// Greedy wrap threshold for multi-part commands.
const WRAP_COLUMN: usize = 80;

/// Generate an equivalent curl command from a request description.
///
/// Pure and total: always produces some valid command, even for an empty
/// request.
pub fn generate_curl_command(request: &ParsedRequest) -> String {
    let mut parts: Vec<String> = vec!["curl".to_string()];

    // GET is curl's implicit default; omit it for brevity
    if request.method != HttpMethod::Get {
        parts.push("-X".to_string());
        parts.push(request.method.as_str().to_string());
    }

    parts.push(shell_escape(&build_url(request)));

    // Headers the auth section will emit itself are skipped here so the
    // command carries a single authoritative copy
    let auth_owned_headers = auth_header_names(&request.auth);
    for (name, value) in &request.headers {
        if auth_owned_headers.contains(&name.to_lowercase()) {
            continue;
        }
        parts.push("-H".to_string());
        parts.push(shell_escape(&format!("{}: {}", name, value)));
    }

    match &request.auth {
        AuthScheme::None => {}
        AuthScheme::Bearer { token } => {
            parts.push("-H".to_string());
            parts.push(shell_escape(&format!("Authorization: Bearer {}", token)));
        }
        AuthScheme::Basic { username, password } => {
            parts.push("-u".to_string());
            let credentials = if password.is_empty() {
                username.clone()
            } else {
                format!("{}:{}", username, password)
            };
            parts.push(shell_escape(&credentials));
        }
        AuthScheme::ApiKey { header, key } => {
            parts.push("-H".to_string());
            parts.push(shell_escape(&format!("{}: {}", header, key)));
        }
    }

    if !request.body.trim().is_empty() {
        parts.push("--data-raw".to_string());
        parts.push(shell_escape(&request.body));
    }

    format_command(&parts)
}

/// Rebuild the request URL with enabled query parameters appended.
/// Disabled parameters are dropped.
fn build_url(request: &ParsedRequest) -> String {
    let enabled: Vec<_> = request.query_params.iter().filter(|p| p.enabled).collect();
    if enabled.is_empty() {
        return request.url.clone();
    }

    match Url::parse(&request.url) {
        Ok(mut url) => {
            {
                let mut pairs = url.query_pairs_mut();
                for param in &enabled {
                    pairs.append_pair(&param.key, &param.value);
                }
            }
            url.to_string()
        }
        Err(_) => {
            // Unparseable base: append manually, picking the separator from
            // whether the base already carries a query string
            let mut out = request.url.clone();
            let mut separator = if out.contains('?') { '&' } else { '?' };
            for param in enabled {
                out.push(separator);
                out.push_str(&param.key);
                out.push('=');
                out.push_str(&param.value);
                separator = '&';
            }
            out
        }
    }
}

/// Lowercased names of headers the auth section emits on its own.
fn auth_header_names(auth: &AuthScheme) -> Vec<String> {
    match auth {
        AuthScheme::Bearer { .. } => vec!["authorization".to_string()],
        AuthScheme::ApiKey { header, .. } => vec![header.to_lowercase()],
        AuthScheme::None | AuthScheme::Basic { .. } => Vec::new(),
    }
}

/// Wrap a value in single quotes when it contains characters the shell
/// would interpret; embedded single quotes become `'\''`.
fn shell_escape(value: &str) -> String {
    let needs_escaping = value
        .chars()
        .any(|c| matches!(c, ' ' | '\'' | '"' | '$' | '\\'));

    if !needs_escaping {
        return value.to_string();
    }

    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Join parts into a final command: one line for short commands, otherwise
/// greedy wrapping with ` \` continuations and a two-space indent.
///
/// The wrap decision is made per appended token, not per flag/value pair, so
/// a flag and its value may land on different lines when the threshold falls
/// between them.
fn format_command(parts: &[String]) -> String {
    if parts.len() <= SINGLE_LINE_MAX_PARTS {
        return parts.join(" ");
    }

    let mut lines: Vec<String> = Vec::new();
    let mut line = parts[0].clone();

    for part in &parts[1..] {
        if line.len() + 1 + part.len() > WRAP_COLUMN {
            lines.push(line);
            line = format!("  {}", part);
        } else {
            line.push(' ');
            line.push_str(part);
        }
    }
    lines.push(line);

    lines.join(" \\\n")
}
