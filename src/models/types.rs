//! Core data structures for environment import/export and cURL round-tripping

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A normalized environment: a named bundle of key/value variables.
///
/// Field names follow the JSON wire format used by the surrounding
/// application (`displayName`, `isDefault`, ...), so a serialized record is
/// directly re-importable by the native JSON strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    /// Persisted row id; present only when round-tripping stored data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Internal identifier. Must be non-empty after trimming.
    pub name: String,

    /// Human-readable label. Must be non-empty after trimming.
    #[serde(rename = "displayName")]
    pub display_name: String,

    /// Variable key/value pairs, insertion-ordered. Within one record a key
    /// denotes one value; duplicate keys in source data are last-write-wins.
    #[serde(default)]
    pub variables: IndexMap<String, String>,

    /// 0/1 flag matching persisted-entity conventions. `None` means
    /// "unspecified", not "false".
    #[serde(rename = "isDefault", default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<i64>,

    /// ISO-8601 timestamp, passthrough only. Never generated or checked here.
    #[serde(rename = "lastUsed", default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,

    /// ISO-8601 timestamp, passthrough only.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl EnvironmentRecord {
    /// Create a record with just a name and display name.
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            display_name: display_name.into(),
            variables: IndexMap::new(),
            is_default: None,
            last_used: None,
            created_at: None,
        }
    }
}

/// Static descriptor for a registered import strategy.
///
/// Constructed once per strategy and handed to UI code for populating
/// file-type pickers. Metadata only, no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Machine id (e.g. `"json"`).
    pub name: &'static str,
    /// UI label (e.g. `"Native JSON"`).
    pub display_name: &'static str,
    /// File extensions this format is typically stored under.
    pub file_extensions: &'static [&'static str],
    /// MIME types this format is typically served as.
    pub mime_types: &'static [&'static str],
    pub supports_import: bool,
    pub supports_export: bool,
}

/// Outcome of structural validation. Never thrown; always returned as data
/// so the caller can block on errors while still surfacing warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// Blocking problems.
    pub errors: Vec<String>,
    /// Non-blocking problems (e.g. an empty variable key).
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// True iff there are no blocking errors. Warnings never affect validity.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// HTTP request method. Defaults to GET when a cURL command names none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Match a token against the known verbs, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One query-string pair. `enabled` lets UI code toggle parameters without
/// deleting them; the generator drops disabled entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl QueryParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// Authentication metadata extracted from a cURL command.
///
/// A tagged variant rather than an optional-field struct, so a bearer token
/// can never coexist with a basic-auth username.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthScheme {
    #[default]
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    ApiKey {
        /// Header name as written in the source command.
        header: String,
        key: String,
    },
}

/// A normalized HTTP request description, the cURL-domain counterpart of
/// [`EnvironmentRecord`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedRequest {
    pub method: HttpMethod,
    /// Request URL with the query string stripped into `query_params`.
    pub url: String,
    /// Header name/value pairs, insertion-ordered, case preserved as written.
    pub headers: IndexMap<String, String>,
    /// Request body; empty string if none.
    pub body: String,
    pub query_params: Vec<QueryParam>,
    pub auth: AuthScheme,
}
