//! Native JSON format strategy
//!
//! The application's own storage format: an array (or bare object) of
//! environment records with `name`/`displayName`/`variables` fields.

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::{ImpexError, Result};
use crate::formats::{scalar_to_string, FormatStrategy};
use crate::models::{EnvironmentRecord, FormatInfo};

static INFO: FormatInfo = FormatInfo {
    name: "json",
    display_name: "Native JSON",
    file_extensions: &[".json"],
    mime_types: &["application/json"],
    supports_import: true,
    supports_export: true,
};

pub struct JsonStrategy;

impl FormatStrategy for JsonStrategy {
    fn info(&self) -> &'static FormatInfo {
        &INFO
    }

    fn detect(&self, content: &str) -> bool {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(items)) => items.first().is_some_and(looks_like_environment),
            Ok(value @ Value::Object(_)) => looks_like_environment(&value),
            _ => false,
        }
    }

    fn confidence(&self, content: &str) -> f64 {
        let value = match serde_json::from_str::<Value>(content) {
            Ok(value) => value,
            Err(_) => return 0.0,
        };

        match &value {
            Value::Array(items) => {
                if !items.first().is_some_and(looks_like_environment) {
                    return 0.0;
                }
                if items.iter().all(looks_like_environment) {
                    1.0
                } else {
                    // Partial match: the array mixes conforming and
                    // non-conforming elements
                    0.5
                }
            }
            Value::Object(_) if looks_like_environment(&value) => 1.0,
            _ => 0.0,
        }
    }

    fn parse(&self, content: &str) -> Result<Vec<EnvironmentRecord>> {
        let value: Value = serde_json::from_str(content)?;

        let entries = match value {
            Value::Array(items) => items,
            object @ Value::Object(_) => vec![object],
            _ => {
                return Err(ImpexError::Parse(
                    "expected a JSON object or array of environments".to_string(),
                ))
            }
        };

        Ok(entries.iter().map(normalize_entry).collect())
    }

    fn export(&self, records: &[EnvironmentRecord]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}

/// An entry "looks like an environment" when it carries a string `name` or
/// `displayName` and a `variables` property that is a non-null object.
fn looks_like_environment(value: &Value) -> bool {
    let named = value.get("name").is_some_and(Value::is_string)
        || value.get("displayName").is_some_and(Value::is_string);

    named && value.get("variables").is_some_and(Value::is_object)
}

/// Normalize one source entry, filling gaps: `name` and `displayName` fall
/// back to each other and then to `"Unnamed"`; malformed `variables`
/// degrade to empty; typed optionals pass through only with the expected
/// primitive type.
fn normalize_entry(entry: &Value) -> EnvironmentRecord {
    let name = entry.get("name").and_then(Value::as_str);
    let display_name = entry.get("displayName").and_then(Value::as_str);

    let variables: IndexMap<String, String> = match entry.get("variables").and_then(Value::as_object) {
        Some(map) => map
            .iter()
            .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.clone(), v)))
            .collect(),
        None => IndexMap::new(),
    };

    let is_default = match entry.get("isDefault") {
        Some(value) if value.is_number() => value.as_i64(),
        Some(Value::Bool(flag)) => Some(i64::from(*flag)),
        _ => None,
    };

    EnvironmentRecord {
        id: entry.get("id").and_then(Value::as_i64),
        name: name.or(display_name).unwrap_or("Unnamed").to_string(),
        display_name: display_name.or(name).unwrap_or("Unnamed").to_string(),
        variables,
        is_default,
        last_used: entry.get("lastUsed").and_then(Value::as_str).map(String::from),
        created_at: entry.get("createdAt").and_then(Value::as_str).map(String::from),
    }
}
