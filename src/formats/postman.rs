//! Postman environment format strategy
//!
//! Imports the JSON files Postman produces from "Export Environment":
//! a `name`, a `values` array of key/value entries, and `_postman_*`
//! provenance markers.

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::{ImpexError, Result};
use crate::formats::{scalar_to_string, FormatStrategy};
use crate::models::{EnvironmentRecord, FormatInfo};
use crate::strings::sanitize_identifier;

static INFO: FormatInfo = FormatInfo {
    name: "postman",
    display_name: "Postman Environment",
    file_extensions: &[".json", ".postman_environment.json"],
    mime_types: &["application/json"],
    supports_import: true,
    supports_export: false,
};

const FALLBACK_NAME: &str = "imported_postman_environment";
const FALLBACK_DISPLAY_NAME: &str = "Imported Postman Environment";

pub struct PostmanStrategy;

impl FormatStrategy for PostmanStrategy {
    fn info(&self) -> &'static FormatInfo {
        &INFO
    }

    fn detect(&self, content: &str) -> bool {
        match serde_json::from_str::<Value>(content) {
            Ok(value) => is_postman_environment(&value),
            Err(_) => false,
        }
    }

    /// Confidence ladder: the variable-scope marker is definitive, the
    /// exporter marker nearly so, a bare `values` array a weaker signal.
    fn confidence(&self, content: &str) -> f64 {
        let value = match serde_json::from_str::<Value>(content) {
            Ok(value) => value,
            Err(_) => return 0.0,
        };

        if !is_postman_environment(&value) {
            return 0.0;
        }

        if marker(&value, "_postman_variable_scope") == Some("environment") {
            1.0
        } else if marker(&value, "_postman_exported_using") == Some("Postman") {
            0.9
        } else if value.get("values").is_some_and(Value::is_array) {
            0.8
        } else {
            0.5
        }
    }

    fn parse(&self, content: &str) -> Result<Vec<EnvironmentRecord>> {
        let value: Value = serde_json::from_str(content)?;

        let environments = match value {
            Value::Array(items) => items,
            object @ Value::Object(_) => vec![object],
            _ => {
                return Err(ImpexError::Parse(
                    "expected a Postman environment object or array".to_string(),
                ))
            }
        };

        Ok(environments.iter().map(parse_environment).collect())
    }
}

fn marker<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn is_postman_environment(value: &Value) -> bool {
    value.get("name").is_some_and(Value::is_string)
        && value.get("values").is_some_and(Value::is_array)
        && (marker(value, "_postman_variable_scope") == Some("environment")
            || marker(value, "_postman_exported_using") == Some("Postman"))
}

fn parse_environment(environment: &Value) -> EnvironmentRecord {
    let source_name = environment.get("name").and_then(Value::as_str);

    let mut variables = IndexMap::new();
    if let Some(values) = environment.get("values").and_then(Value::as_array) {
        for entry in values {
            // Included unless explicitly disabled
            if entry.get("enabled") == Some(&Value::Bool(false)) {
                continue;
            }
            let Some(key) = entry.get("key").and_then(Value::as_str) else {
                continue;
            };
            let value = entry
                .get("value")
                .and_then(scalar_to_string)
                .unwrap_or_default();
            variables.insert(key.to_string(), value);
        }
    }

    let slug = sanitize_identifier(source_name.unwrap_or_default());

    EnvironmentRecord {
        id: None,
        name: if slug.is_empty() { FALLBACK_NAME.to_string() } else { slug },
        display_name: source_name.unwrap_or(FALLBACK_DISPLAY_NAME).to_string(),
        variables,
        // Postman has no file-level default-environment concept
        is_default: Some(0),
        last_used: None,
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "Dev",
        "values": [
            {"key": "base_url", "value": "http://x", "enabled": true},
            {"key": "skip", "value": "y", "enabled": false}
        ],
        "_postman_variable_scope": "environment"
    }"#;

    #[test]
    fn test_detect_requires_markers() {
        let strategy = PostmanStrategy;
        assert!(strategy.detect(SAMPLE));
        assert!(strategy.detect(
            r#"{"name": "Dev", "values": [], "_postman_exported_using": "Postman"}"#
        ));

        // Shape without provenance markers is not claimed
        assert!(!strategy.detect(r#"{"name": "Dev", "values": []}"#));
        assert!(!strategy.detect(r#"{"values": [], "_postman_variable_scope": "environment"}"#));
        assert!(!strategy.detect("plain text"));
    }

    #[test]
    fn test_confidence_ladder() {
        let strategy = PostmanStrategy;
        assert_eq!(strategy.confidence(SAMPLE), 1.0);
        assert_eq!(
            strategy.confidence(
                r#"{"name": "Dev", "values": [], "_postman_exported_using": "Postman"}"#
            ),
            0.9
        );
        assert_eq!(strategy.confidence(r#"{"name": "Dev", "values": []}"#), 0.0);
    }

    #[test]
    fn test_parse_sample_environment() {
        let strategy = PostmanStrategy;
        let records = strategy.parse(SAMPLE).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "dev");
        assert_eq!(record.display_name, "Dev");
        assert_eq!(record.is_default, Some(0));
        assert_eq!(record.variables.len(), 1);
        assert_eq!(record.variables.get("base_url").map(String::as_str), Some("http://x"));
        assert!(!record.variables.contains_key("skip"));
    }

    #[test]
    fn test_enabled_defaults_to_included() {
        let strategy = PostmanStrategy;
        let records = strategy
            .parse(
                r#"{
                    "name": "Dev",
                    "values": [
                        {"key": "a", "value": "1"},
                        {"key": "b", "value": "2", "enabled": "nonsense"}
                    ],
                    "_postman_variable_scope": "environment"
                }"#,
            )
            .unwrap();

        assert_eq!(records[0].variables.len(), 2);
    }

    #[test]
    fn test_name_sanitization() {
        let strategy = PostmanStrategy;
        let records = strategy
            .parse(
                r#"{
                    "name": "My Team -- Staging (EU)",
                    "values": [],
                    "_postman_variable_scope": "environment"
                }"#,
            )
            .unwrap();

        assert_eq!(records[0].name, "my_team_staging_eu");
        assert_eq!(records[0].display_name, "My Team -- Staging (EU)");
    }

    #[test]
    fn test_unsanitizable_name_falls_back() {
        let strategy = PostmanStrategy;
        let records = strategy
            .parse(r#"{"name": "!!!", "values": [], "_postman_variable_scope": "environment"}"#)
            .unwrap();

        assert_eq!(records[0].name, FALLBACK_NAME);
        assert_eq!(records[0].display_name, "!!!");
    }

    #[test]
    fn test_parse_array_of_environments() {
        let strategy = PostmanStrategy;
        let records = strategy
            .parse(
                r#"[
                    {"name": "A", "values": [], "_postman_variable_scope": "environment"},
                    {"name": "B", "values": [], "_postman_variable_scope": "environment"}
                ]"#,
            )
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[1].name, "b");
    }

    #[test]
    fn test_export_is_unsupported() {
        let strategy = PostmanStrategy;
        let err = strategy.export(&[]).unwrap_err();
        assert!(matches!(err, ImpexError::ExportUnsupported(_)));
        assert!(!strategy.info().supports_export);
    }
}
