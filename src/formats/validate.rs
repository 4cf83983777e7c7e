//! Shared structural validation for imported environment records
//!
//! Every strategy inherits this behavior unless it overrides
//! [`crate::formats::FormatStrategy::validate`]. Validation only reports;
//! it never mutates the records.

use crate::models::{EnvironmentRecord, ValidationResult};

/// Default validator: blocking errors for empty names, non-blocking
/// warnings for empty variable keys. Messages carry the 1-based record
/// position.
pub fn validate_records(records: &[EnvironmentRecord]) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (i, record) in records.iter().enumerate() {
        let position = i + 1;

        if record.name.trim().is_empty() {
            result
                .errors
                .push(format!("Environment {}: name is empty", position));
        }

        if record.display_name.trim().is_empty() {
            result
                .errors
                .push(format!("Environment {}: display name is empty", position));
        }

        for key in record.variables.keys() {
            if key.trim().is_empty() {
                result
                    .warnings
                    .push(format!("Environment {}: variable with empty key", position));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_records_pass() {
        let mut record = EnvironmentRecord::new("dev", "Development");
        record.variables.insert("HOST".to_string(), "localhost".to_string());

        let result = validate_records(&[record]);
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_names_are_errors() {
        let records = vec![
            EnvironmentRecord::new("", "Development"),
            EnvironmentRecord::new("dev", "   "),
        ];

        let result = validate_records(&records);
        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("Environment 1"));
        assert!(result.errors[1].contains("Environment 2"));
    }

    #[test]
    fn test_empty_variable_key_is_warning_only() {
        let mut record = EnvironmentRecord::new("dev", "Development");
        record.variables.insert(" ".to_string(), "value".to_string());

        let result = validate_records(&[record]);
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_validity_matches_error_count() {
        // Totality: is_valid is exactly "no errors", for any input
        let cases = vec![
            vec![],
            vec![EnvironmentRecord::new("a", "A")],
            vec![EnvironmentRecord::new("", "")],
        ];
        for records in cases {
            let result = validate_records(&records);
            assert_eq!(result.is_valid(), result.errors.is_empty());
        }
    }
}
