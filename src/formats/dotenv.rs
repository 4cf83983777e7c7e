//! Dotenv (.env) format strategy
//!
//! Line-oriented `KEY=VALUE` text, one variable per non-blank non-comment
//! line. Values may be single-quoted (literal), double-quoted (escape
//! sequences processed), or bare (trailing `#` comment stripped).

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ImpexError, Result};
use crate::formats::FormatStrategy;
use crate::models::{EnvironmentRecord, FormatInfo};

static INFO: FormatInfo = FormatInfo {
    name: "dotenv",
    display_name: "Dotenv (.env)",
    file_extensions: &[".env"],
    mime_types: &["text/plain"],
    supports_import: true,
    supports_export: true,
};

/// `KEY=` head shape used for detection scoring
static KEY_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\s*=").expect("Invalid dotenv key regex")
});

/// The core receives content only, never a filename, so the single record a
/// .env file produces gets a generated name; callers rename as needed.
const GENERATED_NAME: &str = "imported_env";
const GENERATED_DISPLAY_NAME: &str = "Imported Env File";

pub struct DotenvStrategy;

impl FormatStrategy for DotenvStrategy {
    fn info(&self) -> &'static FormatInfo {
        &INFO
    }

    fn detect(&self, content: &str) -> bool {
        let (candidates, matched) = line_stats(content);
        candidates > 0 && matched * 2 >= candidates
    }

    /// Confidence is the fraction of candidate lines matching the
    /// `KEY=VALUE` shape.
    fn confidence(&self, content: &str) -> f64 {
        let (candidates, matched) = line_stats(content);
        if candidates == 0 {
            return 0.0;
        }
        matched as f64 / candidates as f64
    }

    fn parse(&self, content: &str) -> Result<Vec<EnvironmentRecord>> {
        let mut variables = IndexMap::new();

        for (line_num, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_env_line(line) {
                Some((key, value)) => {
                    // Duplicate keys are last-write-wins
                    variables.insert(key, value);
                }
                None => {
                    return Err(ImpexError::Parse(format!(
                        "Invalid .env syntax at line {}: {}",
                        line_num + 1,
                        line
                    )));
                }
            }
        }

        let mut record = EnvironmentRecord::new(GENERATED_NAME, GENERATED_DISPLAY_NAME);
        record.variables = variables;
        Ok(vec![record])
    }

    fn export(&self, records: &[EnvironmentRecord]) -> Result<String> {
        // A .env file holds exactly one environment
        let record = match records {
            [record] => record,
            _ => {
                return Err(ImpexError::Parse(format!(
                    "dotenv export expects exactly one environment, got {}",
                    records.len()
                )))
            }
        };

        let mut out = String::new();
        for (key, value) in &record.variables {
            out.push_str(key);
            out.push('=');
            out.push_str(&format_env_value(value));
            out.push('\n');
        }
        Ok(out)
    }
}

/// Count non-blank non-comment lines and how many of them carry the
/// `KEY=` shape.
fn line_stats(content: &str) -> (usize, usize) {
    let mut candidates = 0;
    let mut matched = 0;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        candidates += 1;
        if KEY_LINE_RE.is_match(line) {
            matched += 1;
        }
    }

    (candidates, matched)
}

/// Parse a single `KEY=value` line. Returns `None` for lines with no `=`
/// or an empty key.
fn parse_env_line(line: &str) -> Option<(String, String)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();

    if key.is_empty() {
        return None;
    }

    let value_part = line[eq_pos + 1..].trim();

    let value = if let Some(inner) = quoted_inner(value_part, '"') {
        unescape_double_quoted(inner)
    } else if let Some(inner) = quoted_inner(value_part, '\'') {
        inner.to_string()
    } else {
        // Bare value: stop at an inline comment
        match value_part.find('#') {
            Some(pos) => value_part[..pos].trim().to_string(),
            None => value_part.to_string(),
        }
    };

    Some((key.to_string(), value))
}

/// The content between a pair of `quote` characters wrapping the whole
/// value, if present.
fn quoted_inner(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Process escape sequences inside a double-quoted value.
fn unescape_double_quoted(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('$') => result.push('$'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Serialize a variable value for a .env line, double-quoting when the bare
/// form would not survive a re-parse.
fn format_env_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '\\'));

    if !needs_quotes {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\n' => out.push_str(r"\n"),
            '\t' => out.push_str(r"\t"),
            '\r' => out.push_str(r"\r"),
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_vars(content: &str) -> IndexMap<String, String> {
        DotenvStrategy.parse(content).unwrap().remove(0).variables
    }

    #[test]
    fn test_parse_simple() {
        let vars = parse_vars("KEY=value");
        assert_eq!(vars.get("KEY").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_parse_quoted_values() {
        let vars = parse_vars("A=\"hello world\"\nB='single quoted'");
        assert_eq!(vars.get("A").map(String::as_str), Some("hello world"));
        assert_eq!(vars.get("B").map(String::as_str), Some("single quoted"));
    }

    #[test]
    fn test_parse_escape_sequences() {
        let vars = parse_vars(r#"KEY="line1\nline2""#);
        assert_eq!(vars.get("KEY").map(String::as_str), Some("line1\nline2"));
    }

    #[test]
    fn test_single_quotes_are_literal() {
        let vars = parse_vars(r"KEY='a\nb'");
        assert_eq!(vars.get("KEY").map(String::as_str), Some(r"a\nb"));
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let content = "\n# leading comment\nKEY=value # inline\n\nOTHER=x\n";
        let vars = parse_vars(content);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("KEY").map(String::as_str), Some("value"));
        assert_eq!(vars.get("OTHER").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_empty_value_and_duplicates() {
        let vars = parse_vars("KEY=\nKEY=second");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_invalid_line_reports_position() {
        let err = DotenvStrategy.parse("GOOD=1\nnot a variable line\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "got: {}", message);
    }

    #[test]
    fn test_record_identity() {
        let records = DotenvStrategy.parse("A=1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, GENERATED_NAME);
        assert_eq!(records[0].display_name, GENERATED_DISPLAY_NAME);
        assert_eq!(records[0].is_default, None);
    }

    #[test]
    fn test_detect_and_confidence() {
        let strategy = DotenvStrategy;
        assert!(strategy.detect("A=1\nB=2\n# comment\n"));
        assert_eq!(strategy.confidence("A=1\nB=2\n"), 1.0);

        // Half the candidate lines match
        assert!(strategy.detect("A=1\nrandom prose\n"));
        assert_eq!(strategy.confidence("A=1\nrandom prose\n"), 0.5);

        assert!(!strategy.detect("just\nsome\nprose"));
        assert_eq!(strategy.confidence(""), 0.0);
        assert_eq!(strategy.confidence("# only comments\n"), 0.0);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let strategy = DotenvStrategy;
        let content = "A=1\nweird line\nB=2\n";
        assert_eq!(strategy.confidence(content), strategy.confidence(content));
    }

    #[test]
    fn test_export_round_trip() {
        let strategy = DotenvStrategy;
        let mut record = EnvironmentRecord::new(GENERATED_NAME, GENERATED_DISPLAY_NAME);
        record.variables.insert("PLAIN".to_string(), "value".to_string());
        record.variables.insert("SPACED".to_string(), "two words".to_string());
        record.variables.insert("MULTILINE".to_string(), "a\nb".to_string());

        let exported = strategy.export(&[record.clone()]).unwrap();
        let reparsed = strategy.parse(&exported).unwrap();

        assert_eq!(reparsed[0].variables, record.variables);
    }

    #[test]
    fn test_export_requires_single_record() {
        let strategy = DotenvStrategy;
        let a = EnvironmentRecord::new("a", "A");
        let b = EnvironmentRecord::new("b", "B");
        assert!(strategy.export(&[a, b]).is_err());
        assert!(strategy.export(&[]).is_err());
    }
}
