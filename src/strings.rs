//! String utilities

/// Sanitize a free-form label into an internal identifier slug.
///
/// Lowercases, replaces every character outside `[a-z0-9_]` with `_`,
/// collapses runs of underscores, and strips leading/trailing underscores.
/// May return an empty string; callers supply their own fallback.
pub fn sanitize_identifier(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_was_underscore = false;

    for c in label.chars() {
        let mapped = match c.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9' | '_') => c,
            _ => '_',
        };
        if mapped == '_' {
            if !last_was_underscore {
                out.push('_');
            }
            last_was_underscore = true;
        } else {
            out.push(mapped);
            last_was_underscore = false;
        }
    }

    out.trim_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize_identifier("Dev"), "dev");
        assert_eq!(sanitize_identifier("My Environment"), "my_environment");
        assert_eq!(sanitize_identifier("prod-us-east-1"), "prod_us_east_1");
    }

    #[test]
    fn test_sanitize_collapses_and_trims() {
        assert_eq!(sanitize_identifier("  A -- B  "), "a_b");
        assert_eq!(sanitize_identifier("___x___"), "x");
    }

    #[test]
    fn test_sanitize_can_be_empty() {
        assert_eq!(sanitize_identifier(""), "");
        assert_eq!(sanitize_identifier("!!!"), "");
        assert_eq!(sanitize_identifier("日本語"), "");
    }
}
