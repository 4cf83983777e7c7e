//! Shell-argument tokenizer for cURL commands
//!
//! Splits a single, already-isolated `curl` invocation into argument tokens.
//! This is argument splitting only: no shell operators, no variable
//! expansion, no globbing.

/// Tokenize a command string, honoring single/double quoting and backslash
/// escapes.
///
/// A quote character only closes a region it opened; the other quote
/// character is literal inside. Backslash escapes the next character
/// unconditionally, even inside quotes. Runs of whitespace never emit empty
/// tokens, and a trailing partial token (including an unterminated quoted
/// region) is flushed at end of input.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;

    for c in command.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        match c {
            '\\' => {
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            c if c.is_whitespace() && !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
