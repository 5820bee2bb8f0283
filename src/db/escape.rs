//! String escaping utilities for CozoDB literals.

/// Escape a string for use in CozoDB double-quoted string literals (JSON-compatible)
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result
}

/// Render an optional string as a Cozo literal, `null` when absent.
pub fn string_literal(value: Option<&str>) -> String {
    match value {
        Some(s) => format!("\"{}\"", escape_string(s)),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_escape_string_basic() {
        assert_eq!(escape_string("hello"), "hello");
    }

    #[rstest]
    fn test_escape_string_keeps_cjk() {
        assert_eq!(escape_string("赵雷"), "赵雷");
    }

    #[rstest]
    fn test_escape_string_with_quotes() {
        assert_eq!(escape_string(r#"say "hello""#), r#"say \"hello\""#);
    }

    #[rstest]
    fn test_escape_string_with_backslash() {
        assert_eq!(escape_string(r"a\b"), r"a\\b");
    }

    #[rstest]
    fn test_escape_control_char() {
        assert_eq!(escape_string("a\u{1}b"), "a\\u0001b");
    }

    #[rstest]
    #[case(Some("02"), "\"02\"")]
    #[case(None, "null")]
    fn test_string_literal(#[case] value: Option<&str>, #[case] expected: &str) {
        assert_eq!(string_literal(value), expected);
    }
}
