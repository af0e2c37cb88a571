//! Value escaping.
//!
//! A plain value is written after `=` with every reserved character
//! backslash-escaped. Values the parser would trim or cut at a line break
//! are written between double quotes instead, where only `"` and `\` need
//! escaping.

use std::borrow::Cow;

use incar_parse::escape::is_reserved;

/// Whether `value` has to be written as a quoted value.
///
/// That is the case for empty values, values spanning several lines, and
/// values with leading or trailing whitespace.
pub fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.contains('\n')
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
}

/// Escape a plain (unquoted) value.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    escape_with(value, is_reserved)
}

/// Escape the content of a quoted value (without the surrounding quotes).
pub fn escape_quoted(value: &str) -> Cow<'_, str> {
    escape_with(value, |c| c == '"' || c == '\\')
}

fn escape_with(value: &str, needs_escape: impl Fn(char) -> bool) -> Cow<'_, str> {
    if !value.chars().any(&needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut result = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if needs_escape(c) {
            result.push('\\');
        }
        result.push(c);
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_needs_quotes() {
        assert!(!needs_quotes("520"));
        assert!(!needs_quotes("2*1.0 2*-1.0"));
        assert!(needs_quotes(""));
        assert!(needs_quotes(" leading"));
        assert!(needs_quotes("trailing\t"));
        assert!(needs_quotes("two\nlines"));
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("Fast"), "Fast");
        assert_eq!(escape_value("a = b; c # d ! e"), r"a \= b\; c \# d \! e");
        assert_eq!(escape_value(r#"{"x"}\"#), r#"\{\"x\"\}\\"#);
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape_quoted("a ; b # c"), "a ; b # c");
        assert_eq!(escape_quoted(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
    }

    #[test]
    fn test_escapes_resolve_back() {
        let cases = ["plain", "a = b", r"back\slash", r#"{"quoted"}"#, "#!;"];
        for case in cases {
            let escaped = escape_value(case);
            assert_eq!(
                incar_parse::escape::resolve(&escaped),
                case,
                "escape/resolve mismatch for {case:?}"
            );
        }
    }
}
