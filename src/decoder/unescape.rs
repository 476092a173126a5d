//! Backslash-unescape pass for exports saved as one quoted JSON string.
//!
//! Some tools dump a chat export through a second JSON encoder, so the file
//! holds `"[{\"author\": \"ana\", ...}]"` instead of the array itself. The
//! decoder strips the outer quotes and runs [`unescape`] once before parsing.

/// Returns `true` if `text` is wrapped in a pair of double quotes.
pub fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

/// Interprets backslash escapes in `input`.
///
/// Supported: `\n \t \r \b \f \" \' \\ \/`, `\xHH`, `\uXXXX` (surrogate pairs
/// are combined), `\UXXXXXXXX`. Unknown or truncated escapes are kept
/// verbatim, backslash included. Lone surrogates become U+FFFD.
///
/// # Example
///
/// ```
/// use chatview::decoder::unescape;
///
/// assert_eq!(unescape(r#"{\"a\": \"b\\nc\"}"#), r#"{"a": "b\nc"}"#);
/// assert_eq!(unescape("\\u00e9\\ud83d\\ude00"), "é😀");
/// ```
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        let Some(escape) = rest.chars().next() else {
            out.push('\\');
            break;
        };
        rest = &rest[escape.len_utf8()..];

        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '"' | '\'' | '\\' | '/' => out.push(escape),
            'x' => match hex_prefix(rest, 2) {
                Some(code) => {
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    rest = &rest[2..];
                }
                None => out.push_str("\\x"),
            },
            'u' => match hex_prefix(rest, 4) {
                Some(high) => {
                    rest = &rest[4..];
                    if (0xD800..0xDC00).contains(&high) {
                        let low = rest
                            .strip_prefix("\\u")
                            .and_then(|r| hex_prefix(r, 4))
                            .filter(|low| (0xDC00..0xE000).contains(low));
                        if let Some(low) = low {
                            rest = &rest[6..];
                            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                            continue;
                        }
                    }
                    out.push(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => out.push_str("\\u"),
            },
            'U' => match hex_prefix(rest, 8) {
                Some(code) => {
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    rest = &rest[8..];
                }
                None => out.push_str("\\U"),
            },
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parses exactly `len` leading hex digits of `s`.
fn hex_prefix(s: &str, len: usize) -> Option<u32> {
    let digits = s.get(..len)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quoted() {
        assert!(is_quoted(r#""{}""#));
        assert!(is_quoted(r#""""#));
        assert!(!is_quoted(r#"""#));
        assert!(!is_quoted("{}"));
        assert!(!is_quoted(r#""{}"#));
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(unescape(r#"a\nb\tc\"d\\e\/f\'g"#), "a\nb\tc\"d\\e/f'g");
        assert_eq!(unescape(r"\r\b\f"), "\r\u{8}\u{c}");
    }

    #[test]
    fn test_no_escapes_is_identity() {
        assert_eq!(unescape("plain text, привет"), "plain text, привет");
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(unescape("\\u0041\\u00e9"), "Aé");
        assert_eq!(unescape("\\ud83d\\udc4d"), "👍");
        assert_eq!(unescape(r"\U0001F389"), "🎉");
        assert_eq!(unescape(r"\x41"), "A");
    }

    #[test]
    fn test_lone_surrogate_is_replaced() {
        assert_eq!(unescape(r"\ud83dx"), "\u{FFFD}x");
    }

    #[test]
    fn test_unknown_and_truncated_escapes_are_kept() {
        assert_eq!(unescape(r"\q"), r"\q");
        assert_eq!(unescape(r"\u12"), r"\u12");
        assert_eq!(unescape(r"\xZ1"), r"\xZ1");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_double_escaped_json() {
        let inner = unescape(r#"{\"content\": \"line1\\nline2\"}"#);
        assert_eq!(inner, r#"{"content": "line1\nline2"}"#);
        let value: serde_json::Value = serde_json::from_str(&inner).unwrap();
        assert_eq!(value["content"], "line1\nline2");
    }
}
