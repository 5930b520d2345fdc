// Token normalization applied before every scorer call.
//
// The per-locale models were trained on ASCII letters, digits, whitespace and
// `@` only. Anything else is stripped so scorers never see characters outside
// their training alphabet.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Everything outside the trained alphabet. Whitespace is the ASCII set
/// (space, tab, LF, VT, FF, CR).
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9@ \t\n\x0B\x0C\r]").expect("static pattern compiles")
});

/// Strip every character outside the trained alphabet, keeping the order and
/// multiplicity of the characters that remain.
pub fn normalize(raw: &str) -> String {
    DISALLOWED.replace_all(raw, "").into_owned()
}

/// Whether `c` survives normalization.
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '@' | ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize("f@@!"), "f@@");
        assert_eq!(normalize("he-llo, world."), "hello world");
    }

    #[test]
    fn test_keeps_digits_and_at() {
        assert_eq!(normalize("sh1t@home"), "sh1t@home");
    }

    #[test]
    fn test_strips_non_ascii_letters() {
        assert_eq!(normalize("caña"), "caa");
        assert_eq!(normalize("привет"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_keeps_ascii_whitespace() {
        assert_eq!(normalize("a b\tc"), "a b\tc");
    }

    #[test]
    fn test_is_allowed_matches_pattern() {
        for c in ['a', 'Z', '0', '@', ' ', '\t'] {
            assert!(is_allowed(c), "{c:?} should be allowed");
        }
        for c in ['!', '-', 'ñ', '\u{00A0}', '_'] {
            assert!(!is_allowed(c), "{c:?} should be stripped");
        }
    }
}
