//! Percent-encoding for query-string fragments.
//!
//! PostgREST uses `,`, `.`, `(` and `)` as structural delimiters inside
//! filter values (`in.(a,b)`, `and=(a.eq.1,b.eq.2)`). Every caller-supplied
//! column name and value is passed through [`escape`] before it is placed
//! next to those delimiters, so only the structure emitted by the predicate
//! algebra itself is ever left unescaped.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Bytes encoded by [`escape`]: everything except ASCII alphanumerics and
/// the unreserved marks `-`, `_` and `~`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Percent-encode a string for use as a query-string key or value.
///
/// ```rust
/// use prest_query::escape;
///
/// assert_eq!(escape("plain"), "plain");
/// assert_eq!(escape("a,b.c(d)"), "a%2Cb%2Ec%28d%29");
/// assert_eq!(escape("café"), "caf%C3%A9");
/// ```
pub fn escape(input: &str) -> String {
    utf8_percent_encode(input, QUERY_COMPONENT).to_string()
}

/// Decode a percent-encoded string.
///
/// Invalid UTF-8 sequences are replaced with `U+FFFD`.
pub fn unescape(input: &str) -> Cow<'_, str> {
    percent_decode_str(input).decode_utf8_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DELIMITERS: [char; 5] = [',', '.', '(', ')', '&'];

    #[test]
    fn test_unreserved_untouched() {
        assert_eq!(escape("user_id-2~x"), "user_id-2~x");
    }

    #[test]
    fn test_delimiters_are_encoded() {
        let encoded = escape("a,b.c(d)e&f=g");
        for delimiter in DELIMITERS {
            assert!(!encoded.contains(delimiter), "{} left in {}", delimiter, encoded);
        }
        assert_eq!(encoded, "a%2Cb%2Ec%28d%29e%26f%3Dg");
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "",
            "simple",
            "with space",
            "1,2,3",
            "in.(x,y)",
            "ünïcödé ✓",
            "%already%25encoded",
            "a&b=c#frag?q",
        ];
        for input in inputs {
            let encoded = escape(input);
            assert!(encoded.is_ascii());
            for delimiter in DELIMITERS {
                assert!(!encoded.contains(delimiter));
            }
            assert_eq!(unescape(&encoded), input);
        }
    }

    #[test]
    fn test_percent_sign_is_encoded() {
        assert_eq!(escape("%"), "%25");
        assert_eq!(escape("%john%"), "%25john%25");
    }
}
