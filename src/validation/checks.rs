//! Text format checks used by the built-in rules.
//!
//! Each check receives the raw stored text; nothing is trimmed unless stated.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"));

static HTTP_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern is valid")
});

/// Date-time layouts accepted besides RFC 3339, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// `local@domain.tld` somewhere in the text (unanchored).
#[must_use]
pub fn is_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

/// ASCII digits only, at least one.
#[must_use]
pub fn is_digits(text: &str) -> bool {
    DIGITS.is_match(text)
}

/// `http://` or `https://`, a host character, then any non-whitespace.
#[must_use]
pub fn is_http_url(text: &str) -> bool {
    HTTP_URL.is_match(text)
}

/// Surrounding whitespace is ignored; the number must not be NaN and must be `> 0`.
#[must_use]
pub fn is_positive_number(text: &str) -> bool {
    parse_number(text).is_some_and(|n| n > 0.0)
}

/// Parse a number the way a numeric input reports it.
///
/// Infinity is only spelled `Infinity` (optionally signed); `inf` and other
/// spellings `f64::from_str` would take are not numbers. Overflowing literals
/// such as `1e400` still become infinite.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let spelled_infinity =
        unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    if spelled_infinity && unsigned != "Infinity" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// RFC 3339, a `datetime-local` style timestamp, or a bare calendar date.
#[must_use]
pub fn is_date_time(text: &str) -> bool {
    let text = text.trim();
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }
    if DATE_TIME_FORMATS.iter().any(|fmt| NaiveDateTime::parse_from_str(text, fmt).is_ok()) {
        return true;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last@sub.example.org"));
        assert!(!is_email("a@b"));
        assert!(!is_email("ab.com"));
        assert!(!is_email("a @b.com"));
    }

    #[test]
    fn test_digits() {
        assert!(is_digits("0123456789"));
        assert!(!is_digits(""));
        assert!(!is_digits("555-1234"));
        assert!(!is_digits("+44123"));
        assert!(!is_digits("١٢٣"));
    }

    #[test]
    fn test_http_url() {
        assert!(is_http_url("https://portfolio.example.com/work"));
        assert!(is_http_url("http://a.b"));
        assert!(!is_http_url("not-a-url"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("https://exa mple.com"));
        assert!(!is_http_url("https://"));
    }

    #[test]
    fn test_positive_number_boundaries() {
        assert!(is_positive_number("1"));
        assert!(is_positive_number(" 2.5 "));
        assert!(is_positive_number("1e2"));
        assert!(!is_positive_number("0"));
        assert!(!is_positive_number("-1"));
        assert!(!is_positive_number("abc"));
        assert!(!is_positive_number("NaN"));
        assert!(!is_positive_number(""));
    }

    #[test]
    fn test_infinity_spellings() {
        assert!(is_positive_number("Infinity"));
        assert!(is_positive_number("+Infinity"));
        assert!(is_positive_number("1e400"));
        assert!(!is_positive_number("-Infinity"));
        assert!(!is_positive_number("inf"));
        assert!(!is_positive_number("+inf"));
        assert!(!is_positive_number("infinity"));
        assert!(!is_positive_number("INFINITY"));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_date_time_formats() {
        assert!(is_date_time("2024-05-01T14:30"));
        assert!(is_date_time("2024-05-01T14:30:15"));
        assert!(is_date_time("2024-05-01 09:00"));
        assert!(is_date_time("2024-05-01T14:30:00Z"));
        assert!(is_date_time("2024-05-01T14:30:00+02:00"));
        assert!(is_date_time("2024-05-01"));
        assert!(!is_date_time("2024-02-30T10:00"));
        assert!(!is_date_time("tomorrow"));
        assert!(!is_date_time("2024-05-01T25:00"));
    }
}
