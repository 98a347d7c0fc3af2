//! Timestamp detection for string values
//!
//! A string is a timestamp when it starts with an ISO-8601 date-time prefix
//! (`YYYY-MM-DDT`), or when the whole trimmed string parses with one of the
//! fixed formats below. The list is closed on purpose: results must not
//! depend on the leniency of a platform date parser. Bare numbers such as
//! `"10001"` or `"2024"` are never timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATETIME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T").expect("valid regex"));

/// Date-time layouts accepted after the ISO prefix and RFC 3339/2822 checks
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

/// Date-only layouts
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a, %d %b %Y",
    "%a %b %d %Y",
];

/// Whether the string has the `YYYY-MM-DDT` ISO-8601 date-time prefix
pub fn has_iso_datetime_prefix(value: &str) -> bool {
    ISO_DATETIME_PREFIX.is_match(value)
}

/// Whether the whole string parses with one of the fixed date layouts
pub fn parses_as_date(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    if DateTime::parse_from_rfc3339(value).is_ok() || DateTime::parse_from_rfc2822(value).is_ok()
    {
        return true;
    }

    DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
}

/// Timestamp heuristic used by the type inferencer
pub fn is_timestamp(value: &str) -> bool {
    has_iso_datetime_prefix(value) || parses_as_date(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_prefix() {
        assert!(is_timestamp("2024-01-15T10:30:00Z"));
        assert!(is_timestamp("2024-01-15T10:30:00.123+05:00"));
        // Only the prefix matters, the rest is not validated
        assert!(is_timestamp("2024-01-15Tgarbage"));
        assert!(!has_iso_datetime_prefix("2024-1-15T10:00"));
    }

    #[test]
    fn test_date_only_layouts() {
        assert!(is_timestamp("2024-01-15"));
        assert!(is_timestamp("2024/01/15"));
        assert!(is_timestamp("01/15/2024"));
        assert!(is_timestamp("Jan 15, 2024"));
        assert!(is_timestamp("January 15, 2024"));
        assert!(is_timestamp("15 Jan 2024"));
    }

    #[test]
    fn test_datetime_layouts() {
        assert!(is_timestamp("2024-01-15 10:30:00"));
        assert!(is_timestamp("2024-01-15 10:30"));
        assert!(is_timestamp("Mon, 15 Jan 2024 10:30:00 GMT"));
        assert!(is_timestamp("  2024-01-15  "));
    }

    #[test]
    fn test_non_dates() {
        assert!(!is_timestamp(""));
        assert!(!is_timestamp("   "));
        assert!(!is_timestamp("10001"));
        assert!(!is_timestamp("2024"));
        assert!(!is_timestamp("NYC"));
        assert!(!is_timestamp("hello world"));
        assert!(!is_timestamp("2024-13-45"));
        assert!(!is_timestamp("user@example.com"));
    }
}
