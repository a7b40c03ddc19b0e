//! Sub-format detection for string values
//!
//! Tags example strings with the narrow set of formats the canonical schema
//! can express. Detection is regex-shaped; dates and date-times are
//! additionally calendar-checked so that impossible dates stay plain strings.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::StringFormat;

// Regex patterns for format detection. Date patterns use [0-9] rather than
// \d: the regex crate's \d also matches non-ASCII digits, which the chrono
// parsers and the byte slices in detect_format cannot take.
static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:?[0-9]{2})?$")
        .unwrap()
});

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static URI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$")
        .unwrap()
});

fn is_calendar_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_clock_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
}

/// Detect the sub-format of a string value
///
/// Checks run in a fixed order (date-time, date, email, URI, UUID); the
/// patterns are mutually exclusive, so the order only decides which check
/// short-circuits first. Returns `None` for plain strings.
pub fn detect_format(value: &str) -> Option<StringFormat> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // DateTime before Date (longer prefix). The regexes admit only ASCII
    // digits and separators, so the byte slices below land on character
    // boundaries.
    if DATETIME_REGEX.is_match(value) {
        if is_calendar_date(&value[..10]) && is_clock_time(&value[11..19]) {
            return Some(StringFormat::DateTime);
        }
        return None;
    }

    if DATE_REGEX.is_match(value) {
        if is_calendar_date(value) {
            return Some(StringFormat::Date);
        }
        return None;
    }

    if EMAIL_REGEX.is_match(value) {
        return Some(StringFormat::Email);
    }

    if URI_REGEX.is_match(value) {
        return Some(StringFormat::Uri);
    }

    if UUID_REGEX.is_match(value) {
        return Some(StringFormat::Uuid);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_date() {
        assert_eq!(detect_format("2024-01-15"), Some(StringFormat::Date));
        assert_eq!(detect_format("2024-12-31"), Some(StringFormat::Date));
        assert_eq!(detect_format("2024-1-15"), None); // Invalid shape
    }

    #[test]
    fn test_impossible_dates_stay_plain() {
        assert_eq!(detect_format("2024-13-45"), None);
        assert_eq!(detect_format("2023-02-29"), None); // Not a leap year
        assert_eq!(detect_format("2024-02-29"), Some(StringFormat::Date));
    }

    #[test]
    fn test_detect_datetime() {
        assert_eq!(
            detect_format("2024-01-15T10:30:00"),
            Some(StringFormat::DateTime)
        );
        assert_eq!(
            detect_format("2024-01-15T10:30:00Z"),
            Some(StringFormat::DateTime)
        );
        assert_eq!(
            detect_format("2024-01-15T10:30:00+05:00"),
            Some(StringFormat::DateTime)
        );
        assert_eq!(
            detect_format("2024-01-15 10:30:00"),
            Some(StringFormat::DateTime)
        );
        assert_eq!(detect_format("2024-01-15T99:00:00"), None);
    }

    #[test]
    fn test_non_ascii_digits_stay_plain() {
        // Arabic-Indic digits shape like a date-time but are not one
        assert_eq!(detect_format("٢٠٢٤-٠١-٠١T٠٠:٠٠:٠٠"), None);
        assert_eq!(detect_format("٢٠٢٤-٠١-٠١"), None);
    }

    #[test]
    fn test_detect_email() {
        assert_eq!(
            detect_format("user@example.com"),
            Some(StringFormat::Email)
        );
        assert_eq!(
            detect_format("user.name+tag@domain.co.uk"),
            Some(StringFormat::Email)
        );
        assert_eq!(detect_format("not-an-email"), None);
    }

    #[test]
    fn test_detect_uri() {
        assert_eq!(
            detect_format("https://example.com"),
            Some(StringFormat::Uri)
        );
        assert_eq!(
            detect_format("http://localhost:8080/path"),
            Some(StringFormat::Uri)
        );
        // Only absolute http(s) URIs are recognized
        assert_eq!(detect_format("ftp://files.example.com/file.txt"), None);
        assert_eq!(detect_format("/relative/path"), None);
    }

    #[test]
    fn test_detect_uuid() {
        assert_eq!(
            detect_format("550e8400-e29b-41d4-a716-446655440000"),
            Some(StringFormat::Uuid)
        );
        assert_eq!(
            detect_format("550E8400-E29B-41D4-A716-446655440000"),
            Some(StringFormat::Uuid)
        );
        // v1-shaped UUID: version nibble is not 4
        assert_eq!(detect_format("550e8400-e29b-11d4-a716-446655440000"), None);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(detect_format(""), None);
        assert_eq!(detect_format("   "), None);
    }
}
