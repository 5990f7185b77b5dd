//! DateTime parsing utilities with consistent error handling.
//!
//! Payments arrive from two sources: JSON bodies (usually RFC 3339) and
//! spreadsheet exports, which tend to use naive `YYYY-MM-DD HH:MM:SS` or
//! bare dates. Naive values are interpreted as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parses an RFC3339 timestamp string, returning an error if parsing fails.
///
/// # Examples
///
/// ```
/// use payment_domain::common::parse_datetime;
/// use chrono::Datelike;
///
/// let dt = parse_datetime("2024-01-15T10:30:00Z").unwrap();
/// assert_eq!(dt.year(), 2024);
/// ```
///
/// # Errors
///
/// Returns `chrono::ParseError` if the string is not valid RFC3339.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Parses a timestamp in any of the accepted shapes.
///
/// Accepts RFC 3339, naive date-times (space or `T` separated, optional
/// fractional seconds) and bare dates, which map to midnight UTC.
/// Returns `None` when nothing matches.
pub fn parse_lenient_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = parse_datetime(s) {
        return Some(dt);
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Parses a calendar date, discarding any time-of-day component.
///
/// ```
/// use payment_domain::common::parse_lenient_date;
///
/// let a = parse_lenient_date("2024-03-01").unwrap();
/// let b = parse_lenient_date("2024-03-01T23:59:00Z").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_lenient_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    parse_lenient_datetime(s).map(|dt| dt.date_naive())
}
