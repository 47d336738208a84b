//! Lenient calendar-date handling for query parameters and the wire format.
//!
//! Malformed input is never an error here: an unparsable date yields `None`,
//! which callers treat as an open bound (or "now" for exercise creation).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parses a raw query-string value into a UTC instant at midnight.
///
/// Accepts `YYYY-MM-DD`, RFC 3339, and `MM/DD/YYYY`. Anything else
/// (including an absent or empty value) is `None`.
pub fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// Renders an instant the way JS `Date.prototype.toDateString()` does,
/// e.g. `Sun Jan 15 2023`. No time-of-day component.
pub fn format_date(instant: &DateTime<Utc>) -> String {
    instant.format("%a %b %d %Y").to_string()
}

/// Parses a raw `limit` query value. Only a positive integer truncates the
/// log; anything else means "return everything".
pub fn parse_limit(raw: Option<&str>) -> Option<i64> {
    let parsed: i64 = raw?.trim().parse().ok()?;
    (parsed > 0).then_some(parsed)
}
