//! Ordering of string-encoded values for `greaterThan` / `lessThan`.
//!
//! Both sides are tried as finite decimal numbers, then as dates or
//! datetimes, then compared as plain text. The first interpretation that
//! fits both sides wins.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Compare two string-encoded values.
pub(crate) fn compare_text(left: &str, right: &str) -> Ordering {
    if let (Some(a), Some(b)) = (parse_number(left), parse_number(right)) {
        // Both finite, so `partial_cmp` is always `Some`.
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }
    if let (Some(a), Some(b)) = (parse_datetime(left), parse_datetime(right)) {
        return a.cmp(&b);
    }
    left.cmp(right)
}

/// Parse a finite decimal number. `NaN` and infinities are rejected.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, or
/// `YYYY-MM-DD` (midnight). Offsets are normalized to UTC.
pub(crate) fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
