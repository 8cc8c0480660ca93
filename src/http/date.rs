//! HTTP date handling
//!
//! Formats `Last-Modified` values and evaluates `If-Modified-Since`
//! preconditions. Dates use the RFC 7231 fixdate form, which is also
//! valid RFC 2822 and parses with chrono.

use chrono::{DateTime, FixedOffset, Utc};
use std::time::SystemTime;

/// Format a filesystem timestamp as an HTTP-date, e.g.
/// `Tue, 15 Nov 1994 08:12:31 GMT`.
pub fn format_http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP-date header value. Unknown formats yield `None`, which
/// callers treat as "no precondition".
pub fn parse_http_date(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(value).ok()
}

/// Evaluate `If-Modified-Since` against a file's mtime.
///
/// Comparison is at second granularity since HTTP-dates carry no
/// sub-second precision.
pub fn not_modified(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(value) = if_modified_since else {
        return false;
    };
    let Some(since) = parse_http_date(value) else {
        return false;
    };
    let mtime: DateTime<Utc> = mtime.into();
    mtime.timestamp() <= since.timestamp()
}
