//! Conditional request support
//!
//! `Last-Modified` / `If-Modified-Since` handling for served files.
//! Timestamps are compared at whole-second granularity, matching the
//! resolution of the HTTP-date format.

use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, Utc};

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a filesystem timestamp as an RFC 7231 HTTP-date
#[must_use]
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(IMF_FIXDATE).to_string()
}

/// Parse an RFC 7231 IMF-fixdate header value
#[must_use]
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), IMF_FIXDATE)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Check whether `If-Modified-Since` makes a 304 response appropriate
/// for a file modified at `mtime`
///
/// Returns false for missing or unparseable header values, so the full
/// response is served.
#[must_use]
pub fn not_modified(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Some(since) = parse_http_date(header) else {
        return false;
    };
    DateTime::<Utc>::from(mtime).timestamp() <= since.timestamp()
}
