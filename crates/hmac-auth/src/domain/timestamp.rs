//! ISO-8601 timestamps carried in `X-Timestamp`.
//!
//! Signers emit UTC with millisecond precision (`2024-01-01T00:00:00.000Z`).
//! The verifier accepts any RFC 3339 timestamp, with or without fractional
//! seconds and with `Z` or a numeric offset, because the canonical string
//! embeds the header verbatim and only the instant matters for skew.

use chrono::{DateTime, SecondsFormat, Utc};

/// Render Unix milliseconds as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Instants outside chrono's range render as the Unix epoch.
pub fn format_iso8601(unix_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(unix_millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into Unix milliseconds.
pub fn parse_iso8601(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp_millis())
}
