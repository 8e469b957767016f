//! Time-related utilities.

use chrono::{SecondsFormat, TimeZone, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to UTC RFC 3339 format
///
/// Returns `None` if the timestamp is outside the range chrono can represent.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> Option<String> {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
