// src/backend/utils/time.rs
use crate::models::common::TimestampNs;
use chrono::{DateTime, SecondsFormat, Utc};

const NANOS_PER_SEC: u64 = 1_000_000_000;
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Returns the current Internet Computer time as nanoseconds since epoch.
#[cfg(target_arch = "wasm32")]
pub fn get_current_time_ns() -> TimestampNs {
    ic_cdk::api::time()
}

/// Returns the host wall-clock time as nanoseconds since epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn get_current_time_ns() -> TimestampNs {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn to_datetime(ts: TimestampNs) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(ts / NANOS_PER_SEC).ok()?;
    let nanos = u32::try_from(ts % NANOS_PER_SEC).ok()?;
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

/// Formats a nanosecond timestamp as ISO-8601 with millisecond precision, e.g. `2024-03-01T12:00:00.000Z`.
pub fn to_iso8601(ts: TimestampNs) -> String {
    to_datetime(ts)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// `YYYY-MM-DD` stamp used in export file names.
pub fn to_date_stamp(ts: TimestampNs) -> String {
    to_datetime(ts)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
