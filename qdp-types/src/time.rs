//! Device time base conversion
//!
//! Q330 class loggers count seconds from 2000-01-01T00:00:00Z rather than
//! the Unix epoch.

use chrono::{DateTime, Utc};

/// Seconds between the Unix epoch and 2000-01-01T00:00:00Z
pub const EPOCH_OFFSET: i64 = 946_684_800;

/// Convert a device timestamp (seconds since 2000-01-01) to UTC
///
/// # Examples
///
/// ```
/// use qdp_types::epoch_to_time;
///
/// let t = epoch_to_time(0);
/// assert_eq!(t.to_rfc3339(), "2000-01-01T00:00:00+00:00");
/// ```
pub fn epoch_to_time(seconds: u32) -> DateTime<Utc> {
    // u32 + offset is always inside chrono's range
    DateTime::from_timestamp(i64::from(seconds) + EPOCH_OFFSET, 0).unwrap_or_default()
}
