//! Timestamp formatting for rendered messages.

use chrono::{Local, TimeZone};

use crate::record::Timestamp;

/// Display format for epoch timestamps: `YYYY-MM-DD HH:MM:SS`.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats epoch milliseconds in the given time zone.
///
/// Sub-second precision is dropped. Returns `None` when the instant is out of
/// chrono's range.
///
/// # Example
///
/// ```
/// use chatview::render::format_epoch_millis_in;
/// use chrono::Utc;
///
/// assert_eq!(
///     format_epoch_millis_in(1700000000000, &Utc).as_deref(),
///     Some("2023-11-14 22:13:20")
/// );
/// ```
pub fn format_epoch_millis_in<Tz>(millis: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}

/// Formats a record timestamp for display, in the local time zone.
///
/// Strings pass through verbatim, a missing or out-of-range timestamp
/// renders as an empty string.
pub fn display_timestamp(timestamp: Option<&Timestamp>) -> String {
    match timestamp {
        Some(Timestamp::Text(text)) => text.clone(),
        Some(Timestamp::EpochMillis(millis)) => {
            format_epoch_millis_in(*millis, &Local).unwrap_or_default()
        }
        None => String::new(),
    }
}
