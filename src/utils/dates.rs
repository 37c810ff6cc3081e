use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format a timestamp as `dd.mm.yyyy` in the local time zone
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    format_date_in(timestamp, &Local)
}

/// Format a timestamp as `dd.mm.yyyy` as seen in `tz`
pub fn format_date_in<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%d.%m.%Y").to_string()
}

/// Format milliseconds since the epoch like [`format_date`]; times before the epoch clamp to it
pub fn format_date_millis(millis: i64) -> String {
    format_date(&millis_to_datetime(millis))
}

fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis.max(0)).unwrap_or_default()
}
