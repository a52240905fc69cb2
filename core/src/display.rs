//! Text formatting for a record's list row.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// One decimal place, e.g. `"3.2"`.
pub fn format_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.1}")
}

/// e.g. `"Mar 03, 1984"`.
pub fn format_date<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_millis(millis, tz, "%b %d, %Y")
}

/// e.g. `"4:30 PM"`.
pub fn format_time<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_millis(millis, tz, "%-I:%M %p")
}

fn format_millis<Tz>(millis: i64, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format(pattern).to_string(),
        None => millis.to_string(),
    }
}
