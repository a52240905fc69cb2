//! Plain-text rendering of a `ViewState` for the terminal.

use std::fmt::Display;

use chrono::TimeZone;
use quake_core::display::{format_date, format_magnitude, format_time};
use quake_core::{split_location, EarthquakeRecord, MagnitudeBucket, ViewState};
use serde::Serialize;

/// One list row with every field already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub magnitude: String,
    pub bucket: u8,
    pub color: &'static str,
    pub offset: String,
    pub primary: String,
    pub date: String,
    pub time: String,
    pub url: String,
}

impl Row {
    pub fn new<Tz>(record: &EarthquakeRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let bucket = MagnitudeBucket::from_magnitude(record.magnitude);
        let parts = split_location(&record.location);
        Self {
            magnitude: format_magnitude(record.magnitude),
            bucket: bucket as u8,
            color: bucket.color_hex(),
            offset: parts.offset,
            primary: parts.primary,
            date: format_date(record.occurred_at_millis, tz),
            time: format_time(record.occurred_at_millis, tz),
            url: record.detail_url.clone(),
        }
    }
}

pub fn rows<Tz>(state: &ViewState, tz: &Tz) -> Vec<Row>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    state.records.iter().map(|record| Row::new(record, tz)).collect()
}

/// Rows as a pretty-printed JSON array.
pub fn render_json<Tz>(state: &ViewState, tz: &Tz) -> crate::Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Ok(serde_json::to_string_pretty(&rows(state, tz))?)
}

/// Fixed-width table, or the state's message when there is nothing to list.
pub fn render_text<Tz>(state: &ViewState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Some(message) = state.message {
        return format!("{message}\n");
    }
    if state.progress_visible {
        return "Loading...\n".to_string();
    }

    let mut out = String::new();
    for row in rows(state, tz) {
        out.push_str(&format!(
            "{:>5}  {:<14} {:<28} {:<13} {:>8}\n       {}\n",
            row.magnitude, row.offset, row.primary, row.date, row.time, row.url
        ));
    }
    out
}
