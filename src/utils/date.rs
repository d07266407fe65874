use crate::models::WorkEntry;
use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD HH:MM` in local time, or the raw value when it does not parse.
pub fn local_display(entry: &WorkEntry) -> String {
    entry
        .timestamp_in(&Local)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| entry.timestamp.clone())
}
