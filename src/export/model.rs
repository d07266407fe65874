// src/export/model.rs

use crate::models::WorkEntry;
use chrono::TimeZone;
use serde::Serialize;

/// Flat row used by every export format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EntryExport {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub task: String,
    pub requestor: String,
    pub duration: f64,
    pub tags: String,
    pub timestamp: String,
}

impl EntryExport {
    /// Date and time columns are read in `tz`; the raw timestamp is kept as stored.
    pub fn from_entry<Tz: TimeZone>(e: &WorkEntry, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let (date, time) = match e.timestamp_in(tz) {
            Some(dt) => (
                dt.format("%Y-%m-%d").to_string(),
                dt.format("%H:%M").to_string(),
            ),
            None => (String::new(), String::new()),
        };

        Self {
            id: e.id,
            date,
            time,
            task: e.task.clone(),
            requestor: e.requestor.clone(),
            duration: e.duration,
            tags: e.tags.join(),
            timestamp: e.timestamp.clone(),
        }
    }
}

/// Header for CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "date",
        "time",
        "task",
        "requestor",
        "duration",
        "tags",
        "timestamp",
    ]
}

pub(crate) fn entry_to_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.date.clone(),
        e.time.clone(),
        e.task.clone(),
        e.requestor.clone(),
        format!("{:.2}", e.duration),
        e.tags.clone(),
        e.timestamp.clone(),
    ]
}

pub(crate) fn entries_to_table(entries: &[EntryExport]) -> Vec<Vec<String>> {
    entries.iter().map(entry_to_row).collect()
}
