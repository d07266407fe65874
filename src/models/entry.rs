use super::tags::Tags;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;

/// A stored work entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkEntry {
    pub id: i64,              // ⇔ entries.id (INTEGER PRIMARY KEY AUTOINCREMENT)
    pub task: String,         // ⇔ entries.task
    pub requestor: String,    // ⇔ entries.requestor
    pub duration: f64,        // ⇔ entries.duration (hours)
    pub tags: Tags,           // ⇔ entries.tags (TEXT, comma-joined)
    pub timestamp: String,    // ⇔ entries.timestamp (TEXT, ISO-8601, immutable)
}

/// Fields supplied by the user when logging work.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub task: String,
    pub requestor: String,
    pub duration: f64,
    pub tags: Tags,
}

impl NewEntry {
    pub fn new(task: &str, requestor: &str, duration: f64, tags: &str) -> Self {
        Self {
            task: task.to_string(),
            requestor: requestor.to_string(),
            duration,
            tags: Tags::parse(tags),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_fields(&self.task, &self.requestor, self.duration)
    }
}

impl WorkEntry {
    pub fn validate(&self) -> AppResult<()> {
        validate_fields(&self.task, &self.requestor, self.duration)
    }

    /// Creation instant, if the stored timestamp can be parsed.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Creation instant converted to `tz`.
    pub fn timestamp_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.timestamp_utc().map(|dt| dt.with_timezone(tz))
    }
}

fn validate_fields(task: &str, requestor: &str, duration: f64) -> AppResult<()> {
    if task.trim().is_empty() {
        return Err(AppError::Validation("task must not be empty".into()));
    }
    if requestor.trim().is_empty() {
        return Err(AppError::Validation("requestor must not be empty".into()));
    }
    if !duration.is_finite() || duration < 0.0 {
        return Err(AppError::Validation(format!(
            "duration must be a non-negative number of hours (got {duration})"
        )));
    }
    Ok(())
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix,
/// e.g. `2025-01-06T09:15:00.000Z`.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
