//! Weekly report: a self-describing summary of the work logged in a period.

use crate::core::aggregate::{filter_by_date_range, sum_by_requestor, sum_by_tag, total_duration};
use crate::models::{DateRange, WorkEntry};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// Divisor for the per-day average: a business week, whatever the span.
pub const BUSINESS_DAYS_PER_WEEK: f64 = 5.0;

pub const REPORT_TITLE: &str = "Weekly Work Report";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub analytics: ReportAnalytics,
    pub entries: Vec<ReportEntry>,
    pub context: ReportContext,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub title: String,
    pub report_type: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub generated_at: String,
    pub generator: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_entries: usize,
    pub total_hours: f64,
    pub average_hours_per_day: f64,
    pub average_task_duration: f64,
    pub unique_requestors: Vec<String>,
    pub unique_tags: Vec<String>,
    pub most_productive_day: Option<DayTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalytics {
    pub hours_by_tag: BTreeMap<String, f64>,
    pub hours_by_requestor: BTreeMap<String, f64>,
    pub hours_by_day: Vec<DayTotal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub timestamp: String,
    pub task: String,
    pub requestor: String,
    pub duration: f64,
    pub tags: Vec<String>,
}

/// Fixed description of the document for whoever consumes it next.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub purpose: String,
    pub duration_unit: String,
    pub business_days_assumed: f64,
    pub field_notes: BTreeMap<String, String>,
    pub suggested_uses: Vec<String>,
}

impl Default for ReportContext {
    fn default() -> Self {
        let field_notes = [
            ("summary.totalHours", "Sum of all entry durations in the period"),
            (
                "summary.averageHoursPerDay",
                "Total hours divided by five business days",
            ),
            (
                "summary.mostProductiveDay",
                "Day with the most logged hours; ties go to the earlier day",
            ),
            (
                "analytics.hoursByTag",
                "An entry counts toward every tag it carries",
            ),
            ("entries", "Every entry of the period in chronological order"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            purpose: "Personal log of work performed, who requested it and how long it took"
                .into(),
            duration_unit: "hours".into(),
            business_days_assumed: BUSINESS_DAYS_PER_WEEK,
            field_notes,
            suggested_uses: vec![
                "Weekly status update".into(),
                "Time allocation review by tag and requestor".into(),
                "Input for summarisation tools".into(),
            ],
        }
    }
}

/// Build the report for `range`. Entry days and the period bounds are read
/// in `tz`.
pub fn build_weekly_report<Tz>(
    entries: &[WorkEntry],
    range: &DateRange,
    tz: &Tz,
    generated_at: &DateTime<Tz>,
) -> WeeklyReport
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut in_range: Vec<(DateTime<Tz>, &WorkEntry)> = filter_by_date_range(entries, range, tz)
        .into_iter()
        .filter_map(|e| e.timestamp_in(tz).map(|dt| (dt, e)))
        .collect();
    in_range.sort_by(|a, b| a.0.cmp(&b.0));

    let listed: Vec<&WorkEntry> = in_range.iter().map(|(_, e)| *e).collect();

    let total_hours = total_duration(listed.iter().copied());
    let total_entries = listed.len();

    // per-day totals, in the order days are first met
    let mut hours_by_day: Vec<DayTotal> = Vec::new();
    for (dt, e) in &in_range {
        let day = dt.date_naive();
        match hours_by_day.iter_mut().find(|d| d.date == day) {
            Some(d) => d.hours += e.duration,
            None => hours_by_day.push(DayTotal {
                date: day,
                hours: e.duration,
            }),
        }
    }

    let mut most_productive_day: Option<DayTotal> = None;
    for d in &hours_by_day {
        if most_productive_day.as_ref().is_none_or(|best| d.hours > best.hours) {
            most_productive_day = Some(d.clone());
        }
    }

    let unique_requestors: BTreeSet<String> = listed
        .iter()
        .filter(|e| !e.requestor.is_empty())
        .map(|e| e.requestor.clone())
        .collect();
    let unique_tags: BTreeSet<String> = listed
        .iter()
        .flat_map(|e| e.tags.iter().map(str::to_string))
        .collect();

    let average_task_duration = if total_entries == 0 {
        0.0
    } else {
        total_hours / total_entries as f64
    };

    let report_entries = in_range
        .iter()
        .map(|(dt, e)| ReportEntry {
            id: e.id,
            date: dt.date_naive(),
            timestamp: e.timestamp.clone(),
            task: e.task.clone(),
            requestor: e.requestor.clone(),
            duration: e.duration,
            tags: e.tags.as_slice().to_vec(),
        })
        .collect();

    WeeklyReport {
        metadata: ReportMetadata {
            title: REPORT_TITLE.to_string(),
            report_type: "weekly".to_string(),
            period_start: range.start,
            period_end: range.end,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        },
        summary: ReportSummary {
            total_entries,
            total_hours,
            average_hours_per_day: total_hours / BUSINESS_DAYS_PER_WEEK,
            average_task_duration,
            unique_requestors: unique_requestors.into_iter().collect(),
            unique_tags: unique_tags.into_iter().collect(),
            most_productive_day,
        },
        analytics: ReportAnalytics {
            hours_by_tag: sum_by_tag(listed.iter().copied()),
            hours_by_requestor: sum_by_requestor(listed.iter().copied()),
            hours_by_day,
        },
        entries: report_entries,
        context: ReportContext::default(),
    }
}

/// `weekly-report-<start>-to-<end>-<generated>.<ext>`
pub fn report_file_name(range: &DateRange, generated_on: NaiveDate, ext: &str) -> String {
    format!(
        "weekly-report-{}-to-{}-{}.{}",
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d"),
        generated_on.format("%Y-%m-%d"),
        ext
    )
}
