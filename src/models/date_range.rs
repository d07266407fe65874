use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Inclusive calendar-day range: `start` 00:00:00 through `end` 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Shortcut ranges relative to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidRange(format!(
                "start date must be before end date ({start} > {end})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// First instant covered by the range (wall-clock time).
    pub fn first_instant(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Last instant covered by the range (wall-clock time, millisecond precision).
    pub fn last_instant(&self) -> NaiveDateTime {
        // 23:59:59.999 always exists
        self.end.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
    }

    /// True when `dt`, read as wall-clock time in its own zone, falls inside the range.
    pub fn contains<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> bool {
        let local = dt.naive_local();
        local >= self.first_instant() && local <= self.last_instant()
    }

    /// Calendar days covered, start and end included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Resolve a range expression.
    ///
    /// Supported:
    /// - `YYYY`
    /// - `YYYY-MM`
    /// - `YYYY-MM-DD`
    /// - `YYYY:YYYY`
    /// - `YYYY-MM:YYYY-MM`
    /// - `YYYY-MM-DD:YYYY-MM-DD`
    pub fn parse_expr(expr: &str) -> AppResult<Self> {
        let expr = expr.trim();

        if let Some((start_raw, end_raw)) = expr.split_once(':') {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(AppError::InvalidRange(
                    "start and end must have same format".into(),
                ));
            }

            let (first, _) = period_bounds(start)?;
            let (_, last) = period_bounds(end)?;
            return Self::new(first, last);
        }

        let (first, last) = period_bounds(expr)?;
        Self::new(first, last)
    }

    /// Build a range from an explicit `--from`/`--to` pair.
    /// Both bounds must be given together.
    pub fn from_bounds(from: Option<&str>, to: Option<&str>) -> AppResult<Option<Self>> {
        match (from, to) {
            (None, None) => Ok(None),
            (Some(f), Some(t)) => {
                let start = parse_day(f)?;
                let end = parse_day(t)?;
                Self::new(start, end).map(Some)
            }
            _ => Err(AppError::InvalidRange(
                "please provide both a start and an end date".into(),
            )),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl Preset {
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            Preset::Today => DateRange::single_day(today),
            Preset::Week => {
                // Sunday..Saturday
                let start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                DateRange {
                    start,
                    end: start + Duration::days(6),
                }
            }
            Preset::Month => DateRange {
                start: first_of_month(today.year(), today.month()),
                end: last_of_month(today.year(), today.month()),
            },
            Preset::Quarter => {
                let first_month = (today.month0() / 3) * 3 + 1;
                DateRange {
                    start: first_of_month(today.year(), first_month),
                    end: last_of_month(today.year(), first_month + 2),
                }
            }
            Preset::Year => DateRange {
                start: first_of_month(today.year(), 1),
                end: last_of_month(today.year(), 12),
            },
        }
    }
}

pub fn parse_day(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.into()))
}

/// First and last day of a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p
                .parse()
                .map_err(|_| AppError::InvalidRange(format!("invalid year: {p}")))?;
            Ok((first_of_month(y, 1), last_of_month(y, 12)))
        }
        7 => {
            let d = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| AppError::InvalidRange(format!("invalid month: {p}")))?;
            Ok((d, last_of_month(d.year(), d.month())))
        }
        10 => {
            let d = parse_day(p)?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidRange(format!("unsupported range format: {p}"))),
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(ny, nm)
        .pred_opt()
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn end_of_day_is_inclusive_to_the_millisecond() {
        let range = DateRange::new(d("2025-01-06"), d("2025-01-10")).unwrap();

        let last = Utc.with_ymd_and_hms(2025, 1, 10, 23, 59, 59).unwrap()
            + Duration::milliseconds(999);
        assert!(range.contains(&last));

        let after = last + Duration::microseconds(1);
        assert!(!range.contains(&after));

        let first = Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
        assert!(range.contains(&first));
        assert!(!range.contains(&(first - Duration::milliseconds(1))));
    }

    #[test]
    fn start_after_end_is_rejected() {
        assert!(matches!(
            DateRange::new(d("2025-02-01"), d("2025-01-01")),
            Err(AppError::InvalidRange(_))
        ));
    }

    #[test]
    fn from_bounds_requires_both_dates() {
        assert_eq!(DateRange::from_bounds(None, None).unwrap(), None);
        assert!(DateRange::from_bounds(Some("2025-01-01"), None).is_err());
        let r = DateRange::from_bounds(Some("2025-01-01"), Some("2025-01-31"))
            .unwrap()
            .unwrap();
        assert_eq!(r.days(), 31);
    }

    #[test]
    fn expressions_resolve_to_calendar_bounds() {
        let y = DateRange::parse_expr("2024").unwrap();
        assert_eq!((y.start, y.end), (d("2024-01-01"), d("2024-12-31")));

        let m = DateRange::parse_expr("2024-02").unwrap();
        assert_eq!((m.start, m.end), (d("2024-02-01"), d("2024-02-29")));

        let span = DateRange::parse_expr("2024-11:2025-01").unwrap();
        assert_eq!((span.start, span.end), (d("2024-11-01"), d("2025-01-31")));

        let day = DateRange::parse_expr("2025-03-04").unwrap();
        assert_eq!(day.days(), 1);

        assert!(DateRange::parse_expr("2024:2024-05").is_err());
        assert!(DateRange::parse_expr("last week").is_err());
    }

    #[test]
    fn week_preset_runs_sunday_to_saturday() {
        // 2025-01-08 is a Wednesday
        let r = Preset::Week.resolve(d("2025-01-08"));
        assert_eq!((r.start, r.end), (d("2025-01-05"), d("2025-01-11")));
    }

    #[test]
    fn quarter_and_month_presets() {
        let q = Preset::Quarter.resolve(d("2025-08-15"));
        assert_eq!((q.start, q.end), (d("2025-07-01"), d("2025-09-30")));

        let m = Preset::Month.resolve(d("2025-12-15"));
        assert_eq!((m.start, m.end), (d("2025-12-01"), d("2025-12-31")));

        let t = Preset::Today.resolve(d("2025-12-15"));
        assert_eq!(t.days(), 1);
    }
}
