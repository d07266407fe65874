// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Excel day serial for a `YYYY-MM-DD` string.
pub(crate) fn date_serial(s: &str) -> Option<f64> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - epoch).num_days() as f64)
}

/// Fraction of a day for a `HH:MM` or `HH:MM:SS` string.
pub(crate) fn time_serial(s: &str) -> Option<f64> {
    let t = NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()?;
    Some(t.num_seconds_from_midnight() as f64 / SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_match_excel() {
        assert_eq!(date_serial("1900-01-01"), Some(2.0));
        assert_eq!(date_serial("2025-01-06"), Some(45663.0));
        assert_eq!(time_serial("12:00"), Some(0.5));
        assert_eq!(date_serial("06/01/2025"), None);
    }
}
