//! Pure aggregations over a slice of entries.
//!
//! Nothing here touches storage; callers load the entry set once and pass
//! it in.

use crate::models::{DateRange, WorkEntry};
use chrono::TimeZone;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals shown by the analytics view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub by_tag: BTreeMap<String, f64>,
    pub by_requestor: BTreeMap<String, f64>,
    pub total_entries: usize,
    pub total_duration: f64,
}

/// Usage counts shown by the management view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManagementSummary {
    pub tags: BTreeMap<String, usize>,
    pub requestors: BTreeMap<String, usize>,
}

/// Entries whose timestamp, read in `tz`, falls inside `range`.
/// Entries with an unparsable timestamp are dropped.
pub fn filter_by_date_range<'a, Tz: TimeZone>(
    entries: &'a [WorkEntry],
    range: &DateRange,
    tz: &Tz,
) -> Vec<&'a WorkEntry> {
    entries
        .iter()
        .filter(|e| e.timestamp_in(tz).is_some_and(|dt| range.contains(&dt)))
        .collect()
}

/// Hours per tag. Every token counts, so an entry tagged `"a, a"` adds its
/// duration to `a` twice.
pub fn sum_by_tag<'a, I>(entries: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    let mut out = BTreeMap::new();
    for e in entries {
        for tag in e.tags.iter() {
            *out.entry(tag.to_string()).or_insert(0.0) += e.duration;
        }
    }
    out
}

/// Hours per requestor; entries with a blank requestor are skipped.
pub fn sum_by_requestor<'a, I>(entries: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    let mut out = BTreeMap::new();
    for e in entries {
        if e.requestor.is_empty() {
            continue;
        }
        *out.entry(e.requestor.clone()).or_insert(0.0) += e.duration;
    }
    out
}

pub fn count_by_tag<'a, I>(entries: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    let mut out = BTreeMap::new();
    for e in entries {
        for tag in e.tags.iter() {
            *out.entry(tag.to_string()).or_insert(0) += 1;
        }
    }
    out
}

pub fn count_by_requestor<'a, I>(entries: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    let mut out = BTreeMap::new();
    for e in entries {
        if e.requestor.is_empty() {
            continue;
        }
        *out.entry(e.requestor.clone()).or_insert(0) += 1;
    }
    out
}

pub fn total_duration<'a, I>(entries: I) -> f64
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    entries.into_iter().map(|e| e.duration).sum()
}

pub fn analytics(entries: &[&WorkEntry]) -> Analytics {
    Analytics {
        by_tag: sum_by_tag(entries.iter().copied()),
        by_requestor: sum_by_requestor(entries.iter().copied()),
        total_entries: entries.len(),
        total_duration: total_duration(entries.iter().copied()),
    }
}

pub fn management_summary(entries: &[WorkEntry]) -> ManagementSummary {
    ManagementSummary {
        tags: count_by_tag(entries),
        requestors: count_by_requestor(entries),
    }
}

/// `map` as `(key, value)` pairs, largest value first; ties keep key order.
pub fn sorted_desc<V: PartialOrd + Copy>(map: &BTreeMap<String, V>) -> Vec<(&str, V)> {
    let mut v: Vec<(&str, V)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    v.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tags;
    use crate::models::date_range::parse_day;
    use chrono::Utc;

    fn entry(id: i64, requestor: &str, duration: f64, tags: &str, ts: &str) -> WorkEntry {
        WorkEntry {
            id,
            task: format!("task {id}"),
            requestor: requestor.to_string(),
            duration,
            tags: Tags::parse(tags),
            timestamp: ts.to_string(),
        }
    }

    fn scenario() -> Vec<WorkEntry> {
        vec![
            entry(1, "R1", 3.0, "t1", "2025-01-06T09:00:00.000Z"),
            entry(2, "R1", 2.0, "t1,t2", "2025-01-07T09:00:00.000Z"),
        ]
    }

    #[test]
    fn empty_input_gives_empty_maps_and_zero_total() {
        let none: Vec<WorkEntry> = Vec::new();
        assert!(sum_by_tag(&none).is_empty());
        assert!(sum_by_requestor(&none).is_empty());
        assert_eq!(total_duration(&none), 0.0);

        let a = analytics(&[]);
        assert_eq!(a, Analytics::default());
    }

    #[test]
    fn repeated_tokens_count_twice() {
        let e = vec![entry(1, "R", 2.0, "a, b, a", "2025-01-06T09:00:00.000Z")];
        let sums = sum_by_tag(&e);
        assert_eq!(sums.get("a"), Some(&4.0));
        assert_eq!(sums.get("b"), Some(&2.0));
        assert_eq!(sums.len(), 2);
    }

    #[test]
    fn scenario_totals() {
        let entries = scenario();
        let refs: Vec<&WorkEntry> = entries.iter().collect();
        let a = analytics(&refs);

        assert_eq!(a.by_requestor.get("R1"), Some(&5.0));
        assert_eq!(a.by_tag.get("t1"), Some(&5.0));
        assert_eq!(a.by_tag.get("t2"), Some(&2.0));
        assert_eq!(a.total_entries, 2);
        assert_eq!(a.total_duration, 5.0);
    }

    #[test]
    fn blank_requestors_are_skipped() {
        let e = vec![
            entry(1, "", 2.0, "", "2025-01-06T09:00:00.000Z"),
            entry(2, "R", 1.0, "", "2025-01-06T09:00:00.000Z"),
        ];
        assert_eq!(sum_by_requestor(&e).len(), 1);
        assert_eq!(count_by_requestor(&e).len(), 1);
        // still part of the overall total
        assert_eq!(total_duration(&e), 3.0);
    }

    #[test]
    fn management_counts_entries_not_hours() {
        let s = management_summary(&scenario());
        assert_eq!(s.tags.get("t1"), Some(&2));
        assert_eq!(s.tags.get("t2"), Some(&1));
        assert_eq!(s.requestors.get("R1"), Some(&2));
    }

    #[test]
    fn date_filter_is_inclusive_and_drops_unparsable() {
        let entries = vec![
            entry(1, "R", 1.0, "", "2025-01-05T23:59:59.999Z"),
            entry(2, "R", 1.0, "", "2025-01-06T00:00:00.000Z"),
            entry(3, "R", 1.0, "", "2025-01-10T23:59:59.999Z"),
            entry(4, "R", 1.0, "", "2025-01-10T23:59:59.999001Z"),
            entry(5, "R", 1.0, "", "not a date"),
        ];
        let range = DateRange::new(parse_day("2025-01-06").unwrap(), parse_day("2025-01-10").unwrap())
            .unwrap();

        let ids: Vec<i64> = filter_by_date_range(&entries, &range, &Utc)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn sorted_desc_orders_by_value() {
        let sums = sum_by_tag(&vec![
            entry(1, "R", 1.0, "small", "2025-01-06T09:00:00.000Z"),
            entry(2, "R", 5.0, "big", "2025-01-06T09:00:00.000Z"),
        ]);
        let sorted = sorted_desc(&sums);
        assert_eq!(sorted[0], ("big", 5.0));
        assert_eq!(sorted[1], ("small", 1.0));
    }
}
