//! Text views over an explicit entry set.
//!
//! Each render function takes a [`ViewContext`] and returns the text to
//! print; nothing here reads storage or global state.

use crate::config::Config;
use crate::core::aggregate::{analytics, filter_by_date_range, management_summary, sorted_desc};
use crate::models::{DateRange, WorkEntry};
use crate::utils::colors::{CYAN, RESET, colorize_tags, color_for_hours};
use crate::utils::date::local_display;
use crate::utils::formatting::{bold, fmt_hours, pad_left, pad_right, percent};
use crate::utils::hours2readable;
use crate::utils::table::{Column, Table};
use chrono::{Local, TimeZone};
use std::collections::BTreeMap;

const TASK_WIDTH: usize = 40;

/// Everything a view needs: the loaded entries and the active configuration.
pub struct ViewContext<'a> {
    pub entries: &'a [WorkEntry],
    pub cfg: &'a Config,
}

impl<'a> ViewContext<'a> {
    pub fn new(entries: &'a [WorkEntry], cfg: &'a Config) -> Self {
        Self { entries, cfg }
    }

    fn separator(&self) -> char {
        self.cfg.separator_char.chars().next().unwrap_or('-')
    }

    fn select<Tz: TimeZone>(&self, range: Option<&DateRange>, tz: &Tz) -> Vec<&'a WorkEntry> {
        match range {
            Some(r) => filter_by_date_range(self.entries, r, tz),
            None => self.entries.iter().collect(),
        }
    }

    /// Entry table, newest first.
    pub fn render_entries(&self, range: Option<&DateRange>) -> String {
        let mut selected = self.select(range, &Local);
        if selected.is_empty() {
            return "No entries found.\n".to_string();
        }
        selected.sort_by(|a, b| b.timestamp_utc().cmp(&a.timestamp_utc()).then(b.id.cmp(&a.id)));

        let id_w = selected
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(2)
            .max(2);
        let req_w = selected
            .iter()
            .map(|e| e.requestor.chars().count())
            .max()
            .unwrap_or(9)
            .clamp(9, 20);

        let mut table = Table::new(
            vec![
                Column::right("ID", id_w),
                Column::left("DATE", 16),
                Column::left("REQUESTOR", req_w),
                Column::right("HOURS", 6),
                Column::left("TASK", TASK_WIDTH),
                Column::left("TAGS", 24),
            ],
            self.separator(),
        );

        for e in &selected {
            table.add_row(vec![
                e.id.to_string(),
                local_display(e),
                e.requestor.clone(),
                fmt_hours(e.duration),
                e.task.clone(),
                e.tags.join(),
            ]);
        }

        let total: f64 = selected.iter().map(|e| e.duration).sum();
        format!(
            "{}\n{} entries, {} hours ({})\n",
            table.render(),
            selected.len(),
            bold(&fmt_hours(total)),
            hours2readable(total)
        )
    }

    /// Hours per tag and per requestor, largest first.
    pub fn render_analytics(&self, range: Option<&DateRange>) -> String {
        self.render_analytics_in(range, &Local)
    }

    fn render_analytics_in<Tz: TimeZone>(&self, range: Option<&DateRange>, tz: &Tz) -> String {
        let selected = self.select(range, tz);
        let a = analytics(&selected);

        if a.total_entries == 0 {
            return "No entries for the selected period.\n".to_string();
        }

        let mut out = String::new();
        if let Some(r) = range {
            out.push_str(&format!("Period: {r} ({} days)\n\n", r.days()));
        }
        out.push_str(&self.hours_block("Hours by tag", &a.by_tag, a.total_duration));
        out.push('\n');
        out.push_str(&self.hours_block("Hours by requestor", &a.by_requestor, a.total_duration));
        out.push('\n');
        out.push_str(&format!(
            "Total: {} entries, {} hours\n",
            a.total_entries,
            bold(&fmt_hours(a.total_duration))
        ));
        out
    }

    fn hours_block(&self, title: &str, map: &BTreeMap<String, f64>, total: f64) -> String {
        let mut out = format!("{CYAN}{title}{RESET}\n");
        if map.is_empty() {
            out.push_str("  (none)\n");
            return out;
        }

        let key_w = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (key, hours) in sorted_desc(map) {
            out.push_str(&format!(
                "  {} {}{}{} {}%\n",
                pad_right(key, key_w),
                color_for_hours(hours),
                pad_left(&fmt_hours(hours), 8),
                RESET,
                pad_left(&format!("{:.1}", percent(hours, total)), 5),
            ));
        }
        out
    }

    /// How often every tag and requestor is used.
    pub fn render_summary(&self) -> String {
        let s = management_summary(self.entries);
        if s.tags.is_empty() && s.requestors.is_empty() {
            return "No tags or requestors recorded yet.\n".to_string();
        }

        let mut out = String::new();
        out.push_str(&count_block("Tags", &s.tags));
        out.push('\n');
        out.push_str(&count_block("Requestors", &s.requestors));
        out
    }
}

fn count_block(title: &str, map: &BTreeMap<String, usize>) -> String {
    let mut out = format!("{CYAN}{title} ({}){RESET}\n", map.len());
    let key_w = map.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (key, n) in sorted_desc(map) {
        let label = if title == "Tags" {
            colorize_tags(key)
        } else {
            key.to_string()
        };
        let pad = " ".repeat(key_w.saturating_sub(key.chars().count()));
        out.push_str(&format!("  {label}{pad} {n:>4}\n"));
    }
    out
}
