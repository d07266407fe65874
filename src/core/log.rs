use crate::db::log::{LogRow, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use rusqlite::Connection;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ANSI pattern is valid"));

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI colour for each logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "rename" | "merge" => Colour::Cyan,
        "import" => Colour::Purple,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "report" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

const MAX_OP_WIDTH: usize = 60;

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let rows = load_log(conn)?;

        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in render_log(&rows) {
            println!("{line}");
        }
        Ok(())
    }
}

/// One aligned, coloured line per log row.
fn render_log(rows: &[LogRow]) -> Vec<String> {
    let entries: Vec<(&LogRow, String, String)> = rows
        .iter()
        .map(|r| {
            let date = chrono::DateTime::parse_from_rfc3339(&r.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| r.date.clone());

            let op_target = if r.target.is_empty() {
                r.operation.clone()
            } else {
                format!("{} ({})", r.operation, r.target)
            };
            (r, date, op_target)
        })
        .collect();

    let op_w = entries
        .iter()
        .map(|(_, _, op_target)| op_target.chars().count())
        .max()
        .unwrap_or(10)
        .min(MAX_OP_WIDTH);
    let id_w = entries
        .iter()
        .map(|(r, _, _)| r.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = entries
        .iter()
        .map(|(_, date, _)| date.len())
        .max()
        .unwrap_or(10);

    entries
        .into_iter()
        .map(|(r, date, op_target)| {
            let color = color_for_operation(&r.operation);

            let visible = if op_target.chars().count() > MAX_OP_WIDTH {
                let mut s: String = op_target.chars().take(MAX_OP_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                r.id,
                date,
                colored,
                padding,
                r.message,
                id_w = id_w,
                date_w = date_w
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, op: &str, target: &str) -> LogRow {
        LogRow {
            id,
            date: "2025-01-06T09:00:00+01:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn rendered_lines_align_on_visible_width() {
        let lines = render_log(&[row(1, "add", "#1"), row(12, "rename", "tag t1 -> t3")]);
        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l)).collect();

        assert!(plain[0].starts_with(" 1: 2025-01-06T09:00:00+01:00 | add (#1)"));
        let arrow = |s: &str| s.find("=>").unwrap();
        assert_eq!(arrow(&plain[0]), arrow(&plain[1]));
    }

    #[test]
    fn long_targets_are_truncated() {
        let long = "x".repeat(120);
        let lines = render_log(&[row(1, "import", &long)]);
        let plain = strip_ansi(&lines[0]);
        assert!(plain.contains("..."));
        assert!(!plain.contains(&long));
    }
}
