//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Left-align `s` to `width` display columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

/// Right-align `s` to `width` display columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{s}", " ".repeat(width.saturating_sub(w)))
}

/// Decimal hours with two decimals, as every view shows them.
pub fn fmt_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

/// `1.75` → `01h 45m`
pub fn hours2readable(hours: f64) -> String {
    let mins = (hours * 60.0).round() as i64;
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}

/// Share of `part` in `total` as a percentage; 0 when there is no total.
pub fn percent(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_hours() {
        assert_eq!(hours2readable(1.75), "01h 45m");
        assert_eq!(hours2readable(0.0), "00h 00m");
        assert_eq!(hours2readable(10.5), "10h 30m");
        assert_eq!(fmt_hours(2.0), "2.00");
    }

    #[test]
    fn padding_counts_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("7", 3), "  7");
        assert_eq!(pad_right("日本", 6), "日本  ");
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent(3.0, 0.0), 0.0);
        assert_eq!(percent(1.0, 4.0), 25.0);
    }
}
