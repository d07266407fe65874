/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Greys out empty values ("" or "-"), leaves the rest untouched.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Zero hours in grey, anything else in green.
pub fn color_for_hours(hours: f64) -> &'static str {
    if hours > 0.0 { GREEN } else { GREY }
}

pub fn colorize_tags(tags: &str) -> String {
    if tags.trim().is_empty() {
        colorize_optional("-")
    } else {
        format!("{MAGENTA}{tags}{RESET}")
    }
}
