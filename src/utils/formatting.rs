//! Formatting utilities used for CLI outputs.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI regex is valid"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Display width of `s`, ignoring ANSI escapes.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

pub fn mins2readable(mins: i64) -> String {
    let abs_m = mins.abs();
    let sign = if mins < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}

/// Length of a stay, `None` while the record is open or unparsable.
pub fn stay_duration(entry: Option<NaiveDateTime>, exit: Option<NaiveDateTime>) -> Option<String> {
    match (entry, exit) {
        (Some(e), Some(x)) => Some(mins2readable((x - e).num_minutes())),
        _ => None,
    }
}

/// Short date-time for tables: `2024-03-05 10:00`.
pub fn short_timestamp(ts: Option<NaiveDateTime>, raw: &str) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}
