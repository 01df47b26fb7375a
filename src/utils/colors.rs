/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Open records (bike still parked) in green, closed ones grey.
pub fn color_for_status(open: bool) -> &'static str {
    if open { GREEN } else { GREY }
}

/// Grey placeholder for empty cells, the value itself otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}

/// Overnight flag, highlighted when set.
pub fn colorize_overnight(overnight: bool) -> String {
    if overnight {
        format!("{MAGENTA}🌙{RESET}")
    } else {
        String::new()
    }
}

/// Rejections and errors in red.
pub fn red(value: &str) -> String {
    format!("{RED}{value}{RESET}")
}
