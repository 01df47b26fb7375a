//! Console feedback helpers: one coloured icon per message kind.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

#[derive(Clone, Copy)]
enum Kind {
    Info,
    Success,
    Warning,
    Error,
}

impl Kind {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Kind::Info => (FG_BLUE, "ℹ️"),
            Kind::Success => (FG_GREEN, "✅"),
            Kind::Warning => (FG_YELLOW, "⚠️"),
            Kind::Error => (FG_RED, "❌"),
        }
    }
}

fn render<T: fmt::Display>(kind: Kind, msg: T) -> String {
    let (color, icon) = kind.style();
    format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", render(Kind::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", render(Kind::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", render(Kind::Warning, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", render(Kind::Error, msg));
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}== {} =={}", FG_BLUE, BOLD, msg, RESET);
}

/// Report records left out of the date view because of a bad entry timestamp.
pub fn skipped_records(count: usize) {
    if count > 0 {
        warning(format!(
            "{} record(s) with an invalid entry timestamp were left out",
            count
        ));
    }
}
