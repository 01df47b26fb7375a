pub mod category;
pub mod config;
pub mod db;
pub mod del;
pub mod entry;
pub mod exit;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod stats;
pub mod summary;

use crate::errors::{AppError, AppResult};
use crate::utils::date::Period;

/// `--period` option: `None` for "all", otherwise the parsed period.
/// Without the option, `fallback` applies.
pub(crate) fn resolve_period(
    period: Option<&str>,
    fallback: Option<Period>,
) -> AppResult<Option<Period>> {
    match period.map(str::trim) {
        None => Ok(fallback),
        Some("all") => Ok(None),
        Some(p) => Period::parse(p)
            .map(Some)
            .map_err(|_| AppError::InvalidPeriod(p.to_string())),
    }
}

/// First characters of a record id, enough to address it from the CLI.
pub(crate) fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
