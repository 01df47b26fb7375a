//! Read accessors over a `DateBucket`.
//! Absent keys give an empty list, never an error.

use crate::core::aggregator::{DateBucket, DayMap, MonthMap};
use crate::models::record::Record;
use crate::utils::date::{Period, normalize_key};

fn month_of<'a>(bucket: &'a DateBucket, year: &str, month: &str) -> Option<&'a DayMap> {
    bucket
        .years
        .get(year.trim())
        .and_then(|months| months.get(&normalize_key(month)))
}

fn flatten_month(days: &DayMap) -> Vec<Record> {
    days.values().flatten().cloned().collect()
}

fn flatten_year(months: &MonthMap) -> Vec<Record> {
    months.values().flat_map(flatten_month).collect()
}

/// All records whose entry falls in `year`.
pub fn by_year(bucket: &DateBucket, year: &str) -> Vec<Record> {
    bucket
        .years
        .get(year.trim())
        .map(flatten_year)
        .unwrap_or_default()
}

pub fn by_month(bucket: &DateBucket, year: &str, month: &str) -> Vec<Record> {
    month_of(bucket, year, month)
        .map(flatten_month)
        .unwrap_or_default()
}

pub fn by_day(bucket: &DateBucket, year: &str, month: &str, day: &str) -> Vec<Record> {
    month_of(bucket, year, month)
        .and_then(|days| days.get(&normalize_key(day)))
        .cloned()
        .unwrap_or_default()
}

/// Every record in the bucket, oldest date first.
pub fn flatten(bucket: &DateBucket) -> Vec<Record> {
    bucket.years.values().flat_map(flatten_year).collect()
}

/// Optional year/month/day filter. Without a year nothing is selected;
/// a day without a month is ignored.
pub fn filter_by_date(
    bucket: &DateBucket,
    year: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
) -> Vec<Record> {
    match (year, month, day) {
        (Some(y), Some(m), Some(d)) => by_day(bucket, y, m, d),
        (Some(y), Some(m), None) => by_month(bucket, y, m),
        (Some(y), None, _) => by_year(bucket, y),
        (None, _, _) => Vec::new(),
    }
}

/// Records inside a calendar period.
pub fn by_period(bucket: &DateBucket, period: &Period) -> Vec<Record> {
    let (year, month, day) = period.keys();
    filter_by_date(bucket, Some(&year), month.as_deref(), day.as_deref())
}
