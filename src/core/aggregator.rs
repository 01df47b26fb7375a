//! Date-bucketed aggregation of parking records.
//!
//! `build` groups records by the calendar date of their entry timestamp into
//! a `year → month → day` map; `summarize` walks that map and counts.
//! Both are pure: no I/O, the input is only read and a new structure is
//! returned.

use crate::models::record::Record;
use crate::utils::date::{month_name, pad2, year_key};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

pub type DayMap = BTreeMap<String, Vec<Record>>;
pub type MonthMap = BTreeMap<String, DayMap>;
pub type YearMap = BTreeMap<String, MonthMap>;

/// Records grouped by entry date. Keys are `"YYYY"`, `"MM"`, `"DD"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub years: YearMap,
    /// Records dropped because their entry timestamp did not parse.
    #[serde(skip)]
    pub skipped: usize,
}

impl DateBucket {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Number of records held in the bucket.
    pub fn len(&self) -> usize {
        self.years
            .values()
            .flat_map(|months| months.values())
            .flat_map(|days| days.values())
            .map(Vec::len)
            .sum()
    }
}

/// Group records by (year, month, day) of their entry timestamp.
/// The date is the one written in the timestamp; an offset is not converted
/// to the local zone.
pub fn build(records: &[Record]) -> DateBucket {
    let mut bucket = DateBucket::default();

    for rec in records {
        let Some(entry) = rec.entry() else {
            bucket.skipped += 1;
            continue;
        };

        let date = entry.date();
        bucket
            .years
            .entry(year_key(date.year()))
            .or_default()
            .entry(pad2(date.month()))
            .or_default()
            .entry(pad2(date.day()))
            .or_default()
            .push(rec.clone());
    }

    bucket
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub name: String,
    pub total_days: usize,
    pub total_records: usize,
    pub days: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub total_months: usize,
    pub total_records: usize,
    pub months: BTreeMap<String, MonthSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_records: usize,
    pub years: BTreeMap<String, YearSummary>,
}

/// Count the records at every level of the bucket.
pub fn summarize(bucket: &DateBucket) -> Summary {
    let mut summary = Summary::default();

    for (year, months) in &bucket.years {
        let mut ys = YearSummary {
            total_months: months.len(),
            ..Default::default()
        };

        for (month, days) in months {
            let name = month.parse::<u32>().map(month_name).unwrap_or("");
            let mut ms = MonthSummary {
                name: name.to_string(),
                total_days: days.len(),
                ..Default::default()
            };

            for (day, recs) in days {
                ms.days.insert(day.clone(), recs.len());
                ms.total_records += recs.len();
            }

            ys.total_records += ms.total_records;
            ys.months.insert(month.clone(), ms);
        }

        summary.total_records += ys.total_records;
        summary.years.insert(year.clone(), ys);
    }

    summary
}
