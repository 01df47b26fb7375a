//! Dashboard and report statistics over a record list.
//! Records with a malformed entry timestamp are ignored.

use crate::models::category::Category;
use crate::models::record::Record;
use crate::utils::date::weekday_short;
use chrono::{Duration, NaiveDate, Timelike};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayActivity {
    pub label: String,
    pub date: NaiveDate,
    pub value: usize,
}

/// Entries per day for the 7 days ending at `today`, oldest first.
pub fn weekly_activity(records: &[Record], today: NaiveDate) -> Vec<DayActivity> {
    let first = today - Duration::days(6);

    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for entry in records.iter().filter_map(Record::entry) {
        let d = entry.date();
        if d >= first && d <= today {
            *counts.entry(d).or_default() += 1;
        }
    }

    (0..7)
        .map(|i| {
            let date = first + Duration::days(i);
            DayActivity {
                label: weekday_short(date).to_string(),
                date,
                value: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Entries per hour of the day (index 0..=23).
pub fn peak_hours(records: &[Record]) -> [usize; 24] {
    let mut hours = [0usize; 24];
    for entry in records.iter().filter_map(Record::entry) {
        hours[entry.hour() as usize] += 1;
    }
    hours
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageCount {
    pub accesses: usize,
    pub overnights: usize,
}

impl UsageCount {
    fn add(&mut self, overnight: bool) {
        if overnight {
            self.overnights += 1;
        } else {
            self.accesses += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.accesses + self.overnights
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub total_accesses: usize,
    pub total_overnights: usize,
    pub unique_clients: usize,
    /// Keyed by category name; `""` collects uncategorised records.
    pub by_category: BTreeMap<String, UsageCount>,
    pub by_client: BTreeMap<String, UsageCount>,
}

/// Per-category and per-client usage. Overnight stays are counted apart
/// from plain accesses.
pub fn report_stats(records: &[Record], categories: &[Category]) -> ReportStats {
    let mut stats = ReportStats::default();

    for c in categories {
        stats.by_category.insert(c.name.clone(), UsageCount::default());
    }
    stats.by_category.insert(String::new(), UsageCount::default());

    let mut clients = BTreeSet::new();

    for r in records.iter().filter(|r| r.entry().is_some()) {
        stats.total_accesses += 1;
        if r.overnight {
            stats.total_overnights += 1;
        }
        clients.insert(r.client_id.as_str());

        stats
            .by_category
            .entry(r.category_label().to_uppercase())
            .or_default()
            .add(r.overnight);

        stats
            .by_client
            .entry(r.client_id.clone())
            .or_default()
            .add(r.overnight);
    }

    stats.unique_clients = clients.len();
    stats
}
