use crate::cli::commands::{resolve_period, short_id};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::presenter;
use crate::core::store::RecordStore;
use crate::db::pool::DbPool;
use crate::db::queries::load_categories;
use crate::errors::AppResult;
use crate::models::category::{FALLBACK_EMOJI, as_map};
use crate::models::record::Record;
use crate::ui::messages::{header, info, skipped_records};
use crate::utils::colors::{RESET, color_for_status, colorize_optional, colorize_overnight};
use crate::utils::date::{Period, month_name};
use crate::utils::formatting::{short_timestamp, stay_duration};
use crate::utils::table::Table;
use std::collections::{BTreeMap, HashSet};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, open } = cmd {
        let period = resolve_period(period.as_deref(), Some(Period::current_month()))?;

        let pool = DbPool::new(&cfg.database)?;
        let store = RecordStore::load(&pool)?;
        let emojis = as_map(&load_categories(&pool.conn)?);

        let mut records = match &period {
            Some(p) => presenter::by_period(store.bucket(), p),
            None => presenter::flatten(store.bucket()),
        };
        if *open {
            let parked: HashSet<&str> = store
                .open_records()
                .into_iter()
                .map(|r| r.id.as_str())
                .collect();
            records.retain(|r| parked.contains(r.id.as_str()));
        }

        header(period_title(period.as_ref()));

        if records.is_empty() {
            info("No records for this period.");
        } else {
            let sep = cfg.separator_char.chars().next().unwrap_or('-');
            let mut table = Table::new(
                &["ID", "CLIENT", "BIKE", "CATEGORY", "ENTRY", "EXIT", "STAY", ""],
                sep,
            );

            for r in &records {
                let category = match r.category.as_deref() {
                    Some(c) => format!(
                        "{} {}",
                        emojis.get(c).map(String::as_str).unwrap_or(FALLBACK_EMOJI),
                        c
                    ),
                    None => String::new(),
                };
                let exit = match r.exit_timestamp.as_deref() {
                    Some(raw) => short_timestamp(r.exit(), raw),
                    None => String::new(),
                };

                table.add_row(vec![
                    format!("{}{}{}", color_for_status(r.is_open()), short_id(&r.id), RESET),
                    r.client_id.clone(),
                    r.bike_id.clone(),
                    colorize_optional(&category),
                    short_timestamp(r.entry(), &r.entry_timestamp),
                    colorize_optional(&exit),
                    colorize_optional(&stay_duration(r.entry(), r.exit()).unwrap_or_default()),
                    colorize_overnight(r.overnight),
                ]);
            }

            print!("{}", table.render());
            println!();

            let parked = records.iter().filter(|r| r.is_open()).count();
            println!("{} record(s), {} bike(s) still parked", records.len(), parked);
            print_day_counts(&records);
        }

        skipped_records(store.bucket().skipped);
    }

    Ok(())
}

fn period_title(period: Option<&Period>) -> String {
    match period {
        None => "All records".to_string(),
        Some(Period::Year(y)) => format!("Records {}", y),
        Some(Period::Month(y, m)) => format!("Records {} {}", month_name(*m), y),
        Some(Period::Day(d)) => format!("Records {}", d.format("%Y-%m-%d")),
    }
}

/// Entries per day, when the listing spans more than one day.
fn print_day_counts(records: &[Record]) {
    let mut per_day: BTreeMap<String, usize> = BTreeMap::new();
    for d in records.iter().filter_map(Record::entry).map(|e| e.date()) {
        *per_day.entry(d.format("%Y-%m-%d").to_string()).or_default() += 1;
    }

    if per_day.len() > 1 {
        for (day, n) in per_day {
            println!("  {}: {}", day, n);
        }
    }
}
