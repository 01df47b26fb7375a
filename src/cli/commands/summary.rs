use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, skipped_records};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET};

/// Handle the `summary` command: record counts by year, month and day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { json } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let store = RecordStore::load(&pool)?;
        let summary = store.summary();

        if *json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        header("Summary");

        if summary.years.is_empty() {
            info("No records yet.");
        }

        for (year, ys) in &summary.years {
            println!(
                "{}{}{}  {}{} record(s){} in {} month(s)",
                CYAN, year, RESET, GREEN, ys.total_records, RESET, ys.total_months
            );
            for (month, ms) in &ys.months {
                println!(
                    "  {} {:<10} {:>5} record(s) over {} day(s)",
                    month, ms.name, ms.total_records, ms.total_days
                );
                let days: Vec<String> = ms
                    .days
                    .iter()
                    .map(|(d, n)| format!("{GREY}{d}{RESET}:{n}"))
                    .collect();
                println!("      {}", days.join("  "));
            }
        }

        println!("\nTotal: {} record(s)", summary.total_records);
        skipped_records(store.bucket().skipped);
    }

    Ok(())
}
