use crate::cli::commands::resolve_period;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::presenter;
use crate::core::stats::{DayActivity, ReportStats, peak_hours, report_stats, weekly_activity};
use crate::core::store::RecordStore;
use crate::db::pool::DbPool;
use crate::db::queries::load_categories;
use crate::errors::AppResult;
use crate::models::category::{Category, FALLBACK_EMOJI, as_map};
use crate::ui::messages::{header, skipped_records};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::date::today;
use crate::utils::table::Table;

const BAR_WIDTH: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats {
        weekly,
        peak,
        report,
        period,
    } = cmd
    {
        let period = resolve_period(period.as_deref(), None)?;

        let pool = DbPool::new(&cfg.database)?;
        let store = RecordStore::load(&pool)?;
        let categories = load_categories(&pool.conn)?;

        let records = match &period {
            Some(p) => presenter::by_period(store.bucket(), p),
            None => store.records().to_vec(),
        };

        let all = !*weekly && !*peak && !*report;
        let sep = cfg.separator_char.chars().next().unwrap_or('-');

        if *weekly || all {
            header("Last 7 days");
            print_weekly(&weekly_activity(store.records(), today()));
        }

        if *peak || all {
            header("Entries per hour");
            print_peak(&peak_hours(&records));
        }

        if *report || all {
            header("Usage report");
            print_report(&report_stats(&records, &categories), &categories, sep);
        }

        skipped_records(store.bucket().skipped);
    }

    Ok(())
}

fn bar(value: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (value * BAR_WIDTH).div_ceil(max);
    format!("{GREEN}{}{RESET}", "█".repeat(len))
}

fn print_weekly(days: &[DayActivity]) {
    let max = days.iter().map(|d| d.value).max().unwrap_or(0);
    for d in days {
        println!(
            "{} {}{}{} {:>4} {}",
            d.label,
            GREY,
            d.date.format("%d/%m"),
            RESET,
            d.value,
            bar(d.value, max)
        );
    }
    println!();
}

fn print_peak(hours: &[usize; 24]) {
    let max = hours.iter().copied().max().unwrap_or(0);
    if max == 0 {
        println!("No entries.\n");
        return;
    }

    for (h, n) in hours.iter().enumerate().filter(|(_, n)| **n > 0) {
        println!("{:02}h {:>5} {}", h, n, bar(*n, max));
    }

    if let Some((h, _)) = hours.iter().enumerate().max_by_key(|(h, n)| (**n, 24 - *h)) {
        println!("\nBusiest hour: {:02}h", h);
    }
    println!();
}

fn print_report(stats: &ReportStats, categories: &[Category], sep: char) {
    println!("Accesses:       {}", stats.total_accesses);
    println!("Overnights:     {}", stats.total_overnights);
    println!("Unique clients: {}\n", stats.unique_clients);

    let emojis = as_map(categories);
    let mut table = Table::new(&["CATEGORY", "ACCESSES", "OVERNIGHTS", "TOTAL"], sep);
    for (name, usage) in &stats.by_category {
        let label = if name.is_empty() {
            "(none)".to_string()
        } else {
            let emoji = emojis.get(name).map(String::as_str).unwrap_or(FALLBACK_EMOJI);
            format!("{} {}", emoji, name)
        };
        table.add_row(vec![
            label,
            usage.accesses.to_string(),
            usage.overnights.to_string(),
            usage.total().to_string(),
        ]);
    }
    print!("{}", table.render());
    println!();

    let mut clients: Vec<_> = stats.by_client.iter().collect();
    clients.sort_by(|a, b| b.1.total().cmp(&a.1.total()).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new(&["CLIENT", "ACCESSES", "OVERNIGHTS", "TOTAL"], sep);
    for (client, usage) in clients.into_iter().take(10) {
        table.add_row(vec![
            client.clone(),
            usage.accesses.to_string(),
            usage.overnights.to_string(),
            usage.total().to_string(),
        ]);
    }
    print!("{}", table.render());
    println!();
}
