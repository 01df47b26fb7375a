use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_timestamp;
use rusqlite::OptionalExtension;
use std::fs;

/// Raw figures about the database content.
#[derive(Debug, Default)]
pub struct DbInfo {
    pub file_size: u64,
    pub total_records: i64,
    pub open_records: i64,
    pub categories: i64,
    pub first_entry: Option<String>,
    pub last_entry: Option<String>,
}

pub fn collect_db_info(pool: &DbPool, db_path: &str) -> AppResult<DbInfo> {
    let conn = &pool.conn;

    let total_records: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?;
    let open_records: i64 = conn.query_row(
        "SELECT COUNT(*) FROM records WHERE exit_timestamp IS NULL OR exit_timestamp = ''",
        [],
        |r| r.get(0),
    )?;
    let categories: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;

    let first_entry: Option<String> = conn
        .query_row(
            "SELECT entry_timestamp FROM records ORDER BY entry_timestamp ASC LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()?;
    let last_entry: Option<String> = conn
        .query_row(
            "SELECT entry_timestamp FROM records ORDER BY entry_timestamp DESC LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()?;

    Ok(DbInfo {
        file_size: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        total_records,
        open_records,
        categories,
        first_entry,
        last_entry,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let info = collect_db_info(pool, db_path)?;
    println!();

    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, info.total_records, RESET
    );
    println!(
        "{}• Bikes parked now:{} {}{}{}",
        CYAN, RESET, GREEN, info.open_records, RESET
    );
    println!("{}• Categories:{} {}", CYAN, RESET, info.categories);

    let fmt = |v: &Option<String>| v.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Entry range:{}", CYAN, RESET);
    println!("    from: {}", fmt(&info.first_entry));
    println!("    to:   {}", fmt(&info.last_entry));

    // Average entries/day over the covered range
    let first = info.first_entry.as_deref().and_then(parse_timestamp);
    let last = info.last_entry.as_deref().and_then(parse_timestamp);
    if let (Some(f), Some(l)) = (first, last) {
        let days = (l.date() - f.date()).num_days().max(1);
        let avg = info.total_records as f64 / days as f64;
        println!("{}• Average entries/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

/// `PRAGMA integrity_check`; returns the messages, `["ok"]` when healthy.
pub fn integrity_check(pool: &DbPool) -> AppResult<Vec<String>> {
    let mut stmt = pool.conn.prepare("PRAGMA integrity_check")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn vacuum(pool: &DbPool) -> AppResult<()> {
    pool.conn.execute_batch("VACUUM;")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::upsert_record;
    use crate::models::record::Record;

    #[test]
    fn counts_open_records() {
        let pool = DbPool::in_memory().unwrap();
        let a = Record::new("c", "b", Some("2024-03-05T10:00:00".into()), None);
        let mut b = Record::new("c", "b", Some("2024-03-06T10:00:00".into()), None);
        b.exit_timestamp = Some("2024-03-06T12:00:00".into());
        upsert_record(&pool.conn, &a).unwrap();
        upsert_record(&pool.conn, &b).unwrap();

        let info = collect_db_info(&pool, ":memory:").unwrap();
        assert_eq!(info.total_records, 2);
        assert_eq!(info.open_records, 1);
        assert_eq!(info.first_entry.as_deref(), Some("2024-03-05T10:00:00"));
        assert_eq!(integrity_check(&pool).unwrap(), vec!["ok".to_string()]);
    }
}
