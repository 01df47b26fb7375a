use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::upsert_record;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::ui::messages::success;
use crate::utils::date::parse_timestamp;

/// Handle the `entry` command: open a new record for a parked bike.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Entry {
        client,
        bike,
        at,
        category,
        overnight,
    } = cmd
    {
        if let Some(ts) = at
            && parse_timestamp(ts).is_none()
        {
            return Err(AppError::InvalidTimestamp(ts.clone()));
        }

        let category = category
            .clone()
            .or_else(|| cfg.default_category.clone())
            .map(|c| c.trim().to_uppercase());

        let mut rec = Record::new(client, bike, at.clone(), category);
        rec.overnight = *overnight;

        let pool = DbPool::new(&cfg.database)?;
        upsert_record(&pool.conn, &rec)?;

        ttlog(
            &pool.conn,
            "entry",
            &rec.id,
            &format!(
                "client={} bike={} at {}",
                rec.client_id, rec.bike_id, rec.entry_timestamp
            ),
        )?;

        success(format!(
            "Entry logged for bike {} (client {}) at {}",
            rec.bike_id, rec.client_id, rec.entry_timestamp
        ));
        println!("   id: {}", rec.id);
    }

    Ok(())
}
