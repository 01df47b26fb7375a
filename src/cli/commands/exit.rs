use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::upsert_record;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::now_iso;
use crate::utils::formatting::stay_duration;

/// Handle the `exit` command: close an open record.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Exit { id, at } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let mut store = RecordStore::load(&pool)?;

        let full_id = store.resolve_id(id)?;
        let exit_ts = at.clone().unwrap_or_else(now_iso);
        let mut rec = store.log_exit(&full_id, &exit_ts)?;

        // exit on a later calendar day: the bike stayed overnight
        if let (Some(entry), Some(exit)) = (rec.entry(), rec.exit())
            && exit.date() > entry.date()
        {
            rec.overnight = true;
        }
        upsert_record(&pool.conn, &rec)?;

        ttlog(
            &pool.conn,
            "exit",
            &rec.id,
            &format!("bike={} at {}", rec.bike_id, exit_ts),
        )?;

        success(format!("Exit logged for bike {} at {}", rec.bike_id, exit_ts));
        if let Some(stay) = stay_duration(rec.entry(), rec.exit()) {
            info(format!("Stay: {}", stay));
        }
        if rec.overnight {
            info("Flagged as overnight 🌙");
        }
    }

    Ok(())
}
