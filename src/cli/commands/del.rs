use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let mut store = RecordStore::load(&pool)?;
        let full_id = store.resolve_id(id)?;

        let prompt = match store.get(&full_id) {
            Some(r) => format!(
                "Delete record {} (bike {}, entry {})? This action is irreversible.",
                r.id, r.bike_id, r.entry_timestamp
            ),
            None => format!("Delete record {}? This action is irreversible.", full_id),
        };

        if !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        if store.remove(&full_id).is_some() {
            store.save(&mut pool)?;
            ttlog(&pool.conn, "del", &full_id, "record deleted")?;
            success(format!("Record {} has been deleted.", full_id));
        }
    }

    Ok(())
}
