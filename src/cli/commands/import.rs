use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::import_csv;
use crate::core::legacy::migrate_legacy;
use crate::core::store::RecordStore;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::red;
use crate::utils::path::expand_tilde;
use std::fs;

/// Handle the `import` command.
///
/// Imported records are merged into the store: a record with an id already
/// present replaces the stored one, new ids are appended.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, legacy } = cmd {
        let path = expand_tilde(file);
        if !path.exists() {
            return Err(AppError::Import(format!("file not found: {}", path.display())));
        }

        let (records, operation) = if *legacy {
            let content = fs::read_to_string(&path)?;
            (migrate_legacy(&content)?, "migrate_legacy")
        } else {
            let report = import_csv(fs::File::open(&path)?)?;
            for r in &report.rejected {
                warning(format!(
                    "line {}: {}",
                    r.line,
                    red(&format!("unrecognised layout ({} columns)", r.columns))
                ));
            }
            (report.records, "import")
        };

        if records.is_empty() {
            info("Nothing to import.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;
        let mut store = RecordStore::load(&pool)?;
        let before = store.len();

        let count = records.len();
        for rec in records {
            store.upsert(rec);
        }
        store.save(&mut pool)?;

        let added = store.len() - before;
        ttlog(
            &pool.conn,
            operation,
            &path.to_string_lossy(),
            &format!("{} record(s) imported, {} new", count, added),
        )?;

        success(format!(
            "Imported {} record(s) from {} ({} new, {} updated)",
            count,
            path.display(),
            added,
            count - added
        ));
    }

    Ok(())
}
