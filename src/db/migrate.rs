use crate::models::category::default_categories;
use crate::ui::messages::success;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists. Migrations are tracked in it.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a migration has already been recorded in `log`.
fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

/// Create the `records` table (entry/exit events).
fn create_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id                 TEXT PRIMARY KEY,
            client_id          TEXT NOT NULL,
            bike_id            TEXT NOT NULL,
            entry_timestamp    TEXT NOT NULL,
            exit_timestamp     TEXT,
            category           TEXT,
            overnight          INTEGER NOT NULL DEFAULT 0,
            access_removed     INTEGER NOT NULL DEFAULT 0,
            original_record_id TEXT,
            bike_snapshot      TEXT,
            position           INTEGER NOT NULL DEFAULT 0,
            created_at         TEXT NOT NULL,
            updated_at         TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_client ON records(client_id);
        CREATE INDEX IF NOT EXISTS idx_records_entry ON records(entry_timestamp);
        "#,
    )?;
    Ok(())
}

/// Create the `categories` table and seed the built-in categories.
fn create_categories_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            name       TEXT PRIMARY KEY,
            emoji      TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )?;

    let now = Local::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO categories (name, emoji, created_at) VALUES (?1, ?2, ?3)",
    )?;
    for c in default_categories() {
        stmt.execute(params![c.name, c.emoji, now])?;
    }
    Ok(())
}

type Migration = (&'static str, &'static str, fn(&Connection) -> Result<()>);

const MIGRATIONS: [Migration; 2] = [
    (
        "20250301_0001_create_records",
        "Created records table",
        create_records_table,
    ),
    (
        "20250301_0002_create_categories",
        "Created categories table with default categories",
        create_categories_table,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, apply) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        apply(conn)?;
        mark_applied(conn, version, message)?;
        success(format!("Migration applied: {} → {}", version, message));
    }

    Ok(())
}
