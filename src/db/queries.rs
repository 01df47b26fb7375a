use crate::errors::AppResult;
use crate::models::category::Category;
use crate::models::record::{BikeSnapshot, Record};
use chrono::Local;
use rusqlite::{Connection, Result, Row, params};

const RECORD_COLUMNS: &str = "id, client_id, bike_id, entry_timestamp, exit_timestamp, category, \
     overnight, access_removed, original_record_id, bike_snapshot";

pub fn map_row(row: &Row) -> Result<Record> {
    let snapshot_raw: Option<String> = row.get("bike_snapshot")?;
    let bike_snapshot = match snapshot_raw {
        Some(s) if !s.trim().is_empty() => {
            let snap: BikeSnapshot = serde_json::from_str(&s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    9,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Some(snap)
        }
        _ => None,
    };

    Ok(Record {
        id: row.get("id")?,
        client_id: row.get("client_id")?,
        bike_id: row.get("bike_id")?,
        entry_timestamp: row.get("entry_timestamp")?,
        exit_timestamp: row.get("exit_timestamp")?,
        category: row.get("category")?,
        overnight: row.get::<_, i32>("overnight")? == 1,
        access_removed: row.get::<_, i32>("access_removed")? == 1,
        original_record_id: row.get("original_record_id")?,
        bike_snapshot,
    })
}

fn snapshot_json(rec: &Record) -> AppResult<Option<String>> {
    Ok(match &rec.bike_snapshot {
        Some(s) => Some(serde_json::to_string(s)?),
        None => None,
    })
}

fn next_position(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT IFNULL(MAX(position), -1) + 1 FROM records", [], |r| {
        r.get(0)
    })
}

/// All records in insertion order.
pub fn load_records(conn: &Connection) -> AppResult<Vec<Record>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM records ORDER BY position ASC, rowid ASC");
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Insert a record at the end, or update it in place when the id exists.
pub fn upsert_record(conn: &Connection, rec: &Record) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    let position = next_position(conn)?;

    conn.execute(
        "INSERT INTO records (id, client_id, bike_id, entry_timestamp, exit_timestamp, category,
                              overnight, access_removed, original_record_id, bike_snapshot,
                              position, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)
         ON CONFLICT(id) DO UPDATE SET
             client_id = excluded.client_id,
             bike_id = excluded.bike_id,
             entry_timestamp = excluded.entry_timestamp,
             exit_timestamp = excluded.exit_timestamp,
             category = excluded.category,
             overnight = excluded.overnight,
             access_removed = excluded.access_removed,
             original_record_id = excluded.original_record_id,
             bike_snapshot = excluded.bike_snapshot,
             updated_at = excluded.updated_at",
        params![
            rec.id,
            rec.client_id,
            rec.bike_id,
            rec.entry_timestamp,
            rec.exit_timestamp,
            rec.category,
            if rec.overnight { 1 } else { 0 },
            if rec.access_removed { 1 } else { 0 },
            rec.original_record_id,
            snapshot_json(rec)?,
            position,
            now,
        ],
    )?;
    Ok(())
}

/// Overwrite the whole table with `records`, keeping their order.
pub fn replace_all_records(conn: &mut Connection, records: &[Record]) -> AppResult<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM records", [])?;
    for rec in records {
        upsert_record(&tx, rec)?;
    }
    tx.commit()?;
    Ok(())
}

pub fn load_categories(conn: &Connection) -> AppResult<Vec<Category>> {
    let mut stmt = conn.prepare_cached("SELECT name, emoji FROM categories ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Category {
            name: row.get(0)?,
            emoji: row.get(1)?,
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Insert or update a category's emoji.
pub fn save_category(conn: &Connection, cat: &Category) -> AppResult<()> {
    conn.execute(
        "INSERT INTO categories (name, emoji, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET emoji = excluded.emoji",
        params![cat.name, cat.emoji, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn delete_category(conn: &Connection, name: &str) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM categories WHERE name = ?1",
        [name.trim().to_uppercase()],
    )?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    fn rec(id: &str, ts: &str) -> Record {
        let mut r = Record::new("c1", "b1", Some(ts.to_string()), Some("VIP".into()));
        r.id = id.to_string();
        r
    }

    #[test]
    fn upsert_inserts_then_updates_in_place() {
        let pool = DbPool::in_memory().unwrap();
        upsert_record(&pool.conn, &rec("a", "2024-03-05T10:00:00")).unwrap();
        upsert_record(&pool.conn, &rec("b", "2024-03-05T11:00:00")).unwrap();

        let mut a = rec("a", "2024-03-05T10:00:00");
        a.exit_timestamp = Some("2024-03-05T18:00:00".into());
        a.bike_snapshot = Some(BikeSnapshot {
            brand: "Caloi".into(),
            model: "Elite".into(),
            color: "Azul".into(),
        });
        upsert_record(&pool.conn, &a).unwrap();

        let all = load_records(&pool.conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], a);
        assert_eq!(all[1].id, "b");
    }

    #[test]
    fn replace_all_keeps_order_and_drops_old_rows() {
        let mut pool = DbPool::in_memory().unwrap();
        upsert_record(&pool.conn, &rec("old", "2020-01-01T00:00:00")).unwrap();

        let new = vec![rec("z", "2024-01-01T00:00:00"), rec("y", "garbage")];
        replace_all_records(&mut pool.conn, &new).unwrap();

        let all = load_records(&pool.conn).unwrap();
        assert_eq!(all, new);
    }

    #[test]
    fn categories_roundtrip() {
        let pool = DbPool::in_memory().unwrap();
        save_category(&pool.conn, &Category::new("bombeiro", Some("🚒"))).unwrap();
        save_category(&pool.conn, &Category::new("vip", Some("💎"))).unwrap();

        let cats = load_categories(&pool.conn).unwrap();
        assert_eq!(cats.len(), 9);
        let vip = cats.iter().find(|c| c.name == "VIP").unwrap();
        assert_eq!(vip.emoji, "💎");

        assert!(delete_category(&pool.conn, "bombeiro").unwrap());
        assert_eq!(load_categories(&pool.conn).unwrap().len(), 8);
    }
}
