//! In-memory record store with an explicit load/save lifecycle.
//!
//! Every write rebuilds the derived `DateBucket`, so `bucket()` always
//! equals the regrouping of `records()`.

use crate::core::aggregator::{self, DateBucket, Summary};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::utils::date::parse_timestamp;

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    bucket: DateBucket,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        let mut store = Self::default();
        store.replace_all(records);
        store
    }

    /// Load every record from the database.
    pub fn load(pool: &DbPool) -> AppResult<Self> {
        Ok(Self::new(queries::load_records(&pool.conn)?))
    }

    /// Persist the full record list, replacing what the database holds.
    pub fn save(&self, pool: &mut DbPool) -> AppResult<()> {
        queries::replace_all_records(&mut pool.conn, &self.records)
    }

    fn refresh(&mut self) {
        self.bucket = aggregator::build(&self.records);
    }

    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refresh();
    }

    /// Insert, or replace in place when a record with the same id exists.
    pub fn upsert(&mut self, record: Record) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.refresh();
    }

    pub fn remove(&mut self, id: &str) -> Option<Record> {
        let idx = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(idx);
        self.refresh();
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Full id of the record matching `id` exactly, or by unique prefix.
    pub fn resolve_id(&self, id: &str) -> AppResult<String> {
        let id = id.trim();
        if let Some(r) = self.get(id) {
            return Ok(r.id.clone());
        }

        let mut hits = self.records.iter().filter(|r| r.id.starts_with(id));
        match (hits.next(), hits.next()) {
            (Some(r), None) if !id.is_empty() => Ok(r.id.clone()),
            (Some(_), Some(_)) if !id.is_empty() => {
                Err(AppError::Other(format!("ambiguous record id '{id}'")))
            }
            _ => Err(AppError::RecordNotFound(id.to_string())),
        }
    }

    /// Close an open record. Returns the updated record.
    pub fn log_exit(&mut self, id: &str, exit_timestamp: &str) -> AppResult<Record> {
        let exit = parse_timestamp(exit_timestamp)
            .ok_or_else(|| AppError::InvalidTimestamp(exit_timestamp.to_string()))?;

        let mut rec = self
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::RecordNotFound(id.to_string()))?;

        if !rec.is_open() {
            return Err(AppError::RecordAlreadyClosed(id.to_string()));
        }

        if let Some(entry) = rec.entry()
            && exit < entry
        {
            return Err(AppError::ExitBeforeEntry {
                entry: rec.entry_timestamp.clone(),
                exit: exit_timestamp.to_string(),
            });
        }

        rec.exit_timestamp = Some(exit_timestamp.to_string());
        self.upsert(rec.clone());
        Ok(rec)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records whose bike is still parked.
    pub fn open_records(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.is_open()).collect()
    }

    pub fn bucket(&self) -> &DateBucket {
        &self.bucket
    }

    pub fn summary(&self) -> Summary {
        aggregator::summarize(&self.bucket)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, ts: &str) -> Record {
        let mut r = Record::new("c1", "b1", Some(ts.to_string()), None);
        r.id = id.to_string();
        r
    }

    #[test]
    fn bucket_follows_every_write() {
        let mut store = RecordStore::default();
        assert_eq!(store.summary().total_records, 0);

        store.upsert(rec("a", "2024-03-05T10:00:00"));
        store.upsert(rec("b", "2024-03-05T22:00:00"));
        assert_eq!(store.summary().total_records, 2);

        // same id → replaced, moved to another day
        store.upsert(rec("a", "2024-04-01T09:00:00"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].entry_timestamp, "2024-04-01T09:00:00");
        assert_eq!(store.summary().years["2024"].total_months, 2);

        store.remove("b");
        assert_eq!(store.bucket(), &aggregator::build(store.records()));

        store.replace_all(vec![]);
        assert!(store.bucket().is_empty());
    }

    #[test]
    fn invalid_records_are_kept_but_not_bucketed() {
        let store = RecordStore::new(vec![rec("a", "nope"), rec("b", "2024-01-01T00:00:00")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.bucket().skipped, 1);
        assert_eq!(store.summary().total_records, 1);
    }

    #[test]
    fn log_exit_rules() {
        let mut store = RecordStore::new(vec![rec("a", "2024-03-05T10:00:00")]);

        assert!(matches!(
            store.log_exit("missing", "2024-03-05T11:00:00"),
            Err(AppError::RecordNotFound(_))
        ));
        assert!(matches!(
            store.log_exit("a", "yesterday"),
            Err(AppError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            store.log_exit("a", "2024-03-05T09:00:00"),
            Err(AppError::ExitBeforeEntry { .. })
        ));

        let closed = store.log_exit("a", "2024-03-05T18:00:00").unwrap();
        assert!(!closed.is_open());
        assert!(store.open_records().is_empty());

        assert!(matches!(
            store.log_exit("a", "2024-03-05T19:00:00"),
            Err(AppError::RecordAlreadyClosed(_))
        ));
    }

    #[test]
    fn ids_resolve_by_unique_prefix() {
        let store = RecordStore::new(vec![
            rec("abc123", "2024-03-05T10:00:00"),
            rec("abd456", "2024-03-05T11:00:00"),
        ]);
        assert_eq!(store.resolve_id("abc123").unwrap(), "abc123");
        assert_eq!(store.resolve_id("abd").unwrap(), "abd456");
        assert!(matches!(store.resolve_id("ab"), Err(AppError::Other(_))));
        assert!(matches!(
            store.resolve_id("zz"),
            Err(AppError::RecordNotFound(_))
        ));
        assert!(store.resolve_id("").is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let mut pool = DbPool::in_memory().unwrap();
        let store = RecordStore::new(vec![
            rec("a", "2024-03-05T10:00:00"),
            rec("b", "2024-04-01T09:00:00"),
        ]);
        store.save(&mut pool).unwrap();

        let loaded = RecordStore::load(&pool).unwrap();
        assert_eq!(loaded.records(), store.records());
        assert_eq!(loaded.summary(), store.summary());
    }
}
