//! Spreadsheet/CSV import of records.
//!
//! Two row layouts exist in exported sheets:
//! - V1 (8 columns): id, client id, bike id, entry, exit, overnight,
//!   access removed, original record id
//! - V2 (10 columns): id, client id, bike id, category, entry, exit,
//!   overnight, access removed, original record id, bike snapshot (JSON)
//!
//! The layout is detected per row from its column count, then the row is
//! handed to the parser of that version.

use crate::errors::AppResult;
use crate::models::record::{BikeSnapshot, Record};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub const V1_COLUMNS: usize = 8;
    pub const V2_COLUMNS: usize = 10;

    pub fn detect(column_count: usize) -> Option<Self> {
        if column_count >= Self::V2_COLUMNS {
            Some(SchemaVersion::V2)
        } else if column_count >= Self::V1_COLUMNS {
            Some(SchemaVersion::V1)
        } else {
            None
        }
    }
}

/// A row already split into the fields of its schema version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRow {
    V1 {
        id: String,
        client_id: String,
        bike_id: String,
        entry: String,
        exit: String,
        overnight: String,
        access_removed: String,
        original_id: String,
    },
    V2 {
        id: String,
        client_id: String,
        bike_id: String,
        category: String,
        entry: String,
        exit: String,
        overnight: String,
        access_removed: String,
        original_id: String,
        bike_snapshot: String,
    },
}

fn cell(cols: &[String], i: usize) -> String {
    cols.get(i).map(|s| s.trim().to_string()).unwrap_or_default()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn yes(s: &str) -> bool {
    s.eq_ignore_ascii_case("sim")
}

impl RecordRow {
    fn parse_v1(cols: &[String]) -> Self {
        RecordRow::V1 {
            id: cell(cols, 0),
            client_id: cell(cols, 1),
            bike_id: cell(cols, 2),
            entry: cell(cols, 3),
            exit: cell(cols, 4),
            overnight: cell(cols, 5),
            access_removed: cell(cols, 6),
            original_id: cell(cols, 7),
        }
    }

    fn parse_v2(cols: &[String]) -> Self {
        RecordRow::V2 {
            id: cell(cols, 0),
            client_id: cell(cols, 1),
            bike_id: cell(cols, 2),
            category: cell(cols, 3),
            entry: cell(cols, 4),
            exit: cell(cols, 5),
            overnight: cell(cols, 6),
            access_removed: cell(cols, 7),
            original_id: cell(cols, 8),
            bike_snapshot: cell(cols, 9),
        }
    }

    /// Discriminate on the column count, then dispatch to the version parser.
    pub fn parse(cols: &[String]) -> Option<Self> {
        match SchemaVersion::detect(cols.len())? {
            SchemaVersion::V1 => Some(Self::parse_v1(cols)),
            SchemaVersion::V2 => Some(Self::parse_v2(cols)),
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            RecordRow::V1 {
                id,
                client_id,
                bike_id,
                entry,
                exit,
                overnight,
                access_removed,
                original_id,
            } => Record {
                id,
                client_id,
                bike_id,
                entry_timestamp: entry,
                exit_timestamp: non_empty(exit),
                category: None,
                overnight: yes(&overnight),
                access_removed: yes(&access_removed),
                original_record_id: non_empty(original_id),
                bike_snapshot: None,
            },
            RecordRow::V2 {
                id,
                client_id,
                bike_id,
                category,
                entry,
                exit,
                overnight,
                access_removed,
                original_id,
                bike_snapshot,
            } => Record {
                id,
                client_id,
                bike_id,
                entry_timestamp: entry,
                exit_timestamp: non_empty(exit),
                category: non_empty(category.to_uppercase()),
                overnight: yes(&overnight),
                access_removed: yes(&access_removed),
                original_record_id: non_empty(original_id),
                // an unreadable snapshot is dropped, the record is kept
                bike_snapshot: serde_json::from_str::<BikeSnapshot>(&bike_snapshot).ok(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// 1-based line number in the source, header included.
    pub line: usize,
    pub columns: usize,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub records: Vec<Record>,
    pub rejected: Vec<RowRejection>,
}

/// Read records from CSV. The first row is a header.
/// Rows without id are skipped; rows with an unknown layout are reported.
pub fn import_csv<R: Read>(reader: R) -> AppResult<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut report = ImportReport::default();

    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let cols: Vec<String> = row.iter().map(String::from).collect();

        if cols.first().map(|s| s.trim().is_empty()).unwrap_or(true) {
            continue;
        }

        match RecordRow::parse(&cols) {
            Some(parsed) => report.records.push(parsed.into_record()),
            None => report.rejected.push(RowRejection {
                line: i + 2,
                columns: cols.len(),
            }),
        }
    }

    Ok(report)
}
