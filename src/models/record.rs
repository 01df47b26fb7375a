use crate::utils::date::{now_iso, parse_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bike details copied into the record at entry time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeSnapshot {
    #[serde(default, alias = "marca")]
    pub brand: String,
    #[serde(default, alias = "modelo")]
    pub model: String,
    #[serde(default, alias = "cor")]
    pub color: String,
}

/// One bicycle parking event (entry and, once logged, exit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(alias = "clienteId")]
    pub client_id: String,
    #[serde(alias = "bicicletaId")]
    pub bike_id: String,
    #[serde(alias = "dataHoraEntrada")]
    pub entry_timestamp: String,
    #[serde(default, alias = "dataHoraSaida")]
    pub exit_timestamp: Option<String>,
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
    #[serde(default, alias = "pernoite")]
    pub overnight: bool,

    #[serde(default, alias = "acessoRemovido")]
    pub access_removed: bool,
    #[serde(default, alias = "registroOriginalId")]
    pub original_record_id: Option<String>,
    #[serde(default)]
    pub bike_snapshot: Option<BikeSnapshot>,
}

impl Record {
    /// New open record with a fresh id.
    /// - `entry_timestamp = now()` when not given
    /// - `exit_timestamp = None`
    pub fn new(
        client_id: &str,
        bike_id: &str,
        entry_timestamp: Option<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_id: client_id.to_string(),
            bike_id: bike_id.to_string(),
            entry_timestamp: entry_timestamp.unwrap_or_else(now_iso),
            exit_timestamp: None,
            category: category.filter(|c| !c.trim().is_empty()),
            overnight: false,
            access_removed: false,
            original_record_id: None,
            bike_snapshot: None,
        }
    }

    /// Entry time, or `None` when the stored timestamp is malformed.
    pub fn entry(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.entry_timestamp)
    }

    pub fn exit(&self) -> Option<NaiveDateTime> {
        self.exit_timestamp.as_deref().and_then(parse_timestamp)
    }

    /// A record without exit: the bike is still parked.
    pub fn is_open(&self) -> bool {
        self.exit_timestamp
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }
}
