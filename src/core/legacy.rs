//! Migration of the old single-document format, where records were nested
//! inside each client's bikes:
//!
//! `[ { id, bicicletas: [ { id, registros: [ {...} ] } ] } ]`
//!
//! Each nested record becomes a flat `Record` carrying its client and bike id.

use crate::errors::AppResult;
use crate::models::record::Record;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Parent references a nested record may carry itself; the parents win.
const PARENT_KEYS: [&str; 4] = ["clientId", "clienteId", "bikeId", "bicicletaId"];

#[derive(Debug, Deserialize)]
struct LegacyClient {
    id: String,
    #[serde(default)]
    bicicletas: Vec<LegacyBike>,
}

#[derive(Debug, Deserialize)]
struct LegacyBike {
    id: String,
    #[serde(default)]
    registros: Vec<Map<String, Value>>,
}

/// Flatten a legacy document into records, in document order.
pub fn migrate_legacy(json: &str) -> AppResult<Vec<Record>> {
    let clients: Vec<LegacyClient> = serde_json::from_str(json)?;
    let mut out = Vec::new();

    for client in clients {
        for bike in client.bicicletas {
            for mut raw in bike.registros {
                for key in PARENT_KEYS {
                    raw.remove(key);
                }

                let id = match raw.get("id") {
                    Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    _ => Uuid::new_v4().to_string(),
                };
                raw.insert("id".into(), Value::String(id));
                // kept without entry; bucketing skips it later
                if !raw.contains_key("dataHoraEntrada") && !raw.contains_key("entryTimestamp") {
                    raw.insert("dataHoraEntrada".into(), Value::String(String::new()));
                }

                raw.insert("clientId".into(), Value::String(client.id.clone()));
                raw.insert("bikeId".into(), Value::String(bike.id.clone()));
                out.push(serde_json::from_value(Value::Object(raw))?);
            }
        }
    }

    Ok(out)
}
