// ZoneEdit module: record lookup and mutation
//
// API2 `ZoneEdit` calls are scoped by zone (the registrable domain) and
// address existing rows by their zone-file line index:
//
// - fetchzone_records   domain, type, name
// - add_zone_record     domain, type, name, txtdata[, ttl]
// - edit_zone_record    domain, type, name, txtdata, line[, ttl]
// - remove_zone_record  domain, line

use async_trait::async_trait;
use dnsu_core::traits::{DnsRecord, RecordType, ZoneProvider, ZoneUpdate};
use dnsu_core::{Error, Result, effective_zone};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::client::CpanelClient;

const ZONE_EDIT: &str = "ZoneEdit";
const FETCH: &str = "fetchzone_records";
const ADD: &str = "add_zone_record";
const EDIT: &str = "edit_zone_record";
const REMOVE: &str = "remove_zone_record";

/// One row of a `fetchzone_records` response
#[derive(Debug, Deserialize)]
struct ZoneRecordRow {
    #[serde(deserialize_with = "line_index")]
    line: u32,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    record_type: String,
    #[serde(default)]
    record: Option<String>,
    #[serde(default)]
    txtdata: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    ttl: u32,
}

/// One row of a mutation response: `{"result": {"statusmsg", "newserial", "status"}}`
#[derive(Debug, Default, Deserialize)]
struct MutationRow {
    #[serde(default)]
    result: MutationStatus,
}

#[derive(Debug, Default, Deserialize)]
struct MutationStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    statusmsg: String,
    #[serde(default, deserialize_with = "lenient_string")]
    newserial: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    status: bool,
}

// cPanel is inconsistent about quoting numbers, so accept both forms.

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

// Edits and removals address rows by line alone, so a guessed index would
// hit another record. Anything but a non-negative integer is rejected.
fn line_index<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| D::Error::custom("line is not a valid zone line index"))
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}

/// Build a record from the first lookup row
fn parse_record(row: Value, requested: RecordType) -> Result<DnsRecord> {
    let row: ZoneRecordRow =
        serde_json::from_value(row).map_err(|e| Error::decode(ZONE_EDIT, FETCH, e.to_string()))?;

    let record_type = if row.record_type.is_empty() {
        requested
    } else {
        row.record_type
            .parse()
            .map_err(|_| Error::decode(ZONE_EDIT, FETCH, format!("unexpected type '{}'", row.record_type)))?
    };

    Ok(DnsRecord {
        line: row.line,
        name: row.name,
        record_type,
        value: row.record.or(row.txtdata).or(row.address).unwrap_or_default(),
        ttl: row.ttl,
    })
}

/// Build a mutation confirmation from the first response row
fn parse_update(function: &str, rows: Vec<Value>) -> Result<ZoneUpdate> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| Error::empty_response(ZONE_EDIT, function))?;

    let row: MutationRow =
        serde_json::from_value(row).map_err(|e| Error::decode(ZONE_EDIT, function, e.to_string()))?;

    Ok(ZoneUpdate {
        new_serial: row.result.newserial,
        status_msg: row.result.statusmsg,
        status: row.result.status,
    })
}

impl CpanelClient {
    /// Look up a record by type name
    ///
    /// Unsupported types are rejected with `Error::UnsupportedRecordType`
    /// before any request is sent.
    pub async fn lookup(&self, fqdn: &str, record_type: &str) -> Result<Option<DnsRecord>> {
        let record_type: RecordType = record_type.parse()?;
        self.find_record(fqdn, record_type).await
    }
}

#[async_trait]
impl ZoneProvider for CpanelClient {
    async fn find_record(&self, fqdn: &str, record_type: RecordType) -> Result<Option<DnsRecord>> {
        let zone = effective_zone(fqdn)?;
        debug!("Looking up {} record {} in zone {}", record_type, fqdn, zone);

        let args = [
            ("domain", zone),
            ("type", record_type.to_string()),
            ("name", fqdn.to_string()),
        ];
        let rows = self.request(ZONE_EDIT, FETCH, &args).await?;

        // The remote may return several matches; only the first is acted on
        match rows.into_iter().next() {
            Some(row) => parse_record(row, record_type).map(Some),
            None => Ok(None),
        }
    }

    async fn add_txt_record(&self, fqdn: &str, value: &str, ttl: u32) -> Result<ZoneUpdate> {
        let zone = effective_zone(fqdn)?;

        let mut args = vec![
            ("domain", zone),
            ("type", RecordType::Txt.to_string()),
            ("name", fqdn.to_string()),
            ("txtdata", value.to_string()),
        ];
        if ttl > 0 {
            args.push(("ttl", ttl.to_string()));
        }

        let rows = self.request(ZONE_EDIT, ADD, &args).await?;
        parse_update(ADD, rows)
    }

    async fn update_txt_record(&self, record: &DnsRecord, value: &str) -> Result<ZoneUpdate> {
        let zone = effective_zone(&record.name)?;

        let mut args = vec![
            ("domain", zone),
            ("type", record.record_type.to_string()),
            ("name", record.name.clone()),
            ("txtdata", value.to_string()),
            ("line", record.line.to_string()),
        ];
        if record.ttl > 0 {
            args.push(("ttl", record.ttl.to_string()));
        }

        let rows = self.request(ZONE_EDIT, EDIT, &args).await?;
        parse_update(EDIT, rows)
    }

    async fn remove_record(&self, record: &DnsRecord) -> Result<ZoneUpdate> {
        let zone = effective_zone(&record.name)?;

        let args = [("domain", zone), ("line", record.line.to_string())];

        let rows = self.request(ZONE_EDIT, REMOVE, &args).await?;
        parse_update(REMOVE, rows)
    }

    fn provider_name(&self) -> &'static str {
        "cpanel"
    }
}
