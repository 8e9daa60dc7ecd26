// # Zone Provider Trait
//
// Defines the interface between the reconciliation engine and a concrete
// control-panel API.
//
// ## Implementations
//
// - cPanel ZoneEdit: `dnsu-provider-cpanel` crate
//
// ## Addressing
//
// Records are looked up by (name, type) and then mutated by their zone-file
// line index. The line index is only valid until the next mutation of the
// same zone, so callers must serialize operations per zone.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// DNS record types handled by DNS Updater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// Text record (ACME DNS-01 challenges)
    Txt,
}

impl RecordType {
    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "TXT" => Ok(RecordType::Txt),
            _ => Err(crate::Error::unsupported_record_type(s)),
        }
    }
}

/// A record as stored in the remote zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    /// Zone-file line index; the address used by edit and remove calls
    pub line: u32,
    /// Fully-qualified record name, e.g. `_acme-challenge.example.org.`
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Record value (TXT data or IPv4 address)
    pub value: String,
    /// Time-to-live; 0 means the zone default
    pub ttl: u32,
}

/// Confirmation returned by the remote after a zone mutation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneUpdate {
    /// New zone serial (opaque versioning token)
    pub new_serial: String,
    /// Status message reported by the remote
    pub status_msg: String,
    /// Success flag reported by the remote
    pub status: bool,
}

/// Trait for control-panel implementations
///
/// Implementations are stateless between calls: every method issues exactly
/// one remote request and returns its outcome without retrying.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    /// Look up the first record with the given name and type
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))`: The first matching row reported by the remote
    /// - `Ok(None)`: No such record; this is not an error
    /// - `Err(Error)`: Zone resolution, transport or API failure
    async fn find_record(
        &self,
        fqdn: &str,
        record_type: RecordType,
    ) -> Result<Option<DnsRecord>, crate::Error>;

    /// Add a TXT record
    ///
    /// A `ttl` of 0 lets the server choose its default.
    async fn add_txt_record(
        &self,
        fqdn: &str,
        value: &str,
        ttl: u32,
    ) -> Result<ZoneUpdate, crate::Error>;

    /// Replace the value of an existing record, addressed by its line index
    async fn update_txt_record(
        &self,
        record: &DnsRecord,
        value: &str,
    ) -> Result<ZoneUpdate, crate::Error>;

    /// Remove an existing record, addressed by its line index
    async fn remove_record(&self, record: &DnsRecord) -> Result<ZoneUpdate, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
