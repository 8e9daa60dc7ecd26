//! Reconciliation engine
//!
//! The ZoneEngine composes record lookup and record mutation into the three
//! workflows an ACME DNS-01 external provider must offer:
//!
//! - **present**: idempotent upsert of the challenge TXT record
//! - **cleanup**: idempotent removal of the challenge TXT record
//! - **domain_info**: read-only A record lookup
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐   find_record    ┌──────────────┐
//! │ ZoneEngine  │ ───────────────▶ │ ZoneProvider │
//! │             │ ◀─────────────── │              │
//! │  (decide)   │   Option<Record> │              │
//! │             │                  │              │
//! │             │ add/update/remove│              │
//! │             │ ───────────────▶ │              │
//! └─────────────┘   ZoneUpdate     └──────────────┘
//! ```
//!
//! Each workflow issues one lookup and at most one mutation. Errors are
//! propagated unchanged; nothing is retried or rolled back. Results are
//! returned as values so the caller decides how to report them.

use crate::error::Result;
use crate::traits::{DnsRecord, RecordType, ZoneProvider, ZoneUpdate};
use tracing::{debug, info, warn};

/// Outcome of [`ZoneEngine::present`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentResult {
    /// No record existed; a new one was added
    Created {
        /// Remote confirmation
        update: ZoneUpdate,
    },
    /// An existing record was rewritten with the new value
    Updated {
        /// Line index that was edited
        line: u32,
        /// Name of the record that was edited
        name: String,
        /// Value before the edit
        previous_value: String,
        /// Remote confirmation
        update: ZoneUpdate,
    },
    /// The record already carried the requested value (no-op)
    Unchanged,
}

/// Outcome of [`ZoneEngine::cleanup`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    /// The record was removed
    Removed {
        /// Line index that was removed
        line: u32,
        /// Remote confirmation
        update: ZoneUpdate,
    },
    /// No record existed (no-op)
    NotFound,
    /// The lookup returned a record with a different name; left untouched
    Skipped {
        /// Name of the record the remote returned
        found: String,
    },
}

/// Outcome of [`ZoneEngine::domain_info`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoResult {
    /// An A record exists
    Found {
        /// Record name
        name: String,
        /// IPv4 address
        address: String,
    },
    /// No A record exists (not an error)
    NotFound,
}

/// Reconciliation engine over a single [`ZoneProvider`]
///
/// The engine holds no state between calls. Concurrent invocations against
/// the same zone are not coordinated: edits and removals address rows by a
/// line index captured from the preceding lookup, and another writer can
/// shift that index in between.
pub struct ZoneEngine {
    /// Provider used for lookups and mutations
    provider: Box<dyn ZoneProvider>,

    /// TTL for newly added records (0 = zone default)
    ttl: u32,
}

impl ZoneEngine {
    /// Create a new engine over the given provider
    pub fn new(provider: Box<dyn ZoneProvider>) -> Self {
        Self { provider, ttl: 0 }
    }

    /// Set the TTL used when a record has to be created
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Make sure a TXT record `fqdn` carries `value`
    ///
    /// 1. Not found → add
    /// 2. Found with the same value and exactly the same name → no-op
    /// 3. Otherwise → edit the returned row in place
    ///
    /// A lookup may return a record of another name in the same zone; that
    /// candidate is edited rather than skipped.
    pub async fn present(&self, fqdn: &str, value: &str) -> Result<PresentResult> {
        debug!(
            "present: looking up TXT record {} via {}",
            fqdn,
            self.provider.provider_name()
        );

        let Some(record) = self.provider.find_record(fqdn, RecordType::Txt).await? else {
            let update = self.provider.add_txt_record(fqdn, value, self.ttl).await?;
            info!(
                "TXT record for {} added. Newserial: {}",
                fqdn, update.new_serial
            );
            return Ok(PresentResult::Created { update });
        };

        if record.value == value && record.name == fqdn {
            debug!("TXT record for {} already carries the requested value", fqdn);
            return Ok(PresentResult::Unchanged);
        }

        if record.name != fqdn {
            warn!(
                "lookup for {} returned {} (line {}); editing the returned record",
                fqdn, record.name, record.line
            );
        }

        let update = self.provider.update_txt_record(&record, value).await?;
        info!(
            "TXT record for {} updated at line {}. Newserial: {}",
            record.name, record.line, update.new_serial
        );

        let DnsRecord {
            line,
            name,
            value: previous_value,
            ..
        } = record;

        Ok(PresentResult::Updated {
            line,
            name,
            previous_value,
            update,
        })
    }

    /// Make sure no TXT record `fqdn` exists
    ///
    /// 1. Not found → no-op
    /// 2. Found with exactly the same name → remove
    /// 3. Found under another name → leave untouched
    pub async fn cleanup(&self, fqdn: &str) -> Result<CleanupResult> {
        debug!(
            "cleanup: looking up TXT record {} via {}",
            fqdn,
            self.provider.provider_name()
        );

        let Some(record) = self.provider.find_record(fqdn, RecordType::Txt).await? else {
            debug!("TXT record not found for {}", fqdn);
            return Ok(CleanupResult::NotFound);
        };

        if record.name != fqdn {
            warn!(
                "lookup for {} returned {} (line {}); leaving it untouched",
                fqdn, record.name, record.line
            );
            return Ok(CleanupResult::Skipped { found: record.name });
        }

        let update = self.provider.remove_record(&record).await?;
        info!(
            "TXT record {} removed from line {}. Newserial: {}",
            fqdn, record.line, update.new_serial
        );

        Ok(CleanupResult::Removed {
            line: record.line,
            update,
        })
    }

    /// Report the A record for `fqdn`
    pub async fn domain_info(&self, fqdn: &str) -> Result<InfoResult> {
        debug!(
            "info: looking up A record {} via {}",
            fqdn,
            self.provider.provider_name()
        );

        match self.provider.find_record(fqdn, RecordType::A).await? {
            Some(record) => Ok(InfoResult::Found {
                name: record.name,
                address: record.value,
            }),
            None => Ok(InfoResult::NotFound),
        }
    }
}
