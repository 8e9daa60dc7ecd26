//! Test doubles and common utilities for reconciliation contract tests
//!
//! `MockZoneProvider` keeps an in-memory zone addressed by line index and
//! records every mutation it receives, so tests can assert exactly which
//! remote calls a workflow would have issued.

use dnsu_core::error::{Error, Result};
use dnsu_core::traits::{DnsRecord, RecordType, ZoneProvider, ZoneUpdate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A mutation observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Add { name: String, value: String, ttl: u32 },
    Update { line: u32, value: String },
    Remove { line: u32 },
}

/// In-memory zone provider that tracks calls
pub struct MockZoneProvider {
    /// Zone rows, ordered by line
    zone: Arc<Mutex<Vec<DnsRecord>>>,
    /// Mutations received, in order
    mutations: Arc<Mutex<Vec<Mutation>>>,
    /// Call counter for find_record()
    find_call_count: Arc<AtomicUsize>,
    /// Current zone serial
    serial: Arc<AtomicUsize>,
    /// Return the first row of the requested type regardless of name
    match_any_name: bool,
    /// Fail lookups with this API reason
    lookup_error: Option<String>,
    /// Fail mutations with an empty response
    fail_mutations: bool,
}

impl MockZoneProvider {
    pub fn new() -> Self {
        Self {
            zone: Arc::new(Mutex::new(Vec::new())),
            mutations: Arc::new(Mutex::new(Vec::new())),
            find_call_count: Arc::new(AtomicUsize::new(0)),
            serial: Arc::new(AtomicUsize::new(2021050400)),
            match_any_name: false,
            lookup_error: None,
            fail_mutations: false,
        }
    }

    /// Pre-populate the zone with a record at the next free line
    pub fn with_record(self, name: &str, record_type: RecordType, value: &str) -> Self {
        {
            let mut zone = self.zone.lock().unwrap();
            let line = next_line(&zone);
            zone.push(DnsRecord {
                line,
                name: name.to_string(),
                record_type,
                value: value.to_string(),
                ttl: 14400,
            });
        }
        self
    }

    /// Emulate a remote that answers lookups with any row of the zone
    pub fn matching_any_name(mut self) -> Self {
        self.match_any_name = true;
        self
    }

    /// Make every lookup fail with an API error
    pub fn failing_lookups(mut self, reason: &str) -> Self {
        self.lookup_error = Some(reason.to_string());
        self
    }

    /// Make every mutation fail with an empty response
    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    /// Create a new mock that shares zone and counters with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            zone: Arc::clone(&other.zone),
            mutations: Arc::clone(&other.mutations),
            find_call_count: Arc::clone(&other.find_call_count),
            serial: Arc::clone(&other.serial),
            match_any_name: other.match_any_name,
            lookup_error: other.lookup_error.clone(),
            fail_mutations: other.fail_mutations,
        }
    }

    /// Get the mutations received so far
    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    /// Get the number of mutations received so far
    pub fn mutation_count(&self) -> usize {
        self.mutations.lock().unwrap().len()
    }

    /// Get the number of times find_record() was called
    pub fn find_call_count(&self) -> usize {
        self.find_call_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the zone rows
    pub fn records(&self) -> Vec<DnsRecord> {
        self.zone.lock().unwrap().clone()
    }

    fn confirm(&self) -> ZoneUpdate {
        let serial = self.serial.fetch_add(1, Ordering::SeqCst) + 1;
        ZoneUpdate {
            new_serial: serial.to_string(),
            status_msg: String::new(),
            status: true,
        }
    }
}

fn next_line(zone: &[DnsRecord]) -> u32 {
    zone.iter().map(|r| r.line).max().map_or(20, |line| line + 1)
}

#[async_trait::async_trait]
impl ZoneProvider for MockZoneProvider {
    async fn find_record(&self, fqdn: &str, record_type: RecordType) -> Result<Option<DnsRecord>> {
        self.find_call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.lookup_error {
            return Err(Error::api("ZoneEdit", "fetchzone_records", reason.clone()));
        }

        let zone = self.zone.lock().unwrap();
        Ok(zone
            .iter()
            .find(|r| r.record_type == record_type && (self.match_any_name || r.name == fqdn))
            .cloned())
    }

    async fn add_txt_record(&self, fqdn: &str, value: &str, ttl: u32) -> Result<ZoneUpdate> {
        self.mutations.lock().unwrap().push(Mutation::Add {
            name: fqdn.to_string(),
            value: value.to_string(),
            ttl,
        });
        if self.fail_mutations {
            return Err(Error::empty_response("ZoneEdit", "add_zone_record"));
        }

        let mut zone = self.zone.lock().unwrap();
        let line = next_line(&zone);
        zone.push(DnsRecord {
            line,
            name: fqdn.to_string(),
            record_type: RecordType::Txt,
            value: value.to_string(),
            ttl: if ttl > 0 { ttl } else { 14400 },
        });
        Ok(self.confirm())
    }

    async fn update_txt_record(&self, record: &DnsRecord, value: &str) -> Result<ZoneUpdate> {
        self.mutations.lock().unwrap().push(Mutation::Update {
            line: record.line,
            value: value.to_string(),
        });
        if self.fail_mutations {
            return Err(Error::empty_response("ZoneEdit", "edit_zone_record"));
        }

        let mut zone = self.zone.lock().unwrap();
        if let Some(row) = zone.iter_mut().find(|r| r.line == record.line) {
            row.value = value.to_string();
        }
        Ok(self.confirm())
    }

    async fn remove_record(&self, record: &DnsRecord) -> Result<ZoneUpdate> {
        self.mutations
            .lock()
            .unwrap()
            .push(Mutation::Remove { line: record.line });
        if self.fail_mutations {
            return Err(Error::empty_response("ZoneEdit", "remove_zone_record"));
        }

        // Later rows move up one line, like in a zone file
        let mut zone = self.zone.lock().unwrap();
        zone.retain(|r| r.line != record.line);
        for row in zone.iter_mut().filter(|r| r.line > record.line) {
            row.line -= 1;
        }
        Ok(self.confirm())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
