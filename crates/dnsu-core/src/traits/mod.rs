//! Core traits for DNS Updater
//!
//! - [`ZoneProvider`]: Look up and mutate records through a control-panel API

pub mod zone_provider;

pub use zone_provider::{DnsRecord, RecordType, ZoneProvider, ZoneUpdate};
