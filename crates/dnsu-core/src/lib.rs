// # dnsu-core
//
// Core library for DNS Updater, the "present"/"cleanup" helper that ACME
// clients call as an external DNS-01 provider.
//
// ## Architecture Overview
//
// - **ZoneProvider**: Trait for looking up and mutating records through a
//   control-panel API (implemented by `dnsu-provider-cpanel`)
// - **ZoneEngine**: Composes lookup and mutation into the idempotent
//   present / cleanup / info workflows
// - **effective_zone**: Maps a record name to its registrable zone
// - **EndpointConfig**: Validated endpoint identity (URL, user, token, TLS)
//
// ## Design Principles
//
// 1. **Stateless**: Nothing persists between invocations; the remote zone is
//    the only source of truth
// 2. **Single-shot**: One lookup and at most one mutation per workflow, no
//    retries
// 3. **Not found is not an error**: Lookups return `Option`
// 4. **Outcomes as values**: The engine returns results, the binary reports them

pub mod config;
pub mod engine;
pub mod error;
pub mod traits;
pub mod zone;

// Re-export core types for convenience
pub use config::{EndpointConfig, TlsMode};
pub use engine::{CleanupResult, InfoResult, PresentResult, ZoneEngine};
pub use error::{Error, Result};
pub use traits::{DnsRecord, RecordType, ZoneProvider, ZoneUpdate};
pub use zone::effective_zone;
