// # cPanel Zone Provider
//
// This crate provides the cPanel implementation of `ZoneProvider` and the
// three operations an ACME client expects from an external DNS-01 program:
// `present`, `cleanup` and `domain_info`.
//
// ## Protocol
//
// cPanel API2 over JSON: one authenticated GET per call to
// `<panel>/json-api/cpanel` with
//
// - `cpanel_jsonapi_user`, `cpanel_jsonapi_apiversion=2`,
//   `cpanel_jsonapi_module`, `cpanel_jsonapi_func`
// - function arguments (`domain`, `type`, `name`, `txtdata`, `line`, `ttl`)
// - `Authorization: cpanel <user>:<token>`
//
// Errors frequently arrive as HTTP 200 with `cpanelresult.data.reason`; the
// transport resolves those before any caller sees result rows.
//
// ## Constraints
//
// - One lookup and at most one mutation per operation
// - NO retry logic, NO caching, NO background tasks
// - Edits and removals address rows by line index, which another writer can
//   shift; operations against the same zone must be serialized by the caller
//
// ## Security Requirements
//
// - API token NEVER appears in logs, URLs or Debug output
// - Client construction fails fast on a missing URL, username or token
// - Certificate verification is on unless `TlsMode::AcceptInvalid` is chosen

pub mod client;
pub mod domain_lookup;
pub mod zone_edit;

pub use client::CpanelClient;

use dnsu_core::{
    CleanupResult, EndpointConfig, Error, InfoResult, PresentResult, Result, ZoneEngine,
};

/// Build a reconciliation engine backed by a cPanel client
pub fn engine(config: &EndpointConfig) -> Result<ZoneEngine> {
    let client = CpanelClient::new(config).map_err(|e| match e {
        Error::Config(msg) => {
            Error::config(format!("couldn't create remote cPanel API client: {msg}"))
        }
        other => other,
    })?;
    Ok(ZoneEngine::new(Box::new(client)))
}

/// Create or update the TXT record `domain` so that it carries `key_auth`
///
/// `domain` is expected to be fully qualified with a trailing dot. A `ttl`
/// of 0 lets the server pick its default for newly created records.
pub async fn present(
    domain: &str,
    key_auth: &str,
    ttl: u32,
    config: &EndpointConfig,
) -> Result<PresentResult> {
    engine(config)?.with_ttl(ttl).present(domain, key_auth).await
}

/// Remove the TXT record `domain` if it exists
pub async fn cleanup(domain: &str, config: &EndpointConfig) -> Result<CleanupResult> {
    engine(config)?.cleanup(domain).await
}

/// Report the A record `domain`
pub async fn domain_info(domain: &str, config: &EndpointConfig) -> Result<InfoResult> {
    engine(config)?.domain_info(domain).await
}

/// List the base domains of the account
pub async fn base_domains(config: &EndpointConfig) -> Result<Vec<String>> {
    CpanelClient::new(config)?.base_domains().await
}
