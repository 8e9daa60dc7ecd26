//! Zone resolution
//!
//! The control-panel API indexes records by zone (the registrable domain),
//! not by arbitrary subdomain, so every call first maps the record name to
//! its eTLD+1 using the public suffix list.

use crate::error::{Error, Result};

/// Strip a trailing root-label dot, if any
pub fn trim_root(fqdn: &str) -> &str {
    fqdn.strip_suffix('.').unwrap_or(fqdn)
}

/// Derive the registrable zone for a fully-qualified name
///
/// `_acme-challenge.sub.example.co.uk.` resolves to `example.co.uk`. The
/// result is the same with or without the trailing dot.
///
/// # Errors
///
/// `Error::InvalidDomain` when the name has no recognizable public suffix
/// or is itself a public suffix.
pub fn effective_zone(fqdn: &str) -> Result<String> {
    let name = trim_root(fqdn.trim()).to_ascii_lowercase();
    if name.is_empty() || name.split('.').any(str::is_empty) {
        return Err(Error::invalid_domain(fqdn));
    }

    psl::domain_str(&name)
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_domain(fqdn))
}
