//! Configuration types for DNS Updater
//!
//! The endpoint configuration is resolved by the command-line layer (flags
//! with environment fallback) and validated here before any network call.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TLS certificate verification mode for the control-panel endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsMode {
    /// Verify certificates against the system trust store
    #[default]
    Verify,
    /// Accept any certificate (self-signed panel installs)
    AcceptInvalid,
}

/// Control-panel endpoint identity
///
/// # Security
///
/// The Debug implementation does NOT expose the API token.
#[derive(Clone, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the panel, e.g. `https://cpanel.example.org:2083`
    pub url: String,

    /// Account username
    pub username: String,

    /// API token
    /// ⚠️ NEVER log this value
    pub api_token: String,

    /// TLS verification mode
    #[serde(default)]
    pub tls: TlsMode,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("api_token", &"<REDACTED>")
            .field("tls", &self.tls)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EndpointConfig {
    /// Create a new endpoint configuration with certificate verification
    /// enabled and the default timeout
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            api_token: api_token.into(),
            tls: TlsMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the TLS verification mode
    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration and return the parsed base URL
    pub fn validate(&self) -> Result<Url, crate::Error> {
        if self.url.is_empty() || self.username.is_empty() || self.api_token.is_empty() {
            return Err(crate::Error::config(
                "not all required details (URL, username, token) were provided",
            ));
        }

        let url = Url::parse(&self.url)
            .map_err(|_| crate::Error::config(format!("'{}' is not a URL", self.url)))?;

        match url.host_str() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(crate::Error::config(format!("'{}' is not a URL", self.url))),
        }

        if self.timeout_secs == 0 {
            return Err(crate::Error::config("timeout must be > 0"));
        }

        Ok(url)
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
