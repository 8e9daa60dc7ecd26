//! Command-line definitions for `dnsu`.
//!
//! Every connection flag falls back to an environment variable so ACME
//! clients that only forward the environment can still drive the tool.

use clap::{Args, Parser, Subcommand};
use dnsu_core::config::DEFAULT_TIMEOUT_SECS;
use dnsu_core::{EndpointConfig, TlsMode};
use tracing::Level;

const AFTER_HELP: &str = "\
Supported Environment Variables:
  DNSU_LOG-OUTPUT         log destination (file path, stdout or stderr)
  DNSU_LOG-LEVEL          log level (trace, debug, info, warn, error)
  DNSU_CPANEL-URL         cPanel URL
  DNSU_CPANEL-USER        cPanel user
  DNSU_CPANEL-TOKEN       cPanel API token
  DNSU_CPANEL-INSECURE    accept invalid TLS certificates
  DNSU_CPANEL-TIMEOUT     request timeout in seconds

Example:
  # verify cPanel access
  dnsu cpanel --url \"https://cpanel-hostname:2083\" --user cpaneluser \\
    --token \"RMYKKBIT5TQ1ITFU58VZBQB5TDEYQZN4\" info '_acme-challenge.my.example.org.'

DNS Updater: https://dnsupdater.github.io";

/// DNS Updater provides the "present" and "cleanup" functions that ACME
/// clients expect from an external DNS-01 program.
#[derive(Parser, Debug)]
#[command(name = "dnsu", version, about, after_help = AFTER_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage records through the cPanel API
    #[command(after_help = AFTER_HELP)]
    Cpanel(CpanelArgs),
}

#[derive(Args, Debug)]
pub struct CpanelArgs {
    /// cPanel URL (e.g. https://cpanel-hostname:2083)
    #[arg(long, env = "DNSU_CPANEL-URL")]
    pub url: Option<String>,

    /// cPanel user
    #[arg(long, env = "DNSU_CPANEL-USER")]
    pub user: Option<String>,

    /// cPanel API token
    #[arg(long, env = "DNSU_CPANEL-TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log destination: a file path, `stdout` or `stderr` (default: dnsu.log)
    #[arg(long = "logoutput", env = "DNSU_LOG-OUTPUT")]
    pub log_output: Option<String>,

    /// Log level
    #[arg(long, env = "DNSU_LOG-LEVEL", default_value = "info")]
    pub log_level: Level,

    /// Accept invalid TLS certificates (self-signed panels)
    #[arg(long, env = "DNSU_CPANEL-INSECURE")]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "DNSU_CPANEL-TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Show the A record of a domain
    Info {
        /// Domain name of the A record
        domain: String,
    },

    /// Create or update the TXT record of a domain
    Present {
        /// Domain name of the TXT record
        domain: String,

        /// Value to store (the ACME key authorization)
        key_auth: String,

        /// TTL for a newly created record (0 = zone default)
        #[arg(long, default_value_t = 0)]
        ttl: u32,
    },

    /// Remove the TXT record of a domain
    Cleanup {
        /// Domain name of the TXT record
        domain: String,

        /// Accepted for ACME client compatibility and ignored
        key_auth: Option<String>,
    },

    /// List the base domains of the account
    Domains,
}

impl CpanelArgs {
    /// Endpoint configuration from the resolved flags
    ///
    /// Missing values become empty strings so that validation reports them.
    pub fn endpoint(&self) -> EndpointConfig {
        let tls = if self.insecure {
            TlsMode::AcceptInvalid
        } else {
            TlsMode::Verify
        };

        EndpointConfig::new(
            self.url.clone().unwrap_or_default(),
            self.user.clone().unwrap_or_default(),
            self.token.clone().unwrap_or_default(),
        )
        .with_tls(tls)
        .with_timeout_secs(self.timeout)
    }
}

/// Append the root label dot if it is missing
pub fn normalize_fqdn(domain: &str) -> String {
    let domain = domain.trim();
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}
