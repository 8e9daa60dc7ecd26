// # dnsu - DNS Updater
//
// Thin command-line layer over `dnsu-provider-cpanel`. ACME clients run it
// as an external DNS-01 program:
//
//   dnsu cpanel [flags] present <domain> <auth-key>
//   dnsu cpanel [flags] cleanup <domain> [auth-key]
//
// The binary is responsible for:
// 1. Resolving flags and environment variables
// 2. Choosing the log destination
// 3. Normalizing domain arguments to a trailing root dot
// 4. Rendering outcomes and mapping errors to exit codes
//
// It contains no DNS logic. All lookups and mutations live in the
// library crates.
//
// ## Log output
//
// `--logoutput` / `DNSU_LOG-OUTPUT`:
// - unset: append to `dnsu.log` in the working directory
// - `stdout` or `stderr`: write to that stream
// - anything else: append to that file path

mod cli;

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use dnsu_core::{
    CleanupResult, EndpointConfig, InfoResult, PresentResult, ZoneUpdate, config::TlsMode,
};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::{Action, CpanelArgs, Cli, Command, normalize_fqdn};

/// Log file used when no destination is configured
const DEFAULT_LOG_FILE: &str = "dnsu.log";

/// Exit codes for the possible outcomes of an invocation
///
/// - 0: Success, including no-op and not-found outcomes
/// - 1: Configuration or usage error
/// - 2: The operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DnsuExitCode {
    /// Operation completed (or help/version was printed)
    Success = 0,
    /// Missing or invalid configuration, bad arguments
    ConfigError = 1,
    /// Transport, API or decode failure
    OperationFailed = 2,
}

impl From<DnsuExitCode> for ExitCode {
    fn from(code: DnsuExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are rendered through the error path too
            let code = if e.use_stderr() {
                DnsuExitCode::ConfigError
            } else {
                DnsuExitCode::Success
            };
            let _ = e.print();
            return code.into();
        }
    };

    println!("\nDNS Updater v{}\n", env!("CARGO_PKG_VERSION"));

    let Command::Cpanel(args) = cli.command;

    if let Err(e) = init_tracing(args.log_output.as_deref(), args.log_level) {
        eprintln!("Error: {e:#}");
        return DnsuExitCode::ConfigError.into();
    }

    let endpoint = args.endpoint();
    if let Err(e) = endpoint.validate() {
        println!(
            "Error: cpanel command must have the flags '--url', '--user' and '--token' \
             or the corresponding environment variables ({e})"
        );
        error!("{}", e);
        return DnsuExitCode::ConfigError.into();
    }

    if endpoint.tls == TlsMode::AcceptInvalid {
        warn!("Running with TLS certificate verification disabled");
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            println!("Error: failed to create tokio runtime: {e}");
            error!("Failed to create tokio runtime: {}", e);
            return DnsuExitCode::OperationFailed.into();
        }
    };

    let code = match rt.block_on(run(args, &endpoint)) {
        Ok(()) => DnsuExitCode::Success,
        Err(e) => {
            println!("Error: {e}");
            error!("{}", e);
            if e.is_config() {
                DnsuExitCode::ConfigError
            } else {
                DnsuExitCode::OperationFailed
            }
        }
    };

    code.into()
}

/// Install the global fmt subscriber writing to the selected destination
fn init_tracing(output: Option<&str>, level: Level) -> Result<()> {
    let (writer, ansi) = match output.map(str::trim).filter(|o| !o.is_empty()) {
        Some("stdout") => (BoxMakeWriter::new(std::io::stdout), true),
        Some("stderr") => (BoxMakeWriter::new(std::io::stderr), true),
        path => {
            let path = path.unwrap_or(DEFAULT_LOG_FILE);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{path}'"))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

/// Run the requested action and report its outcome
async fn run(args: CpanelArgs, endpoint: &EndpointConfig) -> dnsu_core::Result<()> {
    match args.action {
        Action::Info { domain } => {
            let domain = normalize_fqdn(&domain);
            match dnsu_provider_cpanel::domain_info(&domain, endpoint).await? {
                InfoResult::Found { name, address } => {
                    report(&format!("Found 'A type' record: {name} / {address}"));
                }
                InfoResult::NotFound => {
                    println!(
                        "Record not found for {domain}. This subcommand is only for 'A Type' records."
                    );
                    warn!("A record not found for {}", domain);
                }
            }
        }

        Action::Present {
            domain,
            key_auth,
            ttl,
        } => {
            let domain = normalize_fqdn(&domain);
            match dnsu_provider_cpanel::present(&domain, &key_auth, ttl, endpoint).await? {
                PresentResult::Created { update } => {
                    report(&format!(
                        "TXT record for {domain} added. Newserial: {}",
                        update.new_serial
                    ));
                    check_status(&domain, &update);
                }
                PresentResult::Updated {
                    line, name, update, ..
                } => {
                    report(&format!(
                        "TXT record {name} (line {line}) updated for {domain}. Newserial: {}",
                        update.new_serial
                    ));
                    check_status(&domain, &update);
                }
                PresentResult::Unchanged => {
                    report(&format!(
                        "TXT record with the same value already exists for {domain}. No update required."
                    ));
                }
            }
        }

        Action::Cleanup { domain, .. } => {
            let domain = normalize_fqdn(&domain);
            match dnsu_provider_cpanel::cleanup(&domain, endpoint).await? {
                CleanupResult::Removed { line, update } => {
                    report(&format!(
                        "{domain} TXT record removed from line {line}. Newserial: {}",
                        update.new_serial
                    ));
                    check_status(&domain, &update);
                }
                CleanupResult::NotFound => {
                    report(&format!("TXT record not found for {domain}"));
                }
                CleanupResult::Skipped { found } => {
                    report(&format!(
                        "TXT record lookup for {domain} returned {found}. Nothing removed."
                    ));
                }
            }
        }

        Action::Domains => {
            let domains = dnsu_provider_cpanel::base_domains(endpoint).await?;
            info!("Account has {} base domain(s)", domains.len());
            for domain in domains {
                println!("{domain}");
            }
        }
    }

    Ok(())
}

/// One stdout line and one log line per outcome
fn report(message: &str) {
    println!("{message}");
    info!("{}", message);
}

/// cPanel can confirm a mutation with `status: 0`; surface it without failing
fn check_status(domain: &str, update: &ZoneUpdate) {
    if !update.status {
        println!("Warning: cPanel reported status 0 for {domain}: {}", update.status_msg);
        warn!(
            "cPanel reported status 0 for {}: {}",
            domain, update.status_msg
        );
    }
}
