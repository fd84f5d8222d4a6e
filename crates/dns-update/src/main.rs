// # dns-update
//
// Points a Cloudflare A record at the caller's current public IPv4 address.
// Meant to be run from cron: every run is a single pass.
//
// This binary is a THIN integration layer. All update logic lives in
// dns-update-core; it only:
// 1. Reads settings from environment variables
// 2. Validates the command line
// 3. Wires the ipify source and the Cloudflare provider into the Updater
// 4. Prints progress and the outcome to standard output
//
// ## Usage
//
// ```bash
// dns-update you@example.com your_api_key example.com [home.example.com]
// ```
//
// ## Environment
//
// See `settings.rs`. Logging goes to standard error.
//
// ## Exit Codes
//
// - 0: record updated, already up to date, or usage printed
// - 1: invalid arguments or invalid settings
// - 2: the run failed (discovery, lookup, update)

mod cli;
mod report;
mod settings;

use dns_update_core::{Error, Result, UpdateEvent, Updater, UpdaterConfig, ValidationError};
use dns_update_ip_http::IpifySource;
use dns_update_provider_cloudflare::CloudflareProvider;
use std::env;
use std::io::Write;
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use cli::Invocation;
use settings::Settings;

/// Exit codes for the possible run endings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DnsUpdateExitCode {
    /// Record updated, already current, or usage printed
    Success = 0,
    /// Argument or settings error
    ConfigError = 1,
    /// The run failed
    RuntimeError = 2,
}

impl From<DnsUpdateExitCode> for ExitCode {
    fn from(code: DnsUpdateExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DnsUpdateExitCode::ConfigError.into();
        }
    };

    if let Err(e) = settings.validate() {
        eprintln!("Configuration validation error: {}", e);
        return DnsUpdateExitCode::ConfigError.into();
    }

    let log_level = settings.max_log_level().unwrap_or(tracing::Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DnsUpdateExitCode::ConfigError.into();
    }

    // One request at a time, so one thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DnsUpdateExitCode::RuntimeError.into();
        }
    };

    let args: Vec<String> = env::args().collect();
    let mut stdout = std::io::stdout();

    rt.block_on(execute(args, &settings, &mut stdout)).into()
}

/// Run one invocation, writing all user-facing text to `out`
async fn execute<W: Write>(args: Vec<String>, settings: &Settings, out: &mut W) -> DnsUpdateExitCode {
    let (program, args) = cli::split_program(args);

    let invocation = match Invocation::from_args(&args) {
        Ok(invocation) => invocation,
        Err(Error::Validation(ValidationError::ArgumentCount(count))) => {
            info!("Got {} argument(s), printing usage", count);
            report::emit(out, cli::usage(&program).trim_end());
            return DnsUpdateExitCode::Success;
        }
        Err(e) => {
            report::emit(out, e);
            return DnsUpdateExitCode::ConfigError;
        }
    };

    let (updater, events) = match build_updater(invocation, settings) {
        Ok(parts) => parts,
        Err(e) => {
            report::emit(out, e);
            return DnsUpdateExitCode::ConfigError;
        }
    };

    let (result, ()) = tokio::join!(updater.run(), report::print_progress(events, out));

    match result {
        Ok(outcome) => {
            info!(
                "Record {} moved from {} to {}",
                outcome.record.name, outcome.previous_content, outcome.record.content
            );
            report::emit(out, report::confirmation(&outcome, settings.dry_run));
            DnsUpdateExitCode::Success
        }
        Err(e) if e.is_noop() => {
            report::emit(out, e);
            DnsUpdateExitCode::Success
        }
        Err(e) => {
            error!("Run failed: {:?}", e);
            report::emit(out, e);
            DnsUpdateExitCode::RuntimeError
        }
    }
}

/// Wire the ipify source and the Cloudflare provider into an Updater
fn build_updater(
    invocation: Invocation,
    settings: &Settings,
) -> Result<(Updater, mpsc::Receiver<UpdateEvent>)> {
    let ip_source = IpifySource::with_url(&settings.ip_url, settings.http_timeout())?;
    let provider = CloudflareProvider::new(
        invocation.credentials,
        &settings.api_base,
        settings.http_timeout(),
        settings.dry_run,
    )?;

    if settings.dry_run {
        tracing::warn!("Cloudflare provider running in DRY-RUN mode - no changes will be made");
    }

    Updater::new(
        Box::new(ip_source),
        Box::new(provider),
        UpdaterConfig::new(invocation.target),
    )
}
