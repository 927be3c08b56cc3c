//! `fleetdeck-tui` — terminal console for the tracking service.
//!
//! Built on [ratatui](https://ratatui.rs). Screens are navigable via number
//! keys (1-3): Devices, Warehouses, Alerts. Lists fetch on demand from the
//! service; there is no background refresh and no cache.
//!
//! Logs are written to a file (default `/tmp/fleetdeck-tui.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleetdeck_core::{Console, ConsoleConfig, TlsVerification};

use crate::app::App;

/// Terminal console for tracking devices, warehouses, and vehicle alerts.
#[derive(Parser, Debug)]
#[command(name = "fleetdeck-tui", version, about)]
struct Cli {
    /// Service API root URL (e.g., https://track.example.com/api)
    #[arg(short = 'u', long, env = "FLEETDECK_API_URL")]
    api_url: Option<String>,

    /// API key
    #[arg(short = 'k', long, env = "FLEETDECK_API_KEY")]
    api_key: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, env = "FLEETDECK_INSECURE")]
    insecure: bool,

    /// Log file path (defaults to /tmp/fleetdeck-tui.log)
    #[arg(long, default_value = "/tmp/fleetdeck-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fleetdeck_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("fleetdeck-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Build a [`Console`] from CLI args, if a URL was provided.
fn build_console(cli: &Cli) -> Option<Console> {
    let url_str = cli.api_url.as_deref()?;
    let api_url = url_str.parse().ok()?;

    let config = ConsoleConfig {
        api_url,
        api_key: cli.api_key.clone().map(SecretString::from),
        tls: if cli.insecure {
            TlsVerification::DangerAcceptInvalid
        } else {
            TlsVerification::SystemDefaults
        },
        timeout: std::time::Duration::from_secs(30),
    };

    Console::new(&config).ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        url = cli.api_url.as_deref().unwrap_or("(not set)"),
        "starting fleetdeck-tui"
    );

    let console = build_console(&cli);
    let mut app = App::new(console);
    app.run().await?;

    Ok(())
}
