//! # boardlint CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Reports go to stdout; logs go to stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use boardlint_cli::apps::{run_apps, AppsArgs};
use boardlint_cli::endpoints::{run_endpoints, EndpointsArgs};
use boardlint_cli::validate::{run_validate, ValidateArgs};
use boardlint_cli::widgets::{run_widgets, WidgetsArgs};
use boardlint_cli::OutputFormat;

/// boardlint: validate a dashboard app's widget registry and layouts.
///
/// Checks `widgets.json` and `apps.json` of an app directory for structural
/// problems, and optionally probes the running backend for every widget
/// endpoint.
#[derive(Parser, Debug)]
#[command(name = "boardlint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate widgets.json.
    Widgets(WidgetsArgs),

    /// Validate apps.json against the widgets declared in widgets.json.
    Apps(AppsArgs),

    /// Validate widgets.json and apps.json with a combined result.
    Validate(ValidateArgs),

    /// Probe the running backend for every widget endpoint.
    Endpoints(EndpointsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("boardlint {} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Widgets(args) => run_widgets(&args, cli.format),
        Commands::Apps(args) => run_apps(&args, cli.format),
        Commands::Validate(args) => run_validate(&args, cli.format),
        Commands::Endpoints(args) => run_endpoints(&args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
