//! # Endpoints Subcommand
//!
//! Probes the running backend of an app: liveness, the core documents, and
//! every widget endpoint declared in `widgets.json`.
//!
//! The base URL comes from `--base-url`, else `BOARDLINT_BASE_URL`, else
//! `http://localhost:7779`. Probing runs on a current-thread tokio runtime
//! built for the one command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use boardlint_probe::config::parse_base_url;
use boardlint_probe::{EndpointProber, ProbeConfig, ProbeReport};
use boardlint_widgets::WidgetRegistry;

use crate::report::{render_json, render_probe};
use crate::{exit_code, resolve_app_dir, OutputFormat, WIDGETS_FILE};

/// Arguments for `boardlint endpoints`.
#[derive(Args, Debug)]
pub struct EndpointsArgs {
    /// App directory, or a file inside it.
    pub app_path: PathBuf,

    /// Base URL of the running backend. Overrides BOARDLINT_BASE_URL.
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Build the probe configuration from the environment and flags.
pub fn probe_config(args: &EndpointsArgs) -> Result<ProbeConfig> {
    let config = ProbeConfig::from_env()?;
    Ok(match &args.base_url {
        Some(raw) => config.with_base_url(parse_base_url("--base-url", raw)?),
        None => config,
    })
}

/// Load the registry in `dir` and probe every endpoint it declares.
///
/// A registry that cannot be loaded is reported as a single error without
/// contacting the backend.
pub async fn probe_app(dir: &Path, config: ProbeConfig) -> Result<ProbeReport> {
    let registry = match WidgetRegistry::load(&dir.join(WIDGETS_FILE)) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "widget registry not loaded");
            let mut out = ProbeReport {
                base_url: config.display_base().to_string(),
                ..ProbeReport::default()
            };
            out.report.document_error(e.to_string());
            return Ok(out);
        }
    };

    let prober = EndpointProber::new(config).context("failed to build HTTP client")?;
    Ok(prober.probe_registry(&registry).await)
}

/// Execute the endpoints subcommand.
pub fn run_endpoints(args: &EndpointsArgs, format: OutputFormat) -> Result<u8> {
    let dir = resolve_app_dir(&args.app_path)?;
    let config = probe_config(args)?;
    tracing::debug!(base_url = config.display_base(), "probing endpoints");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let probe = runtime.block_on(probe_app(&dir, config))?;

    match format {
        OutputFormat::Text => println!("{}", render_probe(&dir, &probe)),
        OutputFormat::Json => println!("{}", render_json(&probe)?),
    }
    Ok(exit_code(probe.is_valid()))
}
