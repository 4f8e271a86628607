//! # Validate Subcommand
//!
//! Runs both static validators over an app directory and prints the
//! combined result. The run fails when either document has an error.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::check::check_app;
use crate::report::{render_check, render_json};
use crate::{exit_code, resolve_app_dir, OutputFormat};

/// Arguments for `boardlint validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// App directory, or a file inside it.
    pub app_path: PathBuf,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, format: OutputFormat) -> Result<u8> {
    let dir = resolve_app_dir(&args.app_path)?;
    let check = check_app(&dir);
    tracing::info!(
        errors = check.error_count(),
        warnings = check.warning_count(),
        "app validated"
    );
    match format {
        OutputFormat::Text => println!("{}", render_check(&dir, &check)),
        OutputFormat::Json => println!("{}", render_json(&check)?),
    }
    Ok(exit_code(check.is_valid()))
}
