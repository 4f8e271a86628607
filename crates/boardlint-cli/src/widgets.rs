//! # Widgets Subcommand
//!
//! Validates the `widgets.json` of one app directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::check::check_widgets;
use crate::report::{render_json, render_widgets};
use crate::{exit_code, resolve_app_dir, OutputFormat};

/// Arguments for `boardlint widgets`.
#[derive(Args, Debug)]
pub struct WidgetsArgs {
    /// App directory, or a file inside it.
    pub app_path: PathBuf,
}

/// Execute the widgets subcommand.
pub fn run_widgets(args: &WidgetsArgs, format: OutputFormat) -> Result<u8> {
    let dir = resolve_app_dir(&args.app_path)?;
    let result = check_widgets(&dir);
    match format {
        OutputFormat::Text => println!("{}", render_widgets(&dir, &result)),
        OutputFormat::Json => println!("{}", render_json(&result)?),
    }
    Ok(exit_code(result.is_valid()))
}
