//! # Apps Subcommand
//!
//! Validates the `apps.json` of one app directory. `widgets.json` is
//! validated first to collect the identifiers layouts may reference, but
//! only the apps report is printed and only its errors decide the exit
//! code.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::check::{check_apps, check_widgets};
use crate::report::{render_apps, render_json};
use crate::{exit_code, resolve_app_dir, OutputFormat};

/// Arguments for `boardlint apps`.
#[derive(Args, Debug)]
pub struct AppsArgs {
    /// App directory, or a file inside it.
    pub app_path: PathBuf,
}

/// Execute the apps subcommand.
pub fn run_apps(args: &AppsArgs, format: OutputFormat) -> Result<u8> {
    let dir = resolve_app_dir(&args.app_path)?;
    let widgets = check_widgets(&dir);
    let result = check_apps(&dir, &widgets);
    match format {
        OutputFormat::Text => println!("{}", render_apps(&dir, &result)),
        OutputFormat::Json => println!("{}", render_json(&result)?),
    }
    Ok(exit_code(result.is_valid()))
}
