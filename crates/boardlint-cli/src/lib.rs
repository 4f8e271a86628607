//! # boardlint-cli — Command-Line Front End
//!
//! Provides the `boardlint` binary. Each subcommand validates one aspect of
//! a dashboard app directory, prints a report to stdout, and exits 0 when
//! no errors were found.
//!
//! ## Subcommands
//!
//! - `boardlint widgets <APP_PATH>`: validate `widgets.json`.
//! - `boardlint apps <APP_PATH>`: validate `apps.json` against the widget
//!   identifiers `widgets.json` declares.
//! - `boardlint validate <APP_PATH>`: both, with a combined result.
//! - `boardlint endpoints <APP_PATH> [--base-url URL]`: probe the running
//!   backend for every widget endpoint.
//!
//! ```bash
//! boardlint validate apps/my-app/
//! boardlint --format json widgets apps/my-app/widgets.json
//! boardlint -v endpoints apps/my-app --base-url http://localhost:7779
//! ```

pub mod apps;
pub mod check;
pub mod endpoints;
pub mod report;
pub mod validate;
pub mod widgets;

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::ValueEnum;

/// File name of the widget registry inside an app directory.
pub const WIDGETS_FILE: &str = "widgets.json";

/// File name of the app layout document inside an app directory.
pub const APPS_FILE: &str = "apps.json";

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report blocks.
    #[default]
    Text,
    /// The structured report as pretty-printed JSON.
    Json,
}

/// Resolve the app directory named on the command line.
///
/// The path must exist. A file path (typically one of the app's JSON
/// documents) resolves to its parent directory.
pub fn resolve_app_dir(path: &Path) -> anyhow::Result<PathBuf> {
    if !path.exists() {
        bail!("Path does not exist: {}", path.display());
    }
    if path.is_dir() {
        return Ok(path.to_path_buf());
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Ok(PathBuf::from(".")),
    }
}

/// Map a validity flag to the process exit code.
pub fn exit_code(valid: bool) -> u8 {
    if valid {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_app_dir(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().starts_with("Path does not exist: "));
    }

    #[test]
    fn directory_resolves_to_itself() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_app_dir(dir.path()).unwrap(), dir.path());
    }

    #[test]
    fn file_resolves_to_its_parent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(WIDGETS_FILE);
        std::fs::write(&file, "{}").unwrap();
        assert_eq!(resolve_app_dir(&file).unwrap(), dir.path());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(true), 0);
        assert_eq!(exit_code(false), 1);
    }
}
