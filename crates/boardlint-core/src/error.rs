//! # Error Types
//!
//! Only two conditions may cut a document's validation short: the file
//! cannot be read, or its contents are not JSON. Everything else is a
//! diagnostic in a [`ValidationReport`](crate::ValidationReport).

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a parsed JSON document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document does not exist at the expected path.
    #[error("{name} not found at {}", path.display())]
    NotFound {
        /// File name used in messages (`widgets.json`, `apps.json`).
        name: String,
        /// Full path that was looked up.
        path: PathBuf,
    },

    /// The document exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DocumentError {
    /// Returns true if the document is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
