//! # Diagnostics
//!
//! Two severities only. Errors fail a run; warnings never do. A report
//! keeps errors and warnings in the order they were found so that
//! re-validating the same documents yields identical output.

use std::fmt;

use serde::Serialize;

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Counts toward validation failure.
    Error,
    /// Informational; never fails a run.
    Warning,
}

impl Severity {
    /// Lowercase label used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, optionally anchored to a location in a document.
///
/// Locations are resolvable paths such as `market_overview` (a widget id)
/// or `app[0].tabs.overview.layout[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "[{loc}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Ordered error and warning lists for one validated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Create an empty (passing) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error at a location.
    pub fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, Some(location.into()), message.into());
    }

    /// Record a warning at a location.
    pub fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, Some(location.into()), message.into());
    }

    /// Record an error about the document as a whole.
    pub fn document_error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, None, message.into());
    }

    /// Record a warning about the document as a whole.
    pub fn document_warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, None, message.into());
    }

    fn push(&mut self, severity: Severity, location: Option<String>, message: String) {
        let diagnostic = Diagnostic {
            severity,
            location,
            message,
        };
        match severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Append another report's findings after this one's.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Rendered error lines, in order.
    pub fn error_lines(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Rendered warning lines, in order.
    pub fn warning_lines(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}
