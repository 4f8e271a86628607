//! # JSON Documents
//!
//! Whole-file loading of configuration documents plus the small value
//! helpers the validators share when describing what they found.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::DocumentError;

/// Read and parse a JSON document.
///
/// # Errors
///
/// Returns [`DocumentError::NotFound`] if nothing exists at `path`,
/// [`DocumentError::Io`] if it cannot be read, and
/// [`DocumentError::Parse`] if the contents are not JSON.
pub fn load_json_document(path: &Path) -> Result<Value, DocumentError> {
    if !path.exists() {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        return Err(DocumentError::NotFound {
            name,
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded document");

    Ok(serde_json::from_str(&content)?)
}

/// The JSON type of a value, for "expected X, got Y" messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True for values that carry no content: `null`, `false`, zero, the
/// empty string, and empty arrays or objects.
///
/// Optional sections such as `gridData`, `params`, or `tabs` are only
/// inspected when they are not blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Render a value for a diagnostic: strings without quotes, numbers in
/// their shortest form, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(display_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// Render a grid coordinate or interval: whole numbers without a
/// fractional part (`12`, not `12.0`).
pub fn display_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
