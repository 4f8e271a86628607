//! # Widget Registry
//!
//! Loads a `widgets.json` document into an ordered list of entries keyed by
//! [`WidgetId`]. The registry is plain data built by a loader; nothing in
//! the workspace holds a global instance.
//!
//! The document must be an object whose keys are widget identifiers. JSON
//! objects cannot hold duplicate keys after parsing, so identifiers are
//! unique by construction (the last duplicate in the source text wins).

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use boardlint_core::{load_json_document, DocumentError, JsonKind, WidgetId};

use crate::model::WidgetDefinition;

/// Why a `widgets.json` document could not be turned into a registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The document is a JSON array, the most common authoring mistake.
    #[error(
        "widgets.json must be an OBJECT with widget IDs as keys, not an array.\n   \
         Expected: {{\"widget_id\": {{\"name\": \"Widget Name\", ...}}}}\n   \
         Received: [{{\"name\": \"Widget Name\", ...}}]"
    )]
    ArrayFormat,

    #[error("widgets.json must be an object, got {0}")]
    WrongType(JsonKind),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// One widget of the registry.
#[derive(Debug, Clone)]
pub struct WidgetEntry {
    pub id: WidgetId,
    /// The typed definition, or the JSON type found when the value is not
    /// an object.
    pub definition: Result<WidgetDefinition, JsonKind>,
}

/// All widgets declared by one `widgets.json`, in key order.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    entries: Vec<WidgetEntry>,
}

impl WidgetRegistry {
    /// Read and parse `widgets.json` from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let value = load_json_document(path)?;
        Self::from_value(value)
    }

    /// Build a registry from a parsed document.
    pub fn from_value(value: Value) -> Result<Self, RegistryError> {
        let map = match value {
            Value::Object(map) => map,
            Value::Array(_) => return Err(RegistryError::ArrayFormat),
            other => return Err(RegistryError::WrongType(JsonKind::of(&other))),
        };

        let entries = map
            .into_iter()
            .map(|(key, raw)| {
                let definition = if raw.is_object() {
                    // Every inspected field is a `Field`, so an object
                    // always deserializes.
                    WidgetDefinition::deserialize(&raw).map_err(|_| JsonKind::Object)
                } else {
                    Err(JsonKind::of(&raw))
                };
                WidgetEntry {
                    id: WidgetId::new(key),
                    definition,
                }
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetEntry> {
        self.entries.iter()
    }

    /// Look up a widget by identifier.
    pub fn get(&self, id: &str) -> Option<&WidgetEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    /// The declared identifiers, whatever the validity of their definitions.
    pub fn ids(&self) -> BTreeSet<WidgetId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }
}
