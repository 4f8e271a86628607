//! # Tri-State Record Fields
//!
//! Configuration documents are written by hand, so any key may be absent,
//! hold the expected shape, or hold something else entirely. `Field<T>`
//! captures all three outcomes so that records stay strongly typed while
//! the raw value of a mis-shaped key remains available for diagnostics.
//!
//! Records use `#[serde(default)]` on their `Field` members: an absent key
//! becomes [`Field::Missing`] and deserialization of the record itself
//! cannot fail.

use std::ops::Deref;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A record field as found in a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// The key is absent.
    Missing,
    /// The key is present and its value has the expected shape.
    Present(T),
    /// The key is present but its value has another shape (including `null`).
    Invalid(Value),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T: DeserializeOwned> Field<T> {
    /// Classify a raw JSON value against the expected shape `T`.
    pub fn from_value(value: Value) -> Self {
        match T::deserialize(&value) {
            Ok(parsed) => Self::Present(parsed),
            Err(_) => Self::Invalid(value),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

/// A nested record that only deserializes from a JSON object.
///
/// serde's derived struct visitors also accept arrays positionally, which
/// would let `[12, 8]` pass for a `gridData` object. Wrapping a record in
/// `Record` routes it through a JSON map first, so anything but an object
/// lands in [`Field::Invalid`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record<T>(pub T);

impl<'de, T: DeserializeOwned> Deserialize<'de> for Record<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        T::deserialize(Value::Object(map))
            .map(Record)
            .map_err(D::Error::custom)
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> Field<T> {
    /// Returns true if the key is absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns true if the key is present, whatever its shape.
    pub fn is_set(&self) -> bool {
        !self.is_missing()
    }

    /// Returns true if the key is absent or explicitly `null`.
    pub fn is_missing_or_null(&self) -> bool {
        matches!(self, Self::Missing | Self::Invalid(Value::Null))
    }

    /// The parsed value, if the key has the expected shape.
    pub fn present(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            _ => None,
        }
    }

    /// The raw value, if the key has an unexpected shape.
    pub fn invalid(&self) -> Option<&Value> {
        match self {
            Self::Invalid(v) => Some(v),
            _ => None,
        }
    }

    /// Resolve the field against a default used when the key is absent.
    ///
    /// Returns `Ok` with the parsed or default value, `Err` with the raw
    /// value when the key holds the wrong shape.
    pub fn or_default_with(&self, default: T) -> Result<T, &Value>
    where
        T: Clone,
    {
        match self {
            Self::Missing => Ok(default),
            Self::Present(v) => Ok(v.clone()),
            Self::Invalid(raw) => Err(raw),
        }
    }
}
