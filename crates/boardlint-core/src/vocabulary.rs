//! # Closed Vocabularies
//!
//! Enumerated document values (widget types, parameter kinds, column
//! formatters, group types) implement [`Vocabulary`] so diagnostics can
//! list the accepted spellings. Each implementor's `as_str` must agree
//! with its serde representation.

/// A closed set of string values accepted by a document field.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Every accepted value, in documentation order.
    const ALL: &'static [Self];

    /// The document spelling of this value.
    fn as_str(&self) -> &'static str;

    /// Look up a value by its document spelling.
    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Comma-separated list of accepted spellings.
    fn listing() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
