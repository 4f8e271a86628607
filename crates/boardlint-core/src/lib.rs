//! # boardlint-core — Foundational Types for boardlint
//!
//! Every other crate in the workspace depends on `boardlint-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Typed records, tri-state fields.** Document records are plain
//!    serde structs whose inspected fields are [`Field<T>`]: missing,
//!    present with the expected shape, or present with some other shape.
//!    Deserializing an object into a record never fails, so shape problems
//!    surface as diagnostics instead of parse errors.
//!
//! 2. **Diagnostics are data.** Validators return a [`ValidationReport`];
//!    they never print. A run passes exactly when the error list is empty.
//!
//! 3. **No bare strings for widget identifiers.** [`WidgetId`] is the one
//!    identifier type shared by the widget registry, layouts, and groups.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `boardlint-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod field;
pub mod identity;
pub mod vocabulary;

pub use diagnostic::{Diagnostic, Severity, ValidationReport};
pub use document::{display_number, display_value, is_blank, load_json_document, JsonKind};
pub use error::DocumentError;
pub use field::{Field, Record};
pub use identity::WidgetId;
pub use vocabulary::Vocabulary;
