//! # boardlint-apps — App Layout Validation
//!
//! Model and validator for the app layout document (`apps.json`): an array
//! of apps, each a set of tabs holding grid layouts of widget placements.
//!
//! Layouts reference widgets by identifier, so validation is
//! cross-document: [`AppValidator`] is built over the identifier set the
//! widget registry declared, and resolves every layout item and group
//! member against it.
//!
//! ## Modules
//!
//! - [`model`]: app, tab, layout item, and group records.
//! - [`geometry`]: grid rectangles and the overlap predicate.
//! - [`validate`]: the validator and its result type.

pub mod geometry;
pub mod model;
pub mod validate;

pub use geometry::{rectangles_overlap, PlacementHistory, Rect, GRID_COLUMNS};
pub use model::{AppDefinition, GroupDefinition, GroupType, LayoutItem, TabDefinition, WidgetState};
pub use validate::{AppValidation, AppValidator};
