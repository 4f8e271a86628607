//! # boardlint-widgets — Widget Registry Validation
//!
//! Typed model, loader, and validator for the widget registry document
//! (`widgets.json`): a JSON object mapping each widget identifier to its
//! definition.
//!
//! ## Modules
//!
//! - [`model`]: widget, parameter, and column records plus the closed
//!   vocabularies they draw from.
//! - [`registry`]: [`WidgetRegistry`], the loaded document in key order.
//! - [`validate`]: [`WidgetValidator`], which reports every structural
//!   problem and returns the declared identifier set.
//!
//! ## Crate Policy
//!
//! - Depends only on `boardlint-core` internally.
//! - Validation never prints; it returns a [`boardlint_core::ValidationReport`].

pub mod model;
pub mod registry;
pub mod validate;

pub use model::{
    flatten_params, CellDataType, ChartDataType, ColumnDefinition, FormatterFn, GridData,
    McpToolBinding, ParamKind, ParameterDefinition, RefetchInterval, RenderFn, Sparkline,
    SparklineType, TableData, WidgetDefinition, WidgetType,
};
pub use registry::{RegistryError, WidgetEntry, WidgetRegistry};
pub use validate::{WidgetValidation, WidgetValidator};
