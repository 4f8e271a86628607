//! # Widget Schema Validation
//!
//! Checks every widget of a `widgets.json` document independently and
//! collects the findings into a [`ValidationReport`]. The declared
//! identifiers are returned alongside the report so the app validator can
//! resolve layout references against them.
//!
//! ## Validation Layers
//!
//! 1. **Document**: readable, well-formed JSON, an object keyed by widget id.
//! 2. **Widget**: required fields, widget type, grid sizing, refresh period.
//! 3. **Parameters**: kind, options, endpoint-backed choices, date macros.
//! 4. **Table columns**: field names, column vocabularies, sparklines.

use std::collections::{BTreeSet, HashSet};
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use boardlint_core::{
    display_number, display_value, is_blank, load_json_document, DocumentError, Field,
    ValidationReport, Vocabulary, WidgetId,
};

use crate::model::{
    flatten_params, CellDataType, ColumnDefinition, GridData, McpToolBinding, ParamKind,
    ParameterDefinition, RefetchInterval, RenderFn, SparklineType, TableData, WidgetType,
};
use crate::registry::{WidgetEntry, WidgetRegistry};

/// Width assumed when `gridData.w` is absent.
pub const DEFAULT_GRID_WIDTH: f64 = 12.0;
/// Height assumed when `gridData.h` is absent.
pub const DEFAULT_GRID_HEIGHT: f64 = 8.0;
/// Recommended `gridData.w` range.
pub const RECOMMENDED_WIDTH: RangeInclusive<f64> = 10.0..=40.0;
/// Recommended `gridData.h` range.
pub const RECOMMENDED_HEIGHT: RangeInclusive<f64> = 4.0..=100.0;
/// Refresh periods below this many milliseconds draw a warning.
pub const MIN_REFETCH_INTERVAL_MS: f64 = 1000.0;
/// The only recognised dynamic date macro.
pub const CURRENT_DATE_MACRO: &str = "$currentDate";

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of validating one `widgets.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WidgetValidation {
    /// Every declared widget identifier. Empty when the document could not
    /// be loaded as an object.
    pub widget_ids: BTreeSet<WidgetId>,
    pub report: ValidationReport,
    /// Number of widgets found in the document.
    pub widget_count: usize,
    /// Whether the document was loaded as a widget registry at all.
    pub registry_loaded: bool,
}

impl WidgetValidation {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validator for `widgets.json` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct WidgetValidator;

impl WidgetValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate the document at `path`.
    pub fn validate_file(&self, path: &Path) -> WidgetValidation {
        match load_json_document(path) {
            Ok(value) => self.validate_value(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "widgets.json unreadable");
                Self::failed(e)
            }
        }
    }

    /// Validate a document held in memory.
    pub fn validate_str(&self, content: &str) -> WidgetValidation {
        match serde_json::from_str(content) {
            Ok(value) => self.validate_value(value),
            Err(e) => Self::failed(DocumentError::Parse(e)),
        }
    }

    /// Validate a parsed document.
    pub fn validate_value(&self, value: Value) -> WidgetValidation {
        let mut result = WidgetValidation::default();

        let registry = match WidgetRegistry::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                result.report.document_error(e.to_string());
                return result;
            }
        };
        result.registry_loaded = true;
        result.widget_count = registry.len();
        result.widget_ids = registry.ids();

        if registry.is_empty() {
            result.report.document_warning("widgets.json is empty");
            return result;
        }

        for entry in registry.iter() {
            validate_widget(entry, &mut result.report);
        }

        tracing::info!(
            widgets = result.widget_count,
            errors = result.report.errors.len(),
            warnings = result.report.warnings.len(),
            "widget registry validated"
        );
        result
    }

    fn failed(error: DocumentError) -> WidgetValidation {
        let mut result = WidgetValidation::default();
        result.report.document_error(error.to_string());
        result
    }
}

// ---------------------------------------------------------------------------
// Widget checks
// ---------------------------------------------------------------------------

fn validate_widget(entry: &WidgetEntry, report: &mut ValidationReport) {
    let loc = entry.id.as_str();
    tracing::debug!(widget = loc, "validating widget");

    let widget = match &entry.definition {
        Ok(w) => w,
        Err(kind) => {
            report.error(loc, format!("widget definition must be an object, got {kind}"));
            return;
        }
    };

    // 1. Required fields
    check_required_string(report, loc, "name", &widget.name);
    match &widget.widget_type {
        Field::Missing => report.error(loc, "Missing required field: type"),
        Field::Invalid(raw) if !is_blank(raw) => report.error(
            loc,
            format!(
                "Invalid widget type: '{}'. Valid types: {}",
                display_value(raw),
                WidgetType::listing()
            ),
        ),
        _ => {}
    }
    check_required_string(report, loc, "endpoint", &widget.endpoint);

    // 2. Grid sizing
    match &widget.grid_data {
        Field::Present(grid) => validate_grid_data(report, loc, grid),
        Field::Invalid(raw) if !is_blank(raw) => report.error(loc, "gridData must be an object"),
        _ => {}
    }

    // 3. Parameters
    match &widget.params {
        Field::Present(params) => {
            for param in flatten_params(params) {
                validate_param(report, loc, &param);
            }
        }
        Field::Invalid(raw) if !is_blank(raw) => report.error(loc, "params must be an array"),
        _ => {}
    }

    // 4. Table columns
    if widget.kind() == Some(WidgetType::Table) {
        match &widget.data {
            Field::Present(data) => validate_table_data(report, loc, data),
            Field::Invalid(raw) if !is_blank(raw) => report.error(loc, "data must be an object"),
            _ => {}
        }
    }

    // 5. MCP tool binding
    match &widget.mcp_tool {
        Field::Present(binding) => validate_mcp_tool(report, loc, binding),
        Field::Invalid(_) => report.error(loc, "mcp_tool must be an object"),
        Field::Missing => {}
    }

    // 6. Refresh period
    match &widget.refetch_interval {
        Field::Present(RefetchInterval::Millis(ms)) if *ms < MIN_REFETCH_INTERVAL_MS => {
            report.warning(
                loc,
                format!(
                    "refetchInterval {}ms is very low (min {}ms)",
                    display_number(*ms),
                    display_number(MIN_REFETCH_INTERVAL_MS)
                ),
            );
        }
        Field::Invalid(Value::Null) => {}
        Field::Invalid(_) => report.error(loc, "refetchInterval must be number or false"),
        _ => {}
    }
}

fn check_required_string(
    report: &mut ValidationReport,
    loc: &str,
    name: &str,
    field: &Field<String>,
) {
    match field {
        Field::Missing => report.error(loc, format!("Missing required field: {name}")),
        Field::Invalid(_) => report.error(loc, format!("{name} must be a string")),
        Field::Present(_) => {}
    }
}

fn validate_grid_data(report: &mut ValidationReport, loc: &str, grid: &GridData) {
    check_grid_dimension(report, loc, "w", &grid.w, DEFAULT_GRID_WIDTH, &RECOMMENDED_WIDTH);
    check_grid_dimension(report, loc, "h", &grid.h, DEFAULT_GRID_HEIGHT, &RECOMMENDED_HEIGHT);

    for (key, limit) in grid.limits() {
        if limit.invalid().is_some() {
            report.error(loc, format!("gridData.{key} must be a number"));
        }
    }
}

fn check_grid_dimension(
    report: &mut ValidationReport,
    loc: &str,
    key: &str,
    field: &Field<f64>,
    default: f64,
    recommended: &RangeInclusive<f64>,
) {
    match field.or_default_with(default) {
        Err(_) => report.error(loc, format!("gridData.{key} must be a number")),
        Ok(v) if !recommended.contains(&v) => report.warning(
            loc,
            format!(
                "gridData.{key}={} outside recommended range ({}-{})",
                display_number(v),
                display_number(*recommended.start()),
                display_number(*recommended.end())
            ),
        ),
        Ok(_) => {}
    }
}

// ---------------------------------------------------------------------------
// Parameter checks
// ---------------------------------------------------------------------------

fn validate_param(report: &mut ValidationReport, loc: &str, param: &ParameterDefinition) {
    let name = match &param.param_name {
        Field::Present(v) => display_value(v),
        _ => {
            report.error(loc, "param missing paramName");
            return;
        }
    };
    let label = format!("param '{name}'");

    let kind = match &param.kind {
        Field::Present(kind) => Some(*kind),
        Field::Invalid(raw) if !is_blank(raw) => {
            report.error(
                loc,
                format!(
                    "{label} invalid type: '{}'. Valid: {}",
                    display_value(raw),
                    ParamKind::listing()
                ),
            );
            None
        }
        _ => {
            report.error(loc, format!("{label} missing type"));
            return;
        }
    };

    if kind == Some(ParamKind::Endpoint) && param.options_endpoint.is_missing() {
        report.error(loc, format!("{label} (endpoint type) missing optionsEndpoint"));
    }

    match &param.options {
        Field::Present(options) => {
            for (i, option) in options.iter().enumerate() {
                match option.as_object() {
                    None => report.error(loc, format!("{label} option[{i}] must be an object")),
                    Some(obj) if !obj.contains_key("value") => {
                        report.error(loc, format!("{label} option[{i}] missing 'value'"))
                    }
                    Some(_) => {}
                }
            }
        }
        Field::Invalid(_) => report.error(loc, format!("{label} options must be an array")),
        Field::Missing => {}
    }

    if kind == Some(ParamKind::Date) {
        if let Some(Value::String(value)) = param.value.present() {
            if value.starts_with('$') && !value.starts_with(CURRENT_DATE_MACRO) {
                report.warning(loc, format!("{label} date modifier '{value}' may be invalid"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Table checks
// ---------------------------------------------------------------------------

fn validate_table_data(report: &mut ValidationReport, loc: &str, data: &TableData) {
    let columns = match &data.columns_defs {
        Field::Present(columns) => columns,
        Field::Invalid(raw) if !is_blank(raw) => {
            report.error(loc, "data.columnsDefs must be an array");
            return;
        }
        _ => return,
    };

    let mut fields_seen = HashSet::new();
    for (i, raw) in columns.iter().enumerate() {
        if !raw.is_object() {
            report.error(loc, format!("column[{i}] must be an object"));
            continue;
        }
        let Ok(column) = ColumnDefinition::deserialize(raw) else {
            continue;
        };

        let field = match &column.field {
            Field::Present(f) => f.clone(),
            Field::Missing => {
                report.error(loc, format!("column[{i}] missing 'field'"));
                format!("column_{i}")
            }
            Field::Invalid(_) => {
                report.error(loc, format!("column[{i}] field must be a string"));
                format!("column_{i}")
            }
        };
        let label = format!("column '{field}'");

        if !fields_seen.insert(field.clone()) {
            report.warning(loc, format!("{label} duplicate field name"));
        }

        validate_column_vocabularies(report, loc, &label, &column);

        match &column.sparkline {
            Field::Present(sparkline) => {
                if let Some(raw) = sparkline.kind.invalid().filter(|v| !is_blank(v)) {
                    report.warning(
                        loc,
                        format!(
                            "{label} sparkline type '{}' should be one of: {}",
                            display_value(raw),
                            SparklineType::listing()
                        ),
                    );
                }
                if sparkline.data_field.is_missing() {
                    report.warning(loc, format!("{label} sparkline missing dataField"));
                }
            }
            Field::Invalid(_) => report.error(loc, format!("{label} sparkline must be an object")),
            Field::Missing => {}
        }
    }
}

fn validate_column_vocabularies(
    report: &mut ValidationReport,
    loc: &str,
    label: &str,
    column: &ColumnDefinition,
) {
    if let Some(raw) = unknown_value(&column.cell_data_type) {
        report.error(
            loc,
            format!(
                "{label} invalid cellDataType: '{}'. Valid: {}",
                display_value(raw),
                CellDataType::listing()
            ),
        );
    }
    if let Some(raw) = unknown_value(&column.chart_data_type) {
        report.warning(
            loc,
            format!("{label} unknown chartDataType: '{}'", display_value(raw)),
        );
    }
    if let Some(raw) = unknown_value(&column.formatter_fn) {
        report.warning(
            loc,
            format!("{label} unknown formatterFn: '{}'", display_value(raw)),
        );
    }

    let render_fns = match column.render_fn.present() {
        Some(v) if is_blank(v) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    };
    for render_fn in render_fns {
        let known = render_fn.as_str().and_then(RenderFn::parse).is_some();
        if !known {
            report.warning(
                loc,
                format!("{label} unknown renderFn: '{}'", display_value(render_fn)),
            );
        }
    }
}

/// The raw value of a vocabulary field holding something outside the
/// vocabulary. Blank values are treated as absent.
fn unknown_value<T>(field: &Field<T>) -> Option<&Value> {
    field.invalid().filter(|v| !is_blank(v))
}

fn validate_mcp_tool(report: &mut ValidationReport, loc: &str, binding: &McpToolBinding) {
    if binding.mcp_server.is_missing() {
        report.error(loc, "mcp_tool missing 'mcp_server'");
    }
    if binding.tool_id.is_missing() {
        report.error(loc, "mcp_tool missing 'tool_id'");
    }
}
