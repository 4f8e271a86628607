//! # App Layout Validation
//!
//! Checks an `apps.json` document against its structural contract and
//! against the widget identifiers declared by `widgets.json`.
//!
//! ## Validation Layers
//!
//! 1. **Document**: well-formed JSON, an array of app objects.
//! 2. **App**: name, description, image URLs, tabs, groups, prompts.
//! 3. **Tab**: name and id, then each layout item in order.
//! 4. **Layout item**: widget reference, coordinate types and ranges,
//!    grid bounds, overlap with earlier items of the same tab, state.
//! 5. **Group**: type, driving parameter, member references.
//!
//! Reference checks run only when the known widget set is non-empty. An
//! empty set means the widget registry could not supply identifiers, and
//! reporting every reference as unresolved would bury the real problem.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use boardlint_core::{
    display_number, display_value, is_blank, load_json_document, DocumentError, Field,
    JsonKind, ValidationReport, Vocabulary, WidgetId,
};

use crate::geometry::{
    PlacementHistory, Rect, DEFAULT_H, DEFAULT_W, DEFAULT_X, DEFAULT_Y, GRID_COLUMNS,
};
use crate::model::{AppDefinition, GroupDefinition, GroupType, LayoutItem, TabDefinition};

/// Prefixes accepted as absolute image URLs.
const ABSOLUTE_URL_PREFIXES: [&str; 3] = ["http://", "https://", "/"];

/// Outcome of validating one `apps.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppValidation {
    pub report: ValidationReport,
    /// Number of apps in the document.
    pub app_count: usize,
    /// Number of tab layouts whose items were checked.
    pub layouts_validated: usize,
    /// Size of the known widget set the references were resolved against.
    pub widget_ids_loaded: usize,
}

impl AppValidation {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

/// Validator for `apps.json` documents.
#[derive(Debug, Clone, Copy)]
pub struct AppValidator<'a> {
    known_widgets: &'a BTreeSet<WidgetId>,
}

impl<'a> AppValidator<'a> {
    /// Create a validator resolving references against `known_widgets`.
    pub fn new(known_widgets: &'a BTreeSet<WidgetId>) -> Self {
        Self { known_widgets }
    }

    /// Validate the document at `path`. A missing file is a warning.
    pub fn validate_file(&self, path: &Path) -> AppValidation {
        match load_json_document(path) {
            Ok(value) => self.validate_value(value),
            Err(e) if e.is_not_found() => {
                tracing::info!(path = %path.display(), "apps.json absent, skipping");
                let mut result = self.empty_result();
                result
                    .report
                    .document_warning("apps.json not found (optional file)");
                result
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "apps.json unreadable");
                self.failed(e)
            }
        }
    }

    /// Validate a document held in memory.
    pub fn validate_str(&self, content: &str) -> AppValidation {
        match serde_json::from_str(content) {
            Ok(value) => self.validate_value(value),
            Err(e) => self.failed(DocumentError::Parse(e)),
        }
    }

    /// Validate a parsed document.
    pub fn validate_value(&self, value: Value) -> AppValidation {
        let mut result = self.empty_result();

        let apps = match value {
            Value::Array(apps) => apps,
            Value::Object(_) => {
                result.report.document_error(
                    "apps.json must be an ARRAY of app objects, not a single object.\n   \
                     Expected: [{\"name\": \"App Name\", \"tabs\": {...}}]\n   \
                     Received: {\"name\": \"App Name\", ...}",
                );
                return result;
            }
            other => {
                result.report.document_error(format!(
                    "apps.json must be an array, got {}",
                    JsonKind::of(&other)
                ));
                return result;
            }
        };

        if apps.is_empty() {
            result.report.document_warning("apps.json is an empty array");
        }
        result.app_count = apps.len();

        for (n, app) in apps.iter().enumerate() {
            self.validate_app(&mut result, &format!("app[{n}]"), app);
        }

        tracing::info!(
            apps = result.app_count,
            layouts = result.layouts_validated,
            errors = result.report.errors.len(),
            warnings = result.report.warnings.len(),
            "apps validated"
        );
        result
    }

    fn empty_result(&self) -> AppValidation {
        AppValidation {
            widget_ids_loaded: self.known_widgets.len(),
            ..AppValidation::default()
        }
    }

    fn failed(&self, error: DocumentError) -> AppValidation {
        let message = match &error {
            DocumentError::Parse(e) => format!("Invalid JSON in apps.json: {e}"),
            other => other.to_string(),
        };
        let mut result = self.empty_result();
        result.report.document_error(message);
        result
    }

    /// True when references should be checked and `id` is not declared.
    fn is_unresolved(&self, id: &str) -> bool {
        !self.known_widgets.is_empty() && !self.known_widgets.contains(id)
    }

    // -----------------------------------------------------------------------
    // Apps
    // -----------------------------------------------------------------------

    fn validate_app(&self, result: &mut AppValidation, loc: &str, raw: &Value) {
        tracing::debug!(app = loc, "validating app");
        let report = &mut result.report;

        if !raw.is_object() {
            report.error(loc, "app must be an object");
            return;
        }
        let Ok(app) = AppDefinition::deserialize(raw) else {
            return;
        };

        if app.name.is_missing() {
            report.error(loc, "Missing required field: name");
        }
        if app.description.is_missing() {
            report.warning(loc, "Missing description");
        }

        for (key, image) in app.images() {
            match image {
                Field::Present(url) if !is_absolute_url(url) => {
                    report.warning(loc, format!("{key} should be an absolute URL"))
                }
                Field::Invalid(_) => report.error(loc, format!("{key} must be a string URL")),
                _ => {}
            }
        }

        match &app.tabs {
            Field::Present(tabs) if !tabs.is_empty() => {
                for (tab_id, tab) in tabs {
                    self.validate_tab(result, &format!("{loc}.tabs.{tab_id}"), tab_id, tab);
                }
            }
            Field::Invalid(raw) if !is_blank(raw) => {
                result.report.error(loc, "tabs must be an object")
            }
            _ => result.report.warning(loc, "No tabs defined"),
        }

        let report = &mut result.report;
        match &app.groups {
            Field::Present(groups) => {
                for (k, group) in groups.iter().enumerate() {
                    self.validate_group(report, &format!("{loc}.groups[{k}]"), group);
                }
            }
            Field::Invalid(raw) if !is_blank(raw) => report.error(loc, "groups must be an array"),
            _ => {}
        }

        match &app.prompts {
            Field::Present(prompts) => {
                for (k, prompt) in prompts.iter().enumerate() {
                    if !prompt.is_string() {
                        report.error(loc, format!("prompts[{k}] must be a string"));
                    }
                }
            }
            Field::Invalid(raw) if !is_blank(raw) => report.error(loc, "prompts must be an array"),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Tabs
    // -----------------------------------------------------------------------

    fn validate_tab(&self, result: &mut AppValidation, loc: &str, key: &str, raw: &Value) {
        tracing::debug!(tab = loc, "validating tab");
        let report = &mut result.report;

        if !raw.is_object() {
            report.error(loc, "tab must be an object");
            return;
        }
        let Ok(tab) = TabDefinition::deserialize(raw) else {
            return;
        };

        if tab.name.is_missing() {
            report.warning(loc, "Missing tab name");
        }
        match &tab.id {
            Field::Missing => report.warning(loc, "Missing tab id"),
            Field::Present(Value::String(id)) if id == key => {}
            Field::Present(other) => report.warning(
                loc,
                format!(
                    "Tab id '{}' does not match its key '{key}'",
                    display_value(other)
                ),
            ),
            Field::Invalid(_) => {}
        }

        let items = match &tab.layout {
            Field::Present(items) if !items.is_empty() => items,
            Field::Invalid(raw) if !is_blank(raw) => {
                report.error(loc, "layout must be an array");
                return;
            }
            _ => {
                report.warning(loc, "Empty layout");
                return;
            }
        };

        let mut history = PlacementHistory::new();
        for (k, item) in items.iter().enumerate() {
            self.validate_layout_item(report, &format!("{loc}.layout[{k}]"), item, &mut history);
        }
        result.layouts_validated += 1;
    }

    // -----------------------------------------------------------------------
    // Layout items
    // -----------------------------------------------------------------------

    fn validate_layout_item(
        &self,
        report: &mut ValidationReport,
        loc: &str,
        raw: &Value,
        history: &mut PlacementHistory,
    ) {
        if !raw.is_object() {
            report.error(loc, "layout item must be an object");
            return;
        }
        let Ok(item) = LayoutItem::deserialize(raw) else {
            return;
        };

        // 1. Widget reference
        let widget_id = match &item.i {
            Field::Present(id) if !id.as_str().is_empty() => id.clone(),
            Field::Invalid(raw) if !is_blank(raw) => {
                report.error(loc, "widget ID (i) must be a string");
                return;
            }
            _ => {
                report.error(loc, "Missing widget ID (i)");
                return;
            }
        };
        if self.is_unresolved(widget_id.as_str()) {
            report.error(loc, format!("Widget '{widget_id}' not found in widgets.json"));
        }

        // 2. Coordinate types
        let coords = [
            ("x", item.x.or_default_with(DEFAULT_X)),
            ("y", item.y.or_default_with(DEFAULT_Y)),
            ("w", item.w.or_default_with(DEFAULT_W)),
            ("h", item.h.or_default_with(DEFAULT_H)),
        ];
        for (name, coord) in &coords {
            if coord.is_err() {
                report.error(loc, format!("{name} must be a number"));
            }
        }
        let [x, y, w, h] = coords.map(|(_, c)| c.ok());

        // 3. Ranges
        if let Some(x) = x.filter(|x| *x < 0.0) {
            report.error(loc, format!("x cannot be negative (got {})", display_number(x)));
        }
        if let Some(y) = y.filter(|y| *y < 0.0) {
            report.error(loc, format!("y cannot be negative (got {})", display_number(y)));
        }
        if let Some(w) = w.filter(|w| *w <= 0.0) {
            report.error(loc, format!("w must be positive (got {})", display_number(w)));
        }
        if let Some(h) = h.filter(|h| *h <= 0.0) {
            report.error(loc, format!("h must be positive (got {})", display_number(h)));
        }

        // 4. Grid bounds
        if let (Some(x), Some(w)) = (x, w) {
            if x + w > GRID_COLUMNS {
                report.error(
                    loc,
                    format!(
                        "Widget extends beyond grid (x={} + w={} = {} > {})",
                        display_number(x),
                        display_number(w),
                        display_number(x + w),
                        display_number(GRID_COLUMNS)
                    ),
                );
            }
        }

        // 5. Overlap with earlier items of this tab
        if let (Some(x), Some(y), Some(w), Some(h)) = (x, y, w, h) {
            let rect = Rect::new(x, y, w, h);
            if let Some(other) = history.first_overlap(&rect) {
                report.warning(
                    loc,
                    format!("Widget '{widget_id}' may overlap with '{}'", other.widget),
                );
            }
            history.record(widget_id, rect);
        }

        // 6. Pre-configured state
        match &item.state {
            Field::Present(state) => {
                for (key, section) in state.sections() {
                    if section.invalid().is_some() {
                        report.error(loc, format!("state.{key} must be an object"));
                    }
                }
            }
            Field::Invalid(_) => report.error(loc, "state must be an object"),
            Field::Missing => {}
        }

        // 7. Group membership
        match &item.groups {
            Field::Present(groups) => {
                for group in groups.iter().filter(|g| !g.is_string()) {
                    tracing::debug!(item = loc, group = %group, "non-string group name");
                    report.error(loc, "group name must be a string");
                }
            }
            Field::Invalid(_) => report.error(loc, "groups must be an array"),
            Field::Missing => {}
        }
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    fn validate_group(&self, report: &mut ValidationReport, loc: &str, raw: &Value) {
        if !raw.is_object() {
            report.error(loc, "group must be an object");
            return;
        }
        let Ok(group) = GroupDefinition::deserialize(raw) else {
            return;
        };

        if group.name.is_missing() {
            report.error(loc, "Missing group name");
        }

        if let Some(raw) = group.group_type.invalid().filter(|v| !is_blank(v)) {
            report.warning(
                loc,
                format!(
                    "Unknown group type: '{}'. Valid: {}",
                    display_value(raw),
                    GroupType::listing()
                ),
            );
        }

        if group.param_name.is_missing() {
            report.warning(loc, "Missing paramName");
        }

        match &group.widget_ids {
            Field::Present(ids) if !ids.is_empty() => {
                for id in ids {
                    let resolved = id.as_str().is_some_and(|s| !self.is_unresolved(s));
                    if !self.known_widgets.is_empty() && !resolved {
                        report.error(
                            loc,
                            format!("Group references unknown widget: '{}'", display_value(id)),
                        );
                    }
                }
            }
            Field::Invalid(raw) if !is_blank(raw) => {
                report.error(loc, "widgetIds must be an array")
            }
            _ => report.warning(loc, "No widgets in group"),
        }
    }
}

fn is_absolute_url(url: &str) -> bool {
    ABSOLUTE_URL_PREFIXES.iter().any(|p| url.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn known(ids: &[&str]) -> BTreeSet<WidgetId> {
        ids.iter().map(|id| WidgetId::from(*id)).collect()
    }

    fn app_with_layout(layout: Value) -> Value {
        json!([{
            "name": "Markets",
            "description": "Market overview",
            "tabs": {"overview": {"id": "overview", "name": "Overview", "layout": layout}}
        }])
    }

    const ITEM_LOC: &str = "app[0].tabs.overview.layout";

    #[test]
    fn valid_document_passes_cleanly() {
        let ids = known(&["prices", "news"]);
        let result = AppValidator::new(&ids).validate_value(json!([{
            "name": "Markets",
            "description": "Market overview",
            "img": "https://example.com/markets.png",
            "img_dark": "/static/markets-dark.png",
            "tabs": {
                "overview": {"id": "overview", "name": "Overview", "layout": [
                    {"i": "prices", "x": 0, "y": 0, "w": 20, "h": 10,
                     "state": {"params": {"symbol": "AAPL"}, "chartView": {"enabled": true}},
                     "groups": ["Group 1"]},
                    {"i": "news", "x": 20, "y": 0, "w": 20, "h": 10}
                ]}
            },
            "groups": [{"name": "Group 1", "type": "param", "paramName": "symbol",
                        "widgetIds": ["prices"]}],
            "prompts": ["Summarize today's movers"]
        }]));
        assert!(result.is_valid(), "{:?}", result.report);
        assert!(result.report.warnings.is_empty(), "{:?}", result.report);
        assert_eq!(result.layouts_validated, 1);
        assert_eq!(result.app_count, 1);
        assert_eq!(result.widget_ids_loaded, 2);
    }

    #[test]
    fn object_document_is_exactly_one_error() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(json!({"name": "App"}));
        assert_eq!(result.report.errors.len(), 1);
        assert!(result.report.errors[0]
            .message
            .starts_with("apps.json must be an ARRAY of app objects, not a single object."));
        assert!(result.report.errors[0]
            .message
            .contains("Expected: [{\"name\": \"App Name\", \"tabs\": {...}}]"));
    }

    #[test]
    fn scalar_document_names_its_type() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(json!(true));
        assert_eq!(
            result.report.error_lines(),
            vec!["apps.json must be an array, got boolean"]
        );
    }

    #[test]
    fn empty_array_warns() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(json!([]));
        assert!(result.is_valid());
        assert_eq!(result.report.warning_lines(), vec!["apps.json is an empty array"]);
    }

    #[test]
    fn malformed_text_names_the_document() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_str("[{");
        assert_eq!(result.report.errors.len(), 1);
        assert!(result.report.errors[0]
            .message
            .starts_with("Invalid JSON in apps.json: "));
    }

    #[test]
    fn app_level_checks() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(json!([
            "not an app",
            {
                "img": "images/app.png",
                "img_light": 42,
                "tabs": ["overview"],
                "groups": {"name": "g"},
                "prompts": ["ok", 3]
            },
            {"name": "Bare", "tabs": {}}
        ]));
        assert_eq!(
            result.report.error_lines(),
            vec![
                "[app[0]] app must be an object",
                "[app[1]] Missing required field: name",
                "[app[1]] img_light must be a string URL",
                "[app[1]] tabs must be an object",
                "[app[1]] groups must be an array",
                "[app[1]] prompts[1] must be a string",
            ]
        );
        assert_eq!(
            result.report.warning_lines(),
            vec![
                "[app[1]] Missing description",
                "[app[1]] img should be an absolute URL",
                "[app[2]] Missing description",
                "[app[2]] No tabs defined",
            ]
        );
    }

    #[test]
    fn tab_level_checks() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(json!([{
            "name": "A", "description": "d",
            "tabs": {
                "a": "tab",
                "b": {"layout": []},
                "c": {"id": "other", "name": "C", "layout": {"i": "w1"}}
            }
        }]));
        assert_eq!(
            result.report.error_lines(),
            vec![
                "[app[0].tabs.a] tab must be an object",
                "[app[0].tabs.c] layout must be an array",
            ]
        );
        assert_eq!(
            result.report.warning_lines(),
            vec![
                "[app[0].tabs.b] Missing tab name",
                "[app[0].tabs.b] Missing tab id",
                "[app[0].tabs.b] Empty layout",
                "[app[0].tabs.c] Tab id 'other' does not match its key 'c'",
            ]
        );
        assert_eq!(result.layouts_validated, 0);
    }

    #[test]
    fn missing_widget_reference_stops_item() {
        let ids = known(&["w1"]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"x": -1},
            {"i": ""},
            {"i": 7, "w": 0}
        ])));
        assert_eq!(
            result.report.error_lines(),
            vec![
                format!("[{ITEM_LOC}[0]] Missing widget ID (i)"),
                format!("[{ITEM_LOC}[1]] Missing widget ID (i)"),
                format!("[{ITEM_LOC}[2]] widget ID (i) must be a string"),
            ]
        );
    }

    #[test]
    fn one_unresolved_reference_is_one_error() {
        let ids = known(&["w1"]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "w1", "x": 0, "y": 0, "w": 10, "h": 5},
            {"i": "w2", "x": 10, "y": 0, "w": 10, "h": 5}
        ])));
        assert_eq!(
            result.report.error_lines(),
            vec![format!("[{ITEM_LOC}[1]] Widget 'w2' not found in widgets.json")]
        );
    }

    #[test]
    fn empty_known_set_skips_reference_checks() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(json!([{
            "name": "A", "description": "d",
            "tabs": {"t": {"id": "t", "name": "T", "layout": [{"i": "ghost"}]}},
            "groups": [{"name": "g", "type": "param", "paramName": "p", "widgetIds": ["ghost"]}]
        }]));
        assert!(result.is_valid(), "{:?}", result.report);
    }

    #[test]
    fn coordinate_types_and_ranges() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "a", "x": "left", "y": -2, "w": 0, "h": -1},
            {"i": "b", "x": null, "w": true}
        ])));
        assert_eq!(
            result.report.error_lines(),
            vec![
                format!("[{ITEM_LOC}[0]] x must be a number"),
                format!("[{ITEM_LOC}[0]] y cannot be negative (got -2)"),
                format!("[{ITEM_LOC}[0]] w must be positive (got 0)"),
                format!("[{ITEM_LOC}[0]] h must be positive (got -1)"),
                format!("[{ITEM_LOC}[1]] x must be a number"),
                format!("[{ITEM_LOC}[1]] w must be a number"),
            ]
        );
    }

    #[test]
    fn grid_bounds_are_exclusive_of_forty() {
        let ids = known(&[]);
        let over = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "a", "x": 35, "y": 0, "w": 10, "h": 4}
        ])));
        assert_eq!(
            over.report.error_lines(),
            vec![format!(
                "[{ITEM_LOC}[0]] Widget extends beyond grid (x=35 + w=10 = 45 > 40)"
            )]
        );

        let flush = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "a", "x": 30, "y": 0, "w": 10, "h": 4}
        ])));
        assert!(flush.is_valid());
    }

    #[test]
    fn default_width_applies_to_bounds() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "a", "x": 30}
        ])));
        assert_eq!(
            result.report.error_lines(),
            vec![format!(
                "[{ITEM_LOC}[0]] Widget extends beyond grid (x=30 + w=12 = 42 > 40)"
            )]
        );
    }

    #[test]
    fn identical_items_overlap_once() {
        let ids = known(&["w1"]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "w1", "x": 0, "y": 0, "w": 10, "h": 5},
            {"i": "w1", "x": 0, "y": 0, "w": 10, "h": 5}
        ])));
        assert!(result.is_valid());
        assert_eq!(
            result.report.warning_lines(),
            vec![format!("[{ITEM_LOC}[1]] Widget 'w1' may overlap with 'w1'")]
        );
    }

    #[test]
    fn overlap_names_first_neighbour_only() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "a", "x": 0, "y": 0, "w": 20, "h": 10},
            {"i": "b", "x": 10, "y": 0, "w": 20, "h": 10},
            {"i": "c", "x": 15, "y": 5, "w": 10, "h": 10},
            {"i": "d", "x": 20, "y": 10, "w": 20, "h": 10}
        ])));
        assert_eq!(
            result.report.warning_lines(),
            vec![
                format!("[{ITEM_LOC}[1]] Widget 'b' may overlap with 'a'"),
                format!("[{ITEM_LOC}[2]] Widget 'c' may overlap with 'a'"),
                format!("[{ITEM_LOC}[3]] Widget 'd' may overlap with 'c'"),
            ]
        );
    }

    #[test]
    fn overlap_history_resets_between_tabs() {
        let ids = known(&[]);
        let item = json!({"i": "a", "x": 0, "y": 0, "w": 10, "h": 5});
        let result = AppValidator::new(&ids).validate_value(json!([{
            "name": "A", "description": "d",
            "tabs": {
                "one": {"id": "one", "name": "One", "layout": [item.clone()]},
                "two": {"id": "two", "name": "Two", "layout": [item]}
            }
        }]));
        assert!(result.report.warnings.is_empty(), "{:?}", result.report);
        assert_eq!(result.layouts_validated, 2);
    }

    #[test]
    fn non_numeric_items_do_not_join_history() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "a", "x": "0", "y": 0, "w": 10, "h": 5},
            {"i": "b", "x": 0, "y": 0, "w": 10, "h": 5}
        ])));
        assert!(result.report.warnings.is_empty());
        assert_eq!(result.report.errors.len(), 1);
    }

    #[test]
    fn state_and_item_groups() {
        let ids = known(&[]);
        let result = AppValidator::new(&ids).validate_value(app_with_layout(json!([
            {"i": "a", "x": 0, "w": 10, "state": "collapsed"},
            {"i": "b", "x": 10, "w": 10,
             "state": {"params": [], "chartView": null, "columnState": {}}},
            {"i": "c", "x": 20, "w": 10, "groups": "Group 1"},
            {"i": "d", "x": 30, "w": 10, "groups": ["Group 1", 2]}
        ])));
        assert_eq!(
            result.report.error_lines(),
            vec![
                format!("[{ITEM_LOC}[0]] state must be an object"),
                format!("[{ITEM_LOC}[1]] state.params must be an object"),
                format!("[{ITEM_LOC}[1]] state.chartView must be an object"),
                format!("[{ITEM_LOC}[2]] groups must be an array"),
                format!("[{ITEM_LOC}[3]] group name must be a string"),
            ]
        );
    }

    #[test]
    fn group_checks() {
        let ids = known(&["w1"]);
        let result = AppValidator::new(&ids).validate_value(json!([{
            "name": "A", "description": "d",
            "tabs": {"t": {"id": "t", "name": "T", "layout": [{"i": "w1"}]}},
            "groups": [
                "g",
                {"type": "slider", "widgetIds": []},
                {"name": "g2", "paramName": "p", "widgetIds": "w1"},
                {"name": "g3", "type": "endpointParam", "paramName": "p",
                 "widgetIds": ["w1", "w9", 4]}
            ]
        }]));
        assert_eq!(
            result.report.error_lines(),
            vec![
                "[app[0].groups[0]] group must be an object",
                "[app[0].groups[1]] Missing group name",
                "[app[0].groups[2]] widgetIds must be an array",
                "[app[0].groups[3]] Group references unknown widget: 'w9'",
                "[app[0].groups[3]] Group references unknown widget: '4'",
            ]
        );
        assert_eq!(
            result.report.warning_lines(),
            vec![
                "[app[0].groups[1]] Unknown group type: 'slider'. Valid: param, endpointParam",
                "[app[0].groups[1]] Missing paramName",
                "[app[0].groups[1]] No widgets in group",
            ]
        );
    }

    #[test]
    fn revalidation_is_identical() {
        let ids = known(&["w1"]);
        let doc = app_with_layout(json!([
            {"i": "w1"}, {"i": "w1"}, {"i": "w2", "x": 35}
        ]));
        let validator = AppValidator::new(&ids);
        assert_eq!(validator.validate_value(doc.clone()), validator.validate_value(doc));
    }
}
