//! # Response Shapes
//!
//! The payload each widget type expects from its endpoint. A failing
//! shape check means the endpoint answered but the dashboard could not
//! render the result.

use serde_json::Value;

use boardlint_widgets::WidgetType;

/// Expected top-level shape of a widget endpoint response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Any JSON array.
    Array,
    /// An object carrying `data` or `layout` (a plotting figure).
    Figure,
    /// An array of objects each carrying `label` and `value`.
    Metrics,
    /// A JSON string.
    Text,
    /// An array of objects each carrying `title`.
    Articles,
    /// A string, or an object carrying `content`.
    HtmlContent,
    /// An object carrying `data_format`.
    DataFormat,
    /// An object carrying `rowData`.
    RowData,
    /// Any JSON object.
    Object,
    /// Anything.
    Any,
}

impl ResponseShape {
    /// The shape expected for a widget type. Unknown types accept anything.
    pub fn for_widget(kind: Option<WidgetType>) -> Self {
        match kind {
            Some(WidgetType::Table | WidgetType::MultiFileViewer | WidgetType::LiveGrid) => {
                Self::Array
            }
            Some(WidgetType::Chart) => Self::Figure,
            Some(WidgetType::Metric) => Self::Metrics,
            Some(WidgetType::Markdown) => Self::Text,
            Some(WidgetType::Newsfeed) => Self::Articles,
            Some(WidgetType::Html) => Self::HtmlContent,
            Some(WidgetType::Pdf | WidgetType::Omni) => Self::DataFormat,
            Some(WidgetType::SsrmTable) => Self::RowData,
            Some(WidgetType::ChartHighcharts) => Self::Object,
            Some(WidgetType::AdvancedCharting) | None => Self::Any,
        }
    }

    pub fn matches(&self, body: &Value) -> bool {
        match self {
            Self::Array => body.is_array(),
            Self::Figure => has_any_key(body, &["data", "layout"]),
            Self::Metrics => all_objects_with(body, &["label", "value"]),
            Self::Text => body.is_string(),
            Self::Articles => all_objects_with(body, &["title"]),
            Self::HtmlContent => body.is_string() || has_any_key(body, &["content"]),
            Self::DataFormat => has_any_key(body, &["data_format"]),
            Self::RowData => has_any_key(body, &["rowData"]),
            Self::Object => body.is_object(),
            Self::Any => true,
        }
    }
}

fn has_any_key(body: &Value, keys: &[&str]) -> bool {
    body.as_object()
        .is_some_and(|o| keys.iter().any(|k| o.contains_key(*k)))
}

fn all_objects_with(body: &Value, keys: &[&str]) -> bool {
    body.as_array().is_some_and(|items| {
        items.iter().all(|item| {
            item.as_object()
                .is_some_and(|o| keys.iter().all(|k| o.contains_key(*k)))
        })
    })
}
