//! # Widget Registry Model
//!
//! Typed records for one `widgets.json` entry and the closed vocabularies
//! its fields draw from. Every inspected field is a [`Field`], so a widget
//! object always deserializes and shape problems are left for the
//! validator to report.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use boardlint_core::{Field, JsonKind, Record, Vocabulary};

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

/// Visual type of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    Table,
    Chart,
    #[serde(rename = "chart-highcharts")]
    ChartHighcharts,
    Markdown,
    Metric,
    Newsfeed,
    Html,
    Pdf,
    MultiFileViewer,
    AdvancedCharting,
    LiveGrid,
    Omni,
    SsrmTable,
}

impl WidgetType {
    /// Widget types whose endpoint takes its parameters as a JSON body.
    pub fn uses_post_body(&self) -> bool {
        matches!(self, Self::Omni | Self::MultiFileViewer | Self::SsrmTable)
    }

    /// Widget types that may legitimately return a non-JSON body.
    pub fn accepts_text_body(&self) -> bool {
        matches!(self, Self::Html | Self::Markdown)
    }
}

impl Vocabulary for WidgetType {
    const ALL: &'static [Self] = &[
        Self::Table,
        Self::Chart,
        Self::ChartHighcharts,
        Self::Markdown,
        Self::Metric,
        Self::Newsfeed,
        Self::Html,
        Self::Pdf,
        Self::MultiFileViewer,
        Self::AdvancedCharting,
        Self::LiveGrid,
        Self::Omni,
        Self::SsrmTable,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Chart => "chart",
            Self::ChartHighcharts => "chart-highcharts",
            Self::Markdown => "markdown",
            Self::Metric => "metric",
            Self::Newsfeed => "newsfeed",
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::MultiFileViewer => "multi_file_viewer",
            Self::AdvancedCharting => "advanced_charting",
            Self::LiveGrid => "live_grid",
            Self::Omni => "omni",
            Self::SsrmTable => "ssrm_table",
        }
    }
}

/// Input control kind of a widget parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Number,
    Boolean,
    Date,
    Endpoint,
    Ticker,
    Tabs,
    Form,
}

impl Vocabulary for ParamKind {
    const ALL: &'static [Self] = &[
        Self::Text,
        Self::Number,
        Self::Boolean,
        Self::Date,
        Self::Endpoint,
        Self::Ticker,
        Self::Tabs,
        Self::Form,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Endpoint => "endpoint",
            Self::Ticker => "ticker",
            Self::Tabs => "tabs",
            Self::Form => "form",
        }
    }
}

/// Cell data type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellDataType {
    Text,
    Number,
    Boolean,
    Date,
    DateString,
    Object,
}

impl Vocabulary for CellDataType {
    const ALL: &'static [Self] = &[
        Self::Text,
        Self::Number,
        Self::Boolean,
        Self::Date,
        Self::DateString,
        Self::Object,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateString => "dateString",
            Self::Object => "object",
        }
    }
}

/// Role of a table column when the table is charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartDataType {
    Category,
    Series,
    Time,
    Excluded,
}

impl Vocabulary for ChartDataType {
    const ALL: &'static [Self] = &[Self::Category, Self::Series, Self::Time, Self::Excluded];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Series => "series",
            Self::Time => "time",
            Self::Excluded => "excluded",
        }
    }
}

/// Value formatter applied to a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatterFn {
    Int,
    #[serde(rename = "none")]
    NoFormat,
    Percent,
    Normalized,
    NormalizedPercent,
    DateToYear,
}

impl Vocabulary for FormatterFn {
    const ALL: &'static [Self] = &[
        Self::Int,
        Self::NoFormat,
        Self::Percent,
        Self::Normalized,
        Self::NormalizedPercent,
        Self::DateToYear,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::NoFormat => "none",
            Self::Percent => "percent",
            Self::Normalized => "normalized",
            Self::NormalizedPercent => "normalizedPercent",
            Self::DateToYear => "dateToYear",
        }
    }
}

/// Cell renderer applied to a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderFn {
    GreenRed,
    TitleCase,
    HoverCard,
    CellOnClick,
    ColumnColor,
    ShowCellChange,
}

impl Vocabulary for RenderFn {
    const ALL: &'static [Self] = &[
        Self::GreenRed,
        Self::TitleCase,
        Self::HoverCard,
        Self::CellOnClick,
        Self::ColumnColor,
        Self::ShowCellChange,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::GreenRed => "greenRed",
            Self::TitleCase => "titleCase",
            Self::HoverCard => "hoverCard",
            Self::CellOnClick => "cellOnClick",
            Self::ColumnColor => "columnColor",
            Self::ShowCellChange => "showCellChange",
        }
    }
}

/// Inline chart drawn inside a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SparklineType {
    Line,
    Area,
    Bar,
}

impl Vocabulary for SparklineType {
    const ALL: &'static [Self] = &[Self::Line, Self::Area, Self::Bar];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Area => "area",
            Self::Bar => "bar",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One value of the `widgets.json` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WidgetDefinition {
    pub name: Field<String>,
    #[serde(rename = "type")]
    pub widget_type: Field<WidgetType>,
    pub endpoint: Field<String>,
    #[serde(rename = "gridData")]
    pub grid_data: Field<Record<GridData>>,
    pub params: Field<Vec<Value>>,
    pub data: Field<Record<TableData>>,
    pub mcp_tool: Field<Record<McpToolBinding>>,
    #[serde(rename = "refetchInterval")]
    pub refetch_interval: Field<RefetchInterval>,
}

impl WidgetDefinition {
    /// The declared widget type, if it is a known one.
    pub fn kind(&self) -> Option<WidgetType> {
        self.widget_type.present().copied()
    }

    /// The endpoint path, if it is a non-empty string.
    pub fn endpoint_path(&self) -> Option<&str> {
        self.endpoint
            .present()
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }

    /// Object parameters after flattening one level of grouping.
    pub fn parameters(&self) -> Vec<ParameterDefinition> {
        self.params
            .present()
            .map(|p| flatten_params(p))
            .unwrap_or_default()
    }
}

/// Default size and resize limits of a widget, in grid units.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GridData {
    pub w: Field<f64>,
    pub h: Field<f64>,
    #[serde(rename = "minW")]
    pub min_w: Field<f64>,
    #[serde(rename = "maxW")]
    pub max_w: Field<f64>,
    #[serde(rename = "minH")]
    pub min_h: Field<f64>,
    #[serde(rename = "maxH")]
    pub max_h: Field<f64>,
}

impl GridData {
    /// The optional resize limits with their document key names.
    pub fn limits(&self) -> [(&'static str, &Field<f64>); 4] {
        [
            ("minW", &self.min_w),
            ("maxW", &self.max_w),
            ("minH", &self.min_h),
            ("maxH", &self.max_h),
        ]
    }
}

/// One user-facing input of a widget.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParameterDefinition {
    #[serde(rename = "paramName")]
    pub param_name: Field<Value>,
    #[serde(rename = "type")]
    pub kind: Field<ParamKind>,
    pub options: Field<Vec<Value>>,
    pub value: Field<Value>,
    #[serde(rename = "optionsEndpoint")]
    pub options_endpoint: Field<Value>,
}

/// The `data` section of a table widget.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableData {
    #[serde(rename = "columnsDefs")]
    pub columns_defs: Field<Vec<Value>>,
}

/// One entry of `data.columnsDefs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnDefinition {
    pub field: Field<String>,
    #[serde(rename = "cellDataType")]
    pub cell_data_type: Field<CellDataType>,
    #[serde(rename = "chartDataType")]
    pub chart_data_type: Field<ChartDataType>,
    #[serde(rename = "formatterFn")]
    pub formatter_fn: Field<FormatterFn>,
    /// A single renderer name or a list of them.
    #[serde(rename = "renderFn")]
    pub render_fn: Field<Value>,
    pub sparkline: Field<Record<Sparkline>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sparkline {
    #[serde(rename = "type")]
    pub kind: Field<SparklineType>,
    #[serde(rename = "dataField")]
    pub data_field: Field<Value>,
}

/// Association between a widget and an external MCP tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct McpToolBinding {
    pub mcp_server: Field<Value>,
    pub tool_id: Field<Value>,
}

/// Automatic refresh period of a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefetchInterval {
    /// Refresh every `n` milliseconds.
    Millis(f64),
    /// `false`: refresh disabled.
    Disabled,
}

impl<'de> Deserialize<'de> for RefetchInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_f64()
                .map(Self::Millis)
                .ok_or_else(|| D::Error::custom("refetchInterval out of range")),
            Value::Bool(false) => Ok(Self::Disabled),
            other => Err(D::Error::custom(format!(
                "expected number or false, got {}",
                JsonKind::of(&other)
            ))),
        }
    }
}

/// Flatten a `params` array by one level.
///
/// Array elements contribute their items, object elements contribute
/// themselves, anything else is dropped. Only objects survive.
pub fn flatten_params(params: &[Value]) -> Vec<ParameterDefinition> {
    params
        .iter()
        .flat_map(|p| match p {
            Value::Array(group) => group.iter().collect::<Vec<_>>(),
            Value::Object(_) => vec![p],
            _ => Vec::new(),
        })
        .filter(|p| p.is_object())
        .filter_map(|p| ParameterDefinition::deserialize(p).ok())
        .collect()
}
