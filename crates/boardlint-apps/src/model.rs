//! # App Layout Model
//!
//! Typed records for `apps.json`: apps, their tabs, the widget placements
//! of each tab's grid layout, and parameter groups. As in the widget
//! registry model, every inspected field is a [`Field`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use boardlint_core::{Field, Record, Vocabulary, WidgetId};

/// A named dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppDefinition {
    pub name: Field<Value>,
    pub description: Field<Value>,
    pub img: Field<String>,
    pub img_dark: Field<String>,
    pub img_light: Field<String>,
    /// Tab id to tab definition.
    pub tabs: Field<Map<String, Value>>,
    pub groups: Field<Vec<Value>>,
    pub prompts: Field<Vec<Value>>,
}

impl AppDefinition {
    /// The image fields with their document key names.
    pub fn images(&self) -> [(&'static str, &Field<String>); 3] {
        [
            ("img", &self.img),
            ("img_dark", &self.img_dark),
            ("img_light", &self.img_light),
        ]
    }
}

/// One tab of an app.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TabDefinition {
    pub name: Field<Value>,
    pub id: Field<Value>,
    pub layout: Field<Vec<Value>>,
}

/// One widget placement within a tab's grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayoutItem {
    /// The referenced widget.
    pub i: Field<WidgetId>,
    pub x: Field<f64>,
    pub y: Field<f64>,
    pub w: Field<f64>,
    pub h: Field<f64>,
    pub state: Field<Record<WidgetState>>,
    pub groups: Field<Vec<Value>>,
}

/// Pre-configured widget state carried by a layout item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WidgetState {
    pub params: Field<Map<String, Value>>,
    #[serde(rename = "chartView")]
    pub chart_view: Field<Map<String, Value>>,
    #[serde(rename = "columnState")]
    pub column_state: Field<Map<String, Value>>,
}

impl WidgetState {
    /// The state sections with their document key names.
    pub fn sections(&self) -> [(&'static str, &Field<Map<String, Value>>); 3] {
        [
            ("params", &self.params),
            ("chartView", &self.chart_view),
            ("columnState", &self.column_state),
        ]
    }
}

/// How a group's shared parameter is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupType {
    Param,
    EndpointParam,
}

impl Vocabulary for GroupType {
    const ALL: &'static [Self] = &[Self::Param, Self::EndpointParam];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Param => "param",
            Self::EndpointParam => "endpointParam",
        }
    }
}

/// A named cluster of widgets sharing a driving parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupDefinition {
    pub name: Field<Value>,
    #[serde(rename = "type")]
    pub group_type: Field<GroupType>,
    #[serde(rename = "paramName")]
    pub param_name: Field<Value>,
    #[serde(rename = "widgetIds")]
    pub widget_ids: Field<Vec<Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn group_type_agrees_with_serde() {
        for t in GroupType::ALL {
            assert_eq!(serde_json::to_value(t).unwrap(), json!(t.as_str()));
        }
        assert_eq!(GroupType::parse("endpointParam"), Some(GroupType::EndpointParam));
        assert_eq!(GroupType::listing(), "param, endpointParam");
    }

    #[test]
    fn layout_item_shapes() {
        let item: LayoutItem = serde_json::from_value(json!({
            "i": "prices", "x": 0, "w": 20.5, "h": "tall",
            "state": {"params": {"symbol": "AAPL"}}
        }))
        .unwrap();
        assert_eq!(item.i.present().map(WidgetId::as_str), Some("prices"));
        assert_eq!(item.x.present(), Some(&0.0));
        assert!(item.y.is_missing());
        assert_eq!(item.w.present(), Some(&20.5));
        assert_eq!(item.h.invalid(), Some(&json!("tall")));
        let state = item.state.present().unwrap();
        assert!(state.params.present().is_some());
        assert!(state.chart_view.is_missing());
    }

    #[test]
    fn null_state_section_is_invalid() {
        let state: WidgetState = serde_json::from_value(json!({"chartView": null})).unwrap();
        assert_eq!(state.chart_view.invalid(), Some(&Value::Null));
    }

    #[test]
    fn numeric_widget_reference_is_invalid() {
        let item: LayoutItem = serde_json::from_value(json!({"i": 7})).unwrap();
        assert_eq!(item.i.invalid(), Some(&json!(7)));
    }
}
