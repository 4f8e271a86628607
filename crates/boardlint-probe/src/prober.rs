//! # Endpoint Prober
//!
//! Calls each widget's endpoint on a running backend and checks that the
//! answer is something the dashboard can render. Requests are issued one
//! at a time with bounded timeouts and no retry.
//!
//! ## Run Order
//!
//! 1. Liveness: `GET <base_url>` must answer 200, otherwise nothing else runs.
//! 2. Core documents: `/widgets.json` (required) and `/apps.json` (optional).
//! 3. Every widget in registry order.

use std::time::{Duration, Instant};

use reqwest::RequestBuilder;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use boardlint_core::{display_value, Field, ValidationReport, Vocabulary};
use boardlint_widgets::{WidgetDefinition, WidgetEntry, WidgetRegistry, WidgetType};

use crate::config::ProbeConfig;
use crate::shape::ResponseShape;

/// Kind label used for the core document outcomes.
pub const CORE_KIND: &str = "core";

/// Characters of an error body quoted in a failure message.
const EXCERPT_CHARS: usize = 100;

const WIDGETS_DOCUMENT: &str = "/widgets.json";
const APPS_DOCUMENT: &str = "/apps.json";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Operational errors that prevent probing altogether.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Why a single endpoint failed its probe. The display text is the
/// message recorded in the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("No endpoint defined")]
    NoEndpoint,

    #[error("HTTP {status}: {excerpt}")]
    Status { status: u16, excerpt: String },

    #[error("Invalid JSON response")]
    InvalidJson,

    #[error("Invalid response format for {widget_type} widget")]
    ShapeMismatch { widget_type: String },

    #[error("Connection refused")]
    ConnectionRefused,

    #[error("Request timeout (>{0}s)")]
    Timeout(u64),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Error: {0}")]
    Transport(String),
}

impl ProbeFailure {
    fn from_transport(error: &reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout.as_secs())
        } else if error.is_connect() {
            Self::ConnectionRefused
        } else {
            Self::Transport(error.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Result of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeOutcome {
    /// Widget identifier, or the document path for core endpoints.
    pub target: String,
    pub endpoint: String,
    /// Widget type label, or [`CORE_KIND`].
    pub kind: String,
    pub success: bool,
    pub message: String,
    /// Round-trip time, when a response was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,
}

/// Everything one prober run observed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProbeReport {
    pub base_url: String,
    pub widget_count: usize,
    pub outcomes: Vec<ProbeOutcome>,
    pub report: ValidationReport,
}

impl ProbeReport {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Number of successful outcomes.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    /// Number of failed outcomes.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}

/// A response read to completion.
struct Fetched {
    status: u16,
    body: String,
    elapsed_ms: f64,
}

// ---------------------------------------------------------------------------
// Prober
// ---------------------------------------------------------------------------

/// HTTP prober for widget endpoints.
#[derive(Debug, Clone)]
pub struct EndpointProber {
    http: reqwest::Client,
    config: ProbeConfig,
}

impl EndpointProber {
    /// Create a prober from configuration.
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ProbeError::Client)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe the backend and every widget of `registry`.
    pub async fn probe_registry(&self, registry: &WidgetRegistry) -> ProbeReport {
        let mut out = ProbeReport {
            base_url: self.config.display_base().to_string(),
            widget_count: registry.len(),
            ..ProbeReport::default()
        };

        if !self.check_liveness().await {
            out.report.document_error(format!(
                "Server not running at {}",
                self.config.display_base()
            ));
            return out;
        }

        self.probe_core_endpoints(&mut out).await;

        for entry in registry.iter() {
            let outcome = self.probe_widget(entry).await;
            tracing::debug!(
                widget = entry.id.as_str(),
                success = outcome.success,
                message = %outcome.message,
                "probed widget endpoint"
            );
            if !outcome.success {
                out.report.error(entry.id.as_str(), outcome.message.clone());
            }
            out.outcomes.push(outcome);
        }

        tracing::info!(
            passed = out.passed(),
            failed = out.failed(),
            "endpoint probe complete"
        );
        out
    }

    /// True when `GET <base_url>` answers 200 within the liveness timeout.
    pub async fn check_liveness(&self) -> bool {
        let request = self
            .http
            .get(self.config.base_url.clone())
            .timeout(self.config.liveness_timeout);
        match request.send().await {
            Ok(resp) => resp.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::warn!(base_url = %self.config.base_url, error = %e, "backend unreachable");
                false
            }
        }
    }

    /// Probe `/widgets.json` and `/apps.json`, appending to `out`.
    pub async fn probe_core_endpoints(&self, out: &mut ProbeReport) {
        let widgets = self.fetch_core(WIDGETS_DOCUMENT).await;
        let outcome = match widgets {
            Ok(Fetched {
                status: 200,
                body,
                elapsed_ms,
            }) => match serde_json::from_str::<Value>(&body) {
                Ok(Value::Array(items)) => core_outcome(
                    WIDGETS_DOCUMENT,
                    true,
                    format!("OK ({} widgets)", items.len()),
                    Some(elapsed_ms),
                ),
                Ok(Value::Object(map)) => core_outcome(
                    WIDGETS_DOCUMENT,
                    true,
                    format!("OK ({} widgets)", map.len()),
                    Some(elapsed_ms),
                ),
                Ok(_) => {
                    out.report
                        .document_error(format!("{WIDGETS_DOCUMENT} returns invalid format"));
                    core_outcome(WIDGETS_DOCUMENT, false, "Invalid format", Some(elapsed_ms))
                }
                Err(_) => {
                    out.report
                        .document_error(format!("{WIDGETS_DOCUMENT} returns invalid JSON"));
                    core_outcome(WIDGETS_DOCUMENT, false, "Invalid JSON", Some(elapsed_ms))
                }
            },
            Ok(fetched) => {
                out.report.document_error(format!(
                    "{WIDGETS_DOCUMENT} returns HTTP {}",
                    fetched.status
                ));
                core_outcome(
                    WIDGETS_DOCUMENT,
                    false,
                    format!("HTTP {}", fetched.status),
                    Some(fetched.elapsed_ms),
                )
            }
            Err(failure) => {
                out.report
                    .document_error(format!("{WIDGETS_DOCUMENT} error: {failure}"));
                core_outcome(WIDGETS_DOCUMENT, false, failure.to_string(), None)
            }
        };
        out.outcomes.push(outcome);

        let apps = self.fetch_core(APPS_DOCUMENT).await;
        let outcome = match apps {
            Ok(Fetched {
                status: 200,
                elapsed_ms,
                ..
            }) => core_outcome(APPS_DOCUMENT, true, "OK", Some(elapsed_ms)),
            Ok(Fetched {
                status: 404,
                elapsed_ms,
                ..
            }) => {
                out.report
                    .document_warning(format!("{APPS_DOCUMENT} not found (optional endpoint)"));
                core_outcome(APPS_DOCUMENT, true, "Not found (optional)", Some(elapsed_ms))
            }
            Ok(fetched) => core_outcome(
                APPS_DOCUMENT,
                false,
                format!("HTTP {}", fetched.status),
                Some(fetched.elapsed_ms),
            ),
            Err(failure) => {
                out.report
                    .document_warning(format!("{APPS_DOCUMENT} error: {failure}"));
                return;
            }
        };
        out.outcomes.push(outcome);
    }

    /// Probe one widget's endpoint.
    pub async fn probe_widget(&self, entry: &WidgetEntry) -> ProbeOutcome {
        let definition = entry.definition.as_ref().ok();
        let kind = definition.and_then(WidgetDefinition::kind);
        let kind_label = definition
            .map(widget_kind_label)
            .unwrap_or_else(|| "unknown".to_string());
        let endpoint = definition
            .and_then(WidgetDefinition::endpoint_path)
            .unwrap_or_default()
            .to_string();

        let mut outcome = ProbeOutcome {
            target: entry.id.to_string(),
            endpoint: endpoint.clone(),
            kind: kind_label.clone(),
            success: false,
            message: String::new(),
            elapsed_ms: None,
        };

        let result = match definition {
            Some(def) if !endpoint.is_empty() => {
                self.call_widget(def, kind, &kind_label, &endpoint, &mut outcome)
                    .await
            }
            _ => Err(ProbeFailure::NoEndpoint),
        };

        match result {
            Ok(message) => {
                outcome.success = true;
                outcome.message = message.to_string();
            }
            Err(failure) => outcome.message = failure.to_string(),
        }
        outcome
    }

    async fn call_widget(
        &self,
        def: &WidgetDefinition,
        kind: Option<WidgetType>,
        kind_label: &str,
        endpoint: &str,
        outcome: &mut ProbeOutcome,
    ) -> Result<&'static str, ProbeFailure> {
        let url = self
            .config
            .endpoint_url(endpoint)
            .map_err(|e| ProbeFailure::InvalidUrl(e.to_string()))?;
        let params = request_params(def);

        let request = if kind.is_some_and(|k| k.uses_post_body()) {
            self.http.post(url).json(&params)
        } else {
            self.http.get(url).query(&query_pairs(&params))
        };

        let fetched = self.fetch(request, self.config.widget_timeout).await?;
        outcome.elapsed_ms = Some(fetched.elapsed_ms);
        classify_response(kind, kind_label, fetched.status, &fetched.body)
    }

    async fn fetch_core(&self, document: &str) -> Result<Fetched, ProbeFailure> {
        let url = self
            .config
            .endpoint_url(document)
            .map_err(|e| ProbeFailure::InvalidUrl(e.to_string()))?;
        self.fetch(self.http.get(url), self.config.core_timeout).await
    }

    async fn fetch(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<Fetched, ProbeFailure> {
        let start = Instant::now();
        let transport = |e: reqwest::Error| ProbeFailure::from_transport(&e, timeout);
        let resp = request.timeout(timeout).send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport)?;
        Ok(Fetched {
            status,
            body,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

fn core_outcome(
    document: &str,
    success: bool,
    message: impl Into<String>,
    elapsed_ms: Option<f64>,
) -> ProbeOutcome {
    ProbeOutcome {
        target: document.to_string(),
        endpoint: document.to_string(),
        kind: CORE_KIND.to_string(),
        success,
        message: message.into(),
        elapsed_ms,
    }
}

// ---------------------------------------------------------------------------
// Request and response helpers
// ---------------------------------------------------------------------------

/// The type label shown for a widget: its declared type string, or
/// `unknown` when absent or not a string.
pub fn widget_kind_label(def: &WidgetDefinition) -> String {
    match &def.widget_type {
        Field::Present(kind) => kind.as_str().to_string(),
        Field::Invalid(Value::String(raw)) => raw.clone(),
        _ => "unknown".to_string(),
    }
}

/// Default parameter values keyed by parameter name. A parameter without a
/// `value` contributes an empty string; later duplicates win.
pub fn request_params(def: &WidgetDefinition) -> Map<String, Value> {
    let mut params = Map::new();
    for param in def.parameters() {
        if let Field::Present(name) = &param.param_name {
            let value = param
                .value
                .present()
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            params.insert(display_value(name), value);
        }
    }
    params
}

/// Query-string pairs for a GET request. `null` values are omitted.
pub fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), display_value(v)))
        .collect()
}

/// Classify a completed response for a widget of type `kind`.
///
/// Returns the success message, or the failure.
pub fn classify_response(
    kind: Option<WidgetType>,
    kind_label: &str,
    status: u16,
    body: &str,
) -> Result<&'static str, ProbeFailure> {
    if status != 200 {
        return Err(ProbeFailure::Status {
            status,
            excerpt: body.chars().take(EXCERPT_CHARS).collect(),
        });
    }

    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(_) if kind.is_some_and(|k| k.accepts_text_body()) => {
            return Ok("OK (non-JSON response)");
        }
        Err(_) => return Err(ProbeFailure::InvalidJson),
    };

    if !ResponseShape::for_widget(kind).matches(&data) {
        return Err(ProbeFailure::ShapeMismatch {
            widget_type: kind_label.to_string(),
        });
    }

    Ok(match &data {
        Value::Array(items) if items.is_empty() => "OK (empty array)",
        Value::Object(map) if map.is_empty() => "OK (empty object)",
        _ => "OK",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition(doc: Value) -> WidgetDefinition {
        serde_json::from_value(doc).unwrap()
    }

    #[test]
    fn non_200_quotes_the_body() {
        let body = "x".repeat(150);
        let err = classify_response(Some(WidgetType::Table), "table", 500, &body).unwrap_err();
        assert_eq!(err.to_string(), format!("HTTP 500: {}", "x".repeat(100)));
    }

    #[test]
    fn non_json_bodies() {
        assert_eq!(
            classify_response(Some(WidgetType::Html), "html", 200, "<p>hi</p>"),
            Ok("OK (non-JSON response)")
        );
        assert_eq!(
            classify_response(Some(WidgetType::Markdown), "markdown", 200, "# Title"),
            Ok("OK (non-JSON response)")
        );
        assert_eq!(
            classify_response(Some(WidgetType::Table), "table", 200, "<p>hi</p>"),
            Err(ProbeFailure::InvalidJson)
        );
    }

    #[test]
    fn shape_mismatch_names_the_type() {
        let err = classify_response(Some(WidgetType::Table), "table", 200, "{\"rows\": []}")
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid response format for table widget");
    }

    #[test]
    fn empty_payloads_are_annotated() {
        assert_eq!(
            classify_response(Some(WidgetType::Table), "table", 200, "[]"),
            Ok("OK (empty array)")
        );
        assert_eq!(
            classify_response(Some(WidgetType::ChartHighcharts), "chart-highcharts", 200, "{}"),
            Ok("OK (empty object)")
        );
        assert_eq!(
            classify_response(Some(WidgetType::Table), "table", 200, "[{\"a\": 1}]"),
            Ok("OK")
        );
    }

    #[test]
    fn unknown_types_accept_any_json() {
        assert_eq!(classify_response(None, "gauge", 200, "42"), Ok("OK"));
    }

    #[test]
    fn params_flatten_with_defaults() {
        let def = definition(json!({
            "params": [
                [{"paramName": "symbol", "value": "AAPL"}, {"paramName": "limit", "value": 10}],
                {"paramName": "start"},
                {"paramName": "flag", "value": null},
                {"type": "text"}
            ]
        }));
        let params = request_params(&def);
        assert_eq!(params["symbol"], json!("AAPL"));
        assert_eq!(params["limit"], json!(10));
        assert_eq!(params["start"], json!(""));
        assert_eq!(params["flag"], Value::Null);
        assert_eq!(params.len(), 4);

        let pairs = query_pairs(&params);
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("start".to_string(), String::new()),
                ("symbol".to_string(), "AAPL".to_string()),
            ]
        );
    }

    #[test]
    fn kind_labels() {
        assert_eq!(widget_kind_label(&definition(json!({"type": "omni"}))), "omni");
        assert_eq!(widget_kind_label(&definition(json!({"type": "gauge"}))), "gauge");
        assert_eq!(widget_kind_label(&definition(json!({"type": 3}))), "unknown");
        assert_eq!(widget_kind_label(&definition(json!({}))), "unknown");
    }

    #[test]
    fn report_counts() {
        let mut report = ProbeReport::default();
        report.outcomes.push(core_outcome("/widgets.json", true, "OK (1 widgets)", Some(1.0)));
        report.outcomes.push(core_outcome("/apps.json", false, "HTTP 500", Some(1.0)));
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.is_valid());
    }
}
