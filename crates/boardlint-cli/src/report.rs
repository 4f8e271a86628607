//! # Report Rendering
//!
//! Text blocks for each validator plus JSON output. Renderers return the
//! whole report as a `String` so the subcommands print exactly once and
//! tests can inspect the output.

use std::path::Path;

use serde::Serialize;

use boardlint_apps::AppValidation;
use boardlint_core::ValidationReport;
use boardlint_probe::ProbeReport;
use boardlint_widgets::WidgetValidation;

use crate::check::AppCheck;

const RULE_WIDTH: usize = 60;
const WIDE_RULE_WIDTH: usize = 70;

/// Column widths of one endpoint result line: kind, target, time.
const KIND_WIDTH: usize = 15;
const TARGET_WIDTH: usize = 25;
const TIME_WIDTH: usize = 8;

fn rule(c: char, width: usize) -> String {
    std::iter::repeat(c).take(width).collect()
}

fn banner(out: &mut Vec<String>, title: &str, width: usize) {
    out.push(String::new());
    out.push(rule('=', width));
    out.push(title.to_string());
    out.push(rule('=', width));
}

fn findings(out: &mut Vec<String>, report: &ValidationReport) {
    if !report.errors.is_empty() {
        out.push(String::new());
        out.push(format!("ERRORS ({}):", report.errors.len()));
        out.extend(report.error_lines().into_iter().map(|l| format!("   - {l}")));
    }
    if !report.warnings.is_empty() {
        out.push(String::new());
        out.push(format!("WARNINGS ({}):", report.warnings.len()));
        out.extend(report.warning_lines().into_iter().map(|l| format!("   - {l}")));
    }
}

fn verdict(out: &mut Vec<String>, report: &ValidationReport) {
    out.push(String::new());
    out.push(
        if !report.is_valid() {
            "FAIL: validation failed"
        } else if report.warnings.is_empty() {
            "PASS: all validations passed"
        } else {
            "PASS: validation passed with warnings"
        }
        .to_string(),
    );
}

/// Render the `widgets.json` report block.
pub fn render_widgets(dir: &Path, result: &WidgetValidation) -> String {
    let mut out = Vec::new();
    banner(&mut out, "WIDGET VALIDATION REPORT", RULE_WIDTH);
    out.push(format!("Path: {}", dir.display()));
    out.push(format!("Widgets found: {}", result.widget_count));
    findings(&mut out, &result.report);
    verdict(&mut out, &result.report);
    out.push(String::new());
    out.push(rule('=', RULE_WIDTH));
    out.join("\n")
}

/// Render the `apps.json` report block.
pub fn render_apps(dir: &Path, result: &AppValidation) -> String {
    let mut out = Vec::new();
    banner(&mut out, "APPS VALIDATION REPORT", RULE_WIDTH);
    out.push(format!("Path: {}", dir.display()));
    out.push(format!("Widget IDs loaded: {}", result.widget_ids_loaded));
    out.push(format!("Tab layouts validated: {}", result.layouts_validated));
    findings(&mut out, &result.report);
    verdict(&mut out, &result.report);
    out.push(String::new());
    out.push(rule('=', RULE_WIDTH));
    out.join("\n")
}

/// Render both blocks followed by the combined result.
pub fn render_check(dir: &Path, check: &AppCheck) -> String {
    let mut out = vec![
        render_widgets(dir, &check.widgets),
        render_apps(dir, &check.apps),
    ];

    let mut tail = Vec::new();
    banner(&mut tail, "FINAL RESULT", RULE_WIDTH);
    tail.push(format!(
        "Errors: {}, Warnings: {}",
        check.error_count(),
        check.warning_count()
    ));
    tail.push(String::new());
    tail.push(
        if check.is_valid() {
            "PASS: all validations passed"
        } else {
            "FAIL: validation failed, fix the errors above"
        }
        .to_string(),
    );
    tail.push(String::new());
    tail.push(rule('=', RULE_WIDTH));
    out.push(tail.join("\n"));
    out.join("\n")
}

/// Render the endpoint probe report.
pub fn render_probe(dir: &Path, probe: &ProbeReport) -> String {
    let mut out = Vec::new();
    banner(&mut out, "ENDPOINT VALIDATION REPORT", WIDE_RULE_WIDTH);
    out.push(format!("App Path: {}", dir.display()));
    out.push(format!("Base URL: {}", probe.base_url));
    out.push(format!("Widgets: {}", probe.widget_count));
    out.push(String::new());
    out.push(format!(
        "Results: {} passed, {} failed",
        probe.passed(),
        probe.failed()
    ));

    if !probe.outcomes.is_empty() {
        out.push(String::new());
        out.push(rule('-', WIDE_RULE_WIDTH));
        out.push("ENDPOINT RESULTS".to_string());
        out.push(rule('-', WIDE_RULE_WIDTH));
        for outcome in &probe.outcomes {
            let status = if outcome.success { "OK  " } else { "FAIL" };
            let time = match outcome.elapsed_ms {
                Some(ms) => format!("{ms:.0}ms"),
                None => "N/A".to_string(),
            };
            out.push(format!(
                "{status} [{:<KIND_WIDTH$}] {:<TARGET_WIDTH$} {:<TIME_WIDTH$} {}",
                outcome.kind, outcome.target, time, outcome.message
            ));
        }
    }

    findings(&mut out, &probe.report);
    out.push(String::new());
    out.push(rule('=', WIDE_RULE_WIDTH));
    out.push(
        if probe.is_valid() {
            "PASS: all endpoints validated successfully"
        } else {
            "FAIL: endpoint validation failed, fix the errors and retry"
        }
        .to_string(),
    );
    out.push(rule('=', WIDE_RULE_WIDTH));
    out.join("\n")
}

/// Serialize any report as pretty-printed JSON.
pub fn render_json<T: Serialize>(report: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardlint_probe::ProbeOutcome;

    fn widgets_with(report: ValidationReport, count: usize) -> WidgetValidation {
        WidgetValidation {
            report,
            widget_count: count,
            registry_loaded: true,
            ..WidgetValidation::default()
        }
    }

    #[test]
    fn clean_widget_report() {
        let text = render_widgets(Path::new("apps/demo"), &widgets_with(ValidationReport::new(), 3));
        assert!(text.contains("WIDGET VALIDATION REPORT"));
        assert!(text.contains("Path: apps/demo"));
        assert!(text.contains("Widgets found: 3"));
        assert!(text.contains("PASS: all validations passed"));
        assert!(!text.contains("ERRORS"));
        assert!(!text.contains("WARNINGS"));
    }

    #[test]
    fn findings_are_listed_with_locations() {
        let mut report = ValidationReport::new();
        report.error("w1", "Missing required field: type");
        report.warning("w2", "Missing gridData");
        report.warning("w2", "Missing description");
        let text = render_widgets(Path::new("."), &widgets_with(report, 2));
        assert!(text.contains("ERRORS (1):\n   - [w1] Missing required field: type"));
        assert!(text.contains("WARNINGS (2):"));
        assert!(text.contains("   - [w2] Missing description"));
        assert!(text.contains("FAIL: validation failed"));
    }

    #[test]
    fn warnings_alone_still_pass() {
        let mut report = ValidationReport::new();
        report.document_warning("widgets.json is empty");
        let text = render_widgets(Path::new("."), &widgets_with(report, 0));
        assert!(text.contains("   - widgets.json is empty"));
        assert!(text.contains("PASS: validation passed with warnings"));
    }

    #[test]
    fn apps_report_counters() {
        let result = AppValidation {
            widget_ids_loaded: 4,
            layouts_validated: 2,
            ..AppValidation::default()
        };
        let text = render_apps(Path::new("."), &result);
        assert!(text.contains("APPS VALIDATION REPORT"));
        assert!(text.contains("Widget IDs loaded: 4"));
        assert!(text.contains("Tab layouts validated: 2"));
    }

    #[test]
    fn final_result_block() {
        let mut apps = AppValidation::default();
        apps.report.error("app[0]", "Missing required field: name");
        let check = AppCheck {
            widgets: widgets_with(ValidationReport::new(), 1),
            apps,
        };
        let text = render_check(Path::new("."), &check);
        let widgets_at = text.find("WIDGET VALIDATION REPORT").unwrap();
        let apps_at = text.find("APPS VALIDATION REPORT").unwrap();
        let final_at = text.find("FINAL RESULT").unwrap();
        assert!(widgets_at < apps_at && apps_at < final_at);
        assert!(text.contains("Errors: 1, Warnings: 0"));
        assert!(text.ends_with(&rule('=', RULE_WIDTH)));
        assert!(text.contains("FAIL: validation failed, fix the errors above"));
    }

    #[test]
    fn probe_lines_are_columnar() {
        let probe = ProbeReport {
            base_url: "http://localhost:7779".into(),
            widget_count: 2,
            outcomes: vec![
                ProbeOutcome {
                    target: "prices".into(),
                    endpoint: "prices".into(),
                    kind: "table".into(),
                    success: true,
                    message: "OK".into(),
                    elapsed_ms: Some(12.4),
                },
                ProbeOutcome {
                    target: "news".into(),
                    endpoint: "news".into(),
                    kind: "markdown".into(),
                    success: false,
                    message: "Connection refused".into(),
                    elapsed_ms: None,
                },
            ],
            report: ValidationReport::new(),
        };
        let text = render_probe(Path::new("."), &probe);
        assert!(text.contains("Results: 1 passed, 1 failed"));
        assert!(text.contains(&format!(
            "OK   [{:<15}] {:<25} {:<8} OK",
            "table", "prices", "12ms"
        )));
        assert!(text.contains(&format!(
            "FAIL [{:<15}] {:<25} {:<8} Connection refused",
            "markdown", "news", "N/A"
        )));
    }

    #[test]
    fn json_output_carries_diagnostics() {
        let mut report = ValidationReport::new();
        report.error("w1", "Missing required field: name");
        let json = render_json(&widgets_with(report, 1)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["widget_count"], 1);
        assert_eq!(value["report"]["errors"][0]["location"], "w1");
        assert_eq!(
            value["report"]["errors"][0]["message"],
            "Missing required field: name"
        );
    }
}
