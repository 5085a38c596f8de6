// crates/todo-contract-cli/src/report.rs
// ============================================================================
// Module: Run Report Rendering
// Description: Text and JSON renderings of a run report.
// Purpose: Turn runner verdicts into operator-facing output.
// Dependencies: todo-contract-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Text output lists one line per scenario with failure reasons indented
//! beneath it, followed by a summary. JSON output carries the same data with
//! explicit counts for tooling.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use todo_contract_core::RunReport;
use todo_contract_core::ScenarioOutcome;

use crate::t;

// ============================================================================
// SECTION: JSON
// ============================================================================

/// Machine-readable report document.
#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    /// True when every scenario passed.
    all_passed: bool,
    /// Scenarios that passed.
    passed: usize,
    /// Scenarios that failed.
    failed: usize,
    /// Per-scenario outcomes in run order.
    outcomes: &'a [ScenarioOutcome],
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when serialization fails.
pub fn render_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ReportDocument {
        all_passed: report.all_passed(),
        passed: report.passed_count(),
        failed: report.failed_count(),
        outcomes: &report.outcomes,
    })
}

// ============================================================================
// SECTION: Text
// ============================================================================

/// Renders the report as human-readable text.
#[must_use]
pub fn render_text(report: &RunReport) -> String {
    let mut output = String::new();
    for outcome in &report.outcomes {
        let line = if outcome.passed() {
            t!("report.pass", scenario = outcome.scenario)
        } else {
            t!("report.fail", scenario = outcome.scenario)
        };
        output.push_str(&line);
        output.push('\n');
        for reason in outcome.reasons() {
            output.push_str(&t!("report.reason", reason = reason));
            output.push('\n');
        }
    }
    output.push_str(&t!(
        "report.summary",
        passed = report.passed_count(),
        failed = report.failed_count()
    ));
    output.push('\n');
    output
}
