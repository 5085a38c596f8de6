// crates/todo-contract-cli/tests/output.rs
// ============================================================================
// Module: CLI Output Tests
// Description: Report rendering and event sink behavior.
// Purpose: Ensure operator output and run logs stay stable.
// Dependencies: todo-contract-cli, todo-contract-config, tempfile
// ============================================================================

//! ## Overview
//! Exercises the library half of the CLI directly, without the binary.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use serde_json::Value;
use todo_contract_cli::log::FileEventSink;
use todo_contract_cli::log::RunEventRecord;
use todo_contract_cli::log::open_sink;
use todo_contract_cli::report::render_json;
use todo_contract_cli::report::render_text;
use todo_contract_config::LogConfig;
use todo_contract_config::LogSink;
use todo_contract_core::RunEvent;
use todo_contract_core::RunObserver;
use todo_contract_core::RunReport;
use todo_contract_core::ScenarioId;
use todo_contract_core::ScenarioOutcome;
use todo_contract_core::TodoId;
use todo_contract_core::Verdict;

fn sample_report() -> RunReport {
    RunReport {
        outcomes: vec![
            ScenarioOutcome {
                scenario: ScenarioId::TodosListed,
                verdict: Verdict::Passed,
            },
            ScenarioOutcome {
                scenario: ScenarioId::TodosXml,
                verdict: Verdict::Failed {
                    reasons: vec!["expected status 200, got 406".to_string()],
                },
            },
        ],
    }
}

#[test]
fn text_report_lists_outcomes_then_summary() {
    let text = render_text(&sample_report());
    assert_eq!(
        text,
        "PASS  todos-listed\nFAIL  todos-xml\n      - expected status 200, got 406\n1 passed, 1 \
         failed\n"
    );
}

#[test]
fn json_report_flattens_verdicts() {
    let json: Value = serde_json::from_str(&render_json(&sample_report()).unwrap()).unwrap();
    assert_eq!(json["all_passed"], Value::Bool(false));
    assert_eq!(json["outcomes"][0], serde_json::json!({
        "scenario": "todos-listed",
        "verdict": "passed"
    }));
    assert_eq!(json["outcomes"][1]["reasons"][0], "expected status 200, got 406");
}

#[test]
fn empty_report_renders_zero_summary() {
    assert_eq!(render_text(&RunReport::default()), "0 passed, 0 failed\n");
}

#[test]
fn event_records_flatten_the_event_next_to_timestamp() {
    let event = RunEvent::DrainProgress {
        deleted: TodoId::new(4),
        remaining: 3,
    };
    let record = serde_json::to_value(RunEventRecord::now(&event)).unwrap();
    assert_eq!(record["event"], "drain_progress");
    assert_eq!(record["deleted"], 4);
    assert_eq!(record["remaining"], 3);
    assert!(record["timestamp_ms"].as_u64().unwrap() > 0);
}

#[test]
fn file_sink_appends_one_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    fs::write(&path, "{\"event\":\"earlier\"}\n").unwrap();

    let sink = FileEventSink::new(&path).unwrap();
    sink.record(&RunEvent::ScenarioStarted {
        scenario: ScenarioId::TodosJson,
    });
    sink.record(&RunEvent::RunFinished {
        passed: 1,
        failed: 0,
    });

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "{\"event\":\"earlier\"}");
    let started: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(started["scenario"], "todos-json");
}

#[test]
fn open_sink_follows_log_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.jsonl");
    let config = LogConfig {
        sink: LogSink::File,
        path: Some(path.to_string_lossy().into_owned()),
    };
    let sink = open_sink(&config).unwrap();
    sink.record(&RunEvent::RunFinished {
        passed: 0,
        failed: 0,
    });
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);

    let missing_path = LogConfig {
        sink: LogSink::File,
        path: None,
    };
    assert!(open_sink(&missing_path).is_err());
    assert!(open_sink(&LogConfig::default()).is_ok());
}
