// crates/todo-contract-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Defaults and per-section invariants.
// Purpose: Ensure an empty config is valid and bad values fail closed.
// =============================================================================

//! Config defaults and validation tests for todo-contract-config.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use todo_contract_config::LogSink;
use todo_contract_core::RunnerConfig;
use todo_contract_core::ScenarioId;

mod common;

use common::TestResult;
use common::assert_invalid;
use common::config_from_toml;

#[test]
fn default_config_validates() -> TestResult {
    let config = config_from_toml("")?;
    config.validate().map_err(|err| err.to_string())?;
    if config.runner_config() != RunnerConfig::default() {
        return Err("defaults should match the runner defaults".to_string());
    }
    if config.log.sink != LogSink::Stderr {
        return Err("log sink should default to stderr".to_string());
    }
    if config.scenario_plan() != ScenarioId::ALL.to_vec() {
        return Err("empty run section should plan the whole catalog".to_string());
    }
    Ok(())
}

#[test]
fn executor_config_requires_base_url() -> TestResult {
    let config = config_from_toml("")?;
    assert_invalid(config.executor_config().map(|_| ()), "target.base_url is required")
}

#[test]
fn http_base_url_requires_opt_in() -> TestResult {
    let config = config_from_toml("[target]\nbase_url = \"http://localhost:4567\"\n")?;
    assert_invalid(config.validate(), "set target.allow_http = true")
}

#[test]
fn base_url_rejects_foreign_schemes_and_queries() -> TestResult {
    for (url, needle) in [
        ("ftp://example.com", "scheme ftp unsupported"),
        ("https://example.com/?q=1", "query or fragment"),
        ("https://example.com/#frag", "target.base_url must not carry a query or fragment"),
        ("not a url", "target.base_url is not a url"),
        ("   ", "must be 1-"),
    ] {
        let config = config_from_toml(&format!("[target]\nbase_url = \"{url}\"\n"))?;
        assert_invalid(config.validate(), needle)?;
    }
    Ok(())
}

#[test]
fn timeout_must_be_in_range() -> TestResult {
    for timeout in [0, 99, 120_001] {
        let config = config_from_toml(&format!("[target]\ntimeout_ms = {timeout}\n"))?;
        assert_invalid(config.validate(), "target.timeout_ms")?;
    }
    let config = config_from_toml("[target]\ntimeout_ms = 100\n")?;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn response_cap_and_user_agent_are_bounded() -> TestResult {
    let config = config_from_toml("[target]\nmax_response_bytes = 0\n")?;
    assert_invalid(config.validate(), "target.max_response_bytes")?;
    let config = config_from_toml("[target]\nuser_agent = \" \"\n")?;
    assert_invalid(config.validate(), "target.user_agent")
}

#[test]
fn run_rejects_duplicates_and_empty_plans() -> TestResult {
    let config = config_from_toml("[run]\nskip = [\"todos-xml\", \"todos-xml\"]\n")?;
    assert_invalid(config.validate(), "run.skip lists todos-xml more than once")?;
    let config = config_from_toml("[run]\nscenarios = [\"todos-xml\"]\nskip = [\"todos-xml\"]\n")?;
    assert_invalid(config.validate(), "run selects no scenarios")?;
    let config = config_from_toml("[run]\nexpected_challenge_count = 0\n")?;
    assert_invalid(config.validate(), "run.expected_challenge_count")
}

#[test]
fn replace_unknown_status_must_be_client_error() -> TestResult {
    for status in [200, 399, 500] {
        let config = config_from_toml(&format!("[contract]\nreplace_unknown_status = {status}\n"))?;
        assert_invalid(config.validate(), "must be a 4xx status")?;
    }
    let config = config_from_toml("[contract]\nreplace_unknown_status = 400\n")?;
    config.validate().map_err(|err| err.to_string())?;
    if config.runner_config().replace_unknown_status != 400 {
        return Err("override not carried into runner config".to_string());
    }
    Ok(())
}

#[test]
fn file_sink_requires_a_path_and_only_file_takes_one() -> TestResult {
    let config = config_from_toml("[log]\nsink = \"file\"\n")?;
    assert_invalid(config.validate(), "log.sink=file requires log.path")?;
    let config = config_from_toml("[log]\nsink = \"stderr\"\npath = \"run.log\"\n")?;
    assert_invalid(config.validate(), "log.path is only valid with log.sink=file")?;
    let config = config_from_toml("[log]\nsink = \"file\"\npath = \"logs/run.jsonl\"\n")?;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn unknown_sink_is_a_parse_error() -> TestResult {
    match config_from_toml("[log]\nsink = \"syslog\"\n") {
        Err(message) if message.contains("config parse error") => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}
