// crates/todo-contract-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config loading and validation tests.
// Purpose: Reduce duplication across integration tests for todo-contract-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use todo_contract_config::ConfigError;
use todo_contract_config::TodoContractConfig;

/// Result type used by config tests.
pub type TestResult = Result<(), String>;

/// Parses a TOML string into a `TodoContractConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<TodoContractConfig, String> {
    TodoContractConfig::from_bytes(toml_str.as_bytes()).map_err(|err| err.to_string())
}

/// Writes a config file into a fresh temp dir and returns both.
pub fn write_config(contents: &str) -> Result<(TempDir, PathBuf), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("todo-contract.toml");
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok((dir, path))
}

/// Environment lookup that sees nothing.
pub fn empty_env(_key: &str) -> Option<String> {
    None
}

/// Asserts that validation failed with a message containing `needle`.
pub fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}
