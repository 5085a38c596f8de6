// crates/todo-contract-config/src/config.rs
// ============================================================================
// Module: Todo Contract Configuration
// Description: Configuration loading and validation for contract runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: todo-contract-core, todo-contract-http, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The file is optional only when it was not asked for: a missing default file
//! yields defaults, while a missing explicit or environment-selected file is an
//! error. `TODO_CONTRACT_BASE_URL` overrides `target.base_url` after parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use todo_contract_core::RunnerConfig;
use todo_contract_core::ScenarioId;
use todo_contract_core::runtime::DEFAULT_EXPECTED_CHALLENGE_COUNT;
use todo_contract_core::runtime::DEFAULT_REPLACE_UNKNOWN_STATUS;
use todo_contract_core::runtime::plan;
use todo_contract_http::DEFAULT_MAX_RESPONSE_BYTES;
use todo_contract_http::DEFAULT_TIMEOUT_MS;
use todo_contract_http::DEFAULT_USER_AGENT;
use todo_contract_http::HttpExecutorConfig;
use todo_contract_http::HttpSetupError;
use todo_contract_http::parse_base_url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "todo-contract.toml";
/// Environment variable selecting the configuration file.
pub const CONFIG_ENV_VAR: &str = "TODO_CONTRACT_CONFIG";
/// Environment variable overriding `target.base_url`.
pub const BASE_URL_ENV_VAR: &str = "TODO_CONTRACT_BASE_URL";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 256 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum base URL length.
pub(crate) const MAX_BASE_URL_LENGTH: usize = 2048;
/// Maximum user agent length.
pub(crate) const MAX_USER_AGENT_LENGTH: usize = 256;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 120_000;
/// Maximum response size cap in bytes.
pub(crate) const MAX_RESPONSE_BYTES_LIMIT: usize = 64 * 1024 * 1024;
/// Maximum expected challenge count.
pub(crate) const MAX_EXPECTED_CHALLENGES: usize = 10_000;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Top-level `todo-contract.toml` model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoContractConfig {
    /// Target service settings.
    #[serde(default)]
    pub target: TargetConfig,
    /// Scenario selection settings.
    #[serde(default)]
    pub run: RunConfig,
    /// Tunable contract expectations.
    #[serde(default)]
    pub contract: ContractConfig,
    /// Run event sink settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl TodoContractConfig {
    /// Loads configuration using the process environment for resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| env::var(key).ok())
    }

    /// Loads configuration with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with_env(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path, &lookup)?;
        validate_path(&resolved)?;
        let mut config = match fs::read(&resolved) {
            Ok(bytes) => Self::from_bytes(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound && !explicit => Self::default(),
            Err(err) => return Err(ConfigError::Io(format!("{}: {err}", resolved.display()))),
        };
        if let Some(base_url) = lookup(BASE_URL_ENV_VAR) {
            config.target.base_url = Some(base_url);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration bytes without validating them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the input is oversized, not UTF-8, or not
    /// valid TOML for this model.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target.validate()?;
        self.run.validate()?;
        self.contract.validate()?;
        self.log.validate()?;
        Ok(())
    }

    /// Returns the runner expectations.
    #[must_use]
    pub const fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            expected_challenge_count: self.run.expected_challenge_count,
            replace_unknown_status: self.contract.replace_unknown_status,
        }
    }

    /// Returns the scenarios selected for a run, in catalog order.
    #[must_use]
    pub fn scenario_plan(&self) -> Vec<ScenarioId> {
        plan(&self.run.scenarios, &self.run.skip)
    }

    /// Returns the HTTP executor configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no base URL is configured.
    pub fn executor_config(&self) -> Result<HttpExecutorConfig, ConfigError> {
        let base_url = self
            .target
            .base_url
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| ConfigError::Invalid("target.base_url is required".to_string()))?;
        Ok(HttpExecutorConfig {
            base_url: base_url.to_string(),
            allow_http: self.target.allow_http,
            timeout_ms: self.target.timeout_ms,
            max_response_bytes: self.target.max_response_bytes,
            user_agent: self.target.user_agent.clone(),
        })
    }
}

/// Target service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Base URL of the service under test.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Maximum response size in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
    /// Allow cleartext HTTP targets.
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            max_response_bytes: default_max_response_bytes(),
            allow_http: false,
        }
    }
}

impl TargetConfig {
    /// Validates target settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.base_url {
            validate_base_url(base_url, self.allow_http)?;
        }
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "target.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        let agent = self.user_agent.trim();
        if agent.is_empty() || agent.len() > MAX_USER_AGENT_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "target.user_agent must be 1-{MAX_USER_AGENT_LENGTH} characters"
            )));
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_RESPONSE_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "target.max_response_bytes must be between 1 and {MAX_RESPONSE_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// Scenario selection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Scenarios to run; empty runs the whole catalog.
    #[serde(default)]
    pub scenarios: Vec<ScenarioId>,
    /// Scenarios to leave out.
    #[serde(default)]
    pub skip: Vec<ScenarioId>,
    /// Number of challenges the target is expected to list.
    #[serde(default = "default_expected_challenge_count")]
    pub expected_challenge_count: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scenarios: Vec::new(),
            skip: Vec::new(),
            expected_challenge_count: default_expected_challenge_count(),
        }
    }
}

impl RunConfig {
    /// Validates scenario selection.
    fn validate(&self) -> Result<(), ConfigError> {
        reject_duplicates("run.scenarios", &self.scenarios)?;
        reject_duplicates("run.skip", &self.skip)?;
        if plan(&self.scenarios, &self.skip).is_empty() {
            return Err(ConfigError::Invalid("run selects no scenarios".to_string()));
        }
        if self.expected_challenge_count == 0
            || self.expected_challenge_count > MAX_EXPECTED_CHALLENGES
        {
            return Err(ConfigError::Invalid(format!(
                "run.expected_challenge_count must be between 1 and {MAX_EXPECTED_CHALLENGES}"
            )));
        }
        Ok(())
    }
}

/// Contract expectation overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Status expected when replacing an unknown id.
    #[serde(default = "default_replace_unknown_status")]
    pub replace_unknown_status: u16,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            replace_unknown_status: default_replace_unknown_status(),
        }
    }
}

impl ContractConfig {
    /// Validates contract overrides.
    fn validate(self) -> Result<(), ConfigError> {
        if !(400 .. 500).contains(&self.replace_unknown_status) {
            return Err(ConfigError::Invalid(
                "contract.replace_unknown_status must be a 4xx status".to_string(),
            ));
        }
        Ok(())
    }
}

/// Destination for run events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSink {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `log.path`.
    File,
    /// Events are dropped.
    None,
}

/// Run event logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Event sink.
    #[serde(default)]
    pub sink: LogSink,
    /// Log file path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl LogConfig {
    /// Validates sink settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (LogSink::File, Some(path)) => validate_path_string("log.path", path),
            (LogSink::File, None) => {
                Err(ConfigError::Invalid("log.sink=file requires log.path".to_string()))
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("log.path is only valid with log.sink=file".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default request timeout.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default user agent.
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Default response cap.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default challenge count.
const fn default_expected_challenge_count() -> usize {
    DEFAULT_EXPECTED_CHALLENGE_COUNT
}

/// Default replace-unknown status.
const fn default_replace_unknown_status() -> u16 {
    DEFAULT_REPLACE_UNKNOWN_STATUS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag reports whether it was asked for.
fn resolve_path(
    path: Option<&Path>,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Some(env_path) = lookup(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates the base URL length, then applies the executor's URL policy.
fn validate_base_url(raw: &str, allow_http: bool) -> Result<(), ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_BASE_URL_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "target.base_url must be 1-{MAX_BASE_URL_LENGTH} characters"
        )));
    }
    parse_base_url(trimmed, allow_http).map(|_| ()).map_err(|err| match err {
        HttpSetupError::CleartextDisabled => ConfigError::Invalid(
            "target.base_url uses http; set target.allow_http = true".to_string(),
        ),
        other => ConfigError::Invalid(format!("target.base_url {other}")),
    })
}

/// Rejects repeated scenario names in a list.
fn reject_duplicates(field: &str, ids: &[ScenarioId]) -> Result<(), ConfigError> {
    for (index, id) in ids.iter().enumerate() {
        if ids[.. index].contains(id) {
            return Err(ConfigError::Invalid(format!("{field} lists {id} more than once")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
