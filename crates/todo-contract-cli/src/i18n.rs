// crates/todo-contract-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Provides the message catalog and substitution helpers.
// Purpose: Centralize user-facing strings for the todo-contract CLI.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! Every line the CLI prints to a human goes through the [`t!`](crate::t)
//! macro so wording stays consistent across commands and tests can match on
//! stable text.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself to avoid panics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries.
const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("main.version", "todo-contract {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("run.executor_failed", "Failed to set up HTTP executor: {error}"),
    ("run.session_failed", "Failed to acquire session: {error}"),
    ("run.log_open_failed", "Failed to open run log {path}: {error}"),
    ("run.json_failed", "Failed to render report: {error}"),
    ("report.pass", "PASS  {scenario}"),
    ("report.fail", "FAIL  {scenario}"),
    ("report.reason", "      - {reason}"),
    ("report.summary", "{passed} passed, {failed} failed"),
    ("scenarios.entry", "{scenario}\t{title}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    ("validate.accepted", "accepted ({status})"),
    ("validate.rejected", "rejected ({status}) {kind}"),
    ("validate.message", "  - {message}"),
    ("validate.target_required", "--target-id is required for {kind}"),
    ("validate.target_unused", "--target-id and --missing do not apply to create"),
    ("negotiate.selected", "{content_type} ({status})"),
    ("negotiate.not_acceptable", "not acceptable ({status})"),
];

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Looks up `key` in the catalog while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Returns the static catalog used by the CLI.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

// ============================================================================
// SECTION: Tests
// ============================================================================
