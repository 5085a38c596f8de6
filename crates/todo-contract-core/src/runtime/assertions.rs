// crates/todo-contract-core/src/runtime/assertions.rs
// ============================================================================
// Module: Assertion Collector
// Description: Accumulates failed checks for one scenario.
// Purpose: Let scenarios record every failure instead of stopping at the first.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Scenarios call [`Assertions`] methods for every check they make. Failures
//! are kept in call order; [`Assertions::into_result`] turns an empty list
//! into a pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;

use crate::core::expectation::ContractExpectation;
use crate::core::http::HttpResponse;

// ============================================================================
// SECTION: Collector
// ============================================================================

/// Ordered collection of failed checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assertions {
    /// Failure messages in check order.
    failures: Vec<String>,
}

impl Assertions {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Records `message` when `condition` is false.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.failures.push(message.into());
        }
    }

    /// Records a mismatch when `actual != expected`.
    pub fn eq<T: PartialEq + Display>(&mut self, label: &str, actual: &T, expected: &T) {
        if actual != expected {
            self.failures.push(format!("{label}: expected {expected}, got {actual}"));
        }
    }

    /// Records every failure of an expectation against a response.
    pub fn expectation(&mut self, expectation: &ContractExpectation, response: &HttpResponse) {
        self.failures.extend(expectation.evaluate(response));
    }

    /// Records an already formatted failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failures.push(message.into());
    }

    /// Returns true when nothing has failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Consumes the collector.
    ///
    /// # Errors
    ///
    /// Returns the failure list when any check failed.
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.failures.is_empty() { Ok(()) } else { Err(self.failures) }
    }
}
