// crates/todo-contract-core/src/interfaces/mod.rs
// ============================================================================
// Module: Todo Contract Interfaces
// Description: Transport-agnostic seams for request execution and run events.
// Purpose: Define the contract surfaces used by the scenario runtime.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces decouple the scenario runtime from any concrete HTTP client or
//! log sink. The runtime only ever sees [`RequestExecutor`] for network
//! access, [`CollectionHandle`] for the drain loop, and [`RunObserver`] for
//! progress events. Implementations must surface transport failures as errors
//! rather than synthesizing responses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ScenarioId;
use crate::core::http::HttpRequest;
use crate::core::http::HttpResponse;
use crate::core::model::TodoId;

// ============================================================================
// SECTION: Request Executor
// ============================================================================

/// Request execution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// The exchange failed below HTTP (connect, timeout, TLS, read).
    #[error("transport error: {0}")]
    Transport(String),
    /// The request could not be built for the target.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The response body exceeded the configured limit.
    #[error("response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Configured limit in bytes.
        limit: usize,
        /// Observed size in bytes.
        actual: usize,
    },
}

/// Executes one HTTP exchange against the target service.
pub trait RequestExecutor {
    /// Issues the request and returns the observed response.
    ///
    /// Non-2xx statuses are responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError`] when no response could be observed.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExecutorError>;
}

impl<T: RequestExecutor + ?Sized> RequestExecutor for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExecutorError> {
        (**self).execute(request)
    }
}

// ============================================================================
// SECTION: Collection Handle
// ============================================================================

/// Collection access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The exchange failed.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    /// The service answered with an unexpected status.
    #[error("unexpected status {status} for {operation}")]
    UnexpectedStatus {
        /// Operation label.
        operation: String,
        /// Observed status.
        status: u16,
    },
    /// The listing body could not be decoded.
    #[error("collection decode error: {0}")]
    Decode(String),
}

/// Minimal view of the remote collection used by the drain loop.
pub trait CollectionHandle {
    /// Lists the current ids in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError`] when the listing cannot be read.
    fn snapshot(&mut self) -> Result<Vec<TodoId>, CollectionError>;

    /// Deletes one entity.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError`] when the delete is not acknowledged.
    fn delete(&mut self, id: TodoId) -> Result<(), CollectionError>;
}

// ============================================================================
// SECTION: Run Observer
// ============================================================================

/// Structured progress event emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    /// A session was acquired. The token itself is never recorded.
    SessionAcquired {
        /// Session location reported by the service, if any.
        location: Option<String>,
    },
    /// A scenario started.
    ScenarioStarted {
        /// Scenario identifier.
        scenario: ScenarioId,
    },
    /// A scenario finished.
    ScenarioFinished {
        /// Scenario identifier.
        scenario: ScenarioId,
        /// True when every expectation held.
        passed: bool,
        /// Failure reasons (empty on pass).
        reasons: Vec<String>,
    },
    /// One entity was deleted by the drain loop.
    DrainProgress {
        /// Deleted id.
        deleted: TodoId,
        /// Entities remaining after the delete.
        remaining: usize,
    },
    /// The drain loop emptied the collection.
    DrainFinished {
        /// Entities listed before the first delete.
        initial: usize,
        /// Deletes performed.
        deleted: usize,
    },
    /// The run finished.
    RunFinished {
        /// Scenarios that passed.
        passed: usize,
        /// Scenarios that failed.
        failed: usize,
    },
}

/// Receives run events.
pub trait RunObserver {
    /// Records an event.
    fn record(&self, event: &RunEvent);
}

/// Observer that discards events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn record(&self, _event: &RunEvent) {}
}
