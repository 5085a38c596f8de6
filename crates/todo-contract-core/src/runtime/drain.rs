// crates/todo-contract-core/src/runtime/drain.rs
// ============================================================================
// Module: Drain Loop
// Description: Bounded delete-until-empty loop over an abstract collection.
// Purpose: Prove that deleting every entity converges to an empty collection.
// Dependencies: crate::{core, interfaces, runtime::session}, thiserror
// ============================================================================

//! ## Overview
//! [`DrainState`] is a pure state machine: given the latest snapshot it names
//! the next id to delete (always the last listed entity), and given the
//! snapshot after a delete it decides whether progress was made. The number
//! of deletes is bounded by the initial collection size. A snapshot that does
//! not shrink is a stall and fails the drain immediately.
//!
//! [`drain`] drives the state machine over any [`CollectionHandle`];
//! [`HttpCollection`] is the handle backed by the target service.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::http::HttpRequest;
use crate::core::http::Method;
use crate::core::model::TodoId;
use crate::core::model::TodoList;
use crate::interfaces::CollectionError;
use crate::interfaces::CollectionHandle;
use crate::interfaces::RequestExecutor;
use crate::interfaces::RunEvent;
use crate::interfaces::RunObserver;
use crate::runtime::session::Session;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Drain loop failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrainError {
    /// Collection access failed.
    #[error(transparent)]
    Collection(#[from] CollectionError),
    /// A delete did not shrink the collection.
    #[error("drain stalled: collection still holds {remaining} todos after deleting {deleted}")]
    Stalled {
        /// Id whose delete made no progress.
        deleted: TodoId,
        /// Entities listed after the delete.
        remaining: usize,
    },
    /// A deleted id is still listed.
    #[error("todo {0} is still listed after delete")]
    TargetSurvived(TodoId),
    /// More deletes were needed than the initial collection held.
    #[error("drain exceeded its bound of {bound} deletes")]
    BoundExceeded {
        /// Initial collection size.
        bound: usize,
    },
    /// The verifying snapshot was not empty.
    #[error("collection not empty after drain: {remaining} todos remain")]
    NotEmpty {
        /// Entities listed in the verifying snapshot.
        remaining: usize,
    },
}

// ============================================================================
// SECTION: State Machine
// ============================================================================

/// Progress of one drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainState {
    /// Maximum number of deletes (initial collection size).
    bound: usize,
    /// Deletes performed so far.
    deleted: usize,
    /// Size of the most recent snapshot.
    last_len: usize,
}

impl DrainState {
    /// Starts a drain from the initial snapshot.
    #[must_use]
    pub const fn start(initial: &[TodoId]) -> Self {
        Self {
            bound: initial.len(),
            deleted: 0,
            last_len: initial.len(),
        }
    }

    /// Returns the next id to delete, or `None` when the snapshot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::BoundExceeded`] when the bound is exhausted while
    /// entities remain.
    pub fn next_target(&self, snapshot: &[TodoId]) -> Result<Option<TodoId>, DrainError> {
        let Some(last) = snapshot.last() else {
            return Ok(None);
        };
        if self.deleted >= self.bound {
            return Err(DrainError::BoundExceeded {
                bound: self.bound,
            });
        }
        Ok(Some(*last))
    }

    /// Records a delete and the snapshot observed after it.
    ///
    /// # Errors
    ///
    /// Returns [`DrainError::TargetSurvived`] when `deleted` is still listed
    /// and [`DrainError::Stalled`] when the collection did not shrink.
    pub fn advance(&mut self, deleted: TodoId, observed: &[TodoId]) -> Result<(), DrainError> {
        if observed.contains(&deleted) {
            return Err(DrainError::TargetSurvived(deleted));
        }
        if observed.len() >= self.last_len {
            return Err(DrainError::Stalled {
                deleted,
                remaining: observed.len(),
            });
        }
        self.deleted += 1;
        self.last_len = observed.len();
        Ok(())
    }

    /// Returns true once the latest snapshot was empty.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.last_len == 0
    }

    /// Returns the number of deletes performed.
    #[must_use]
    pub const fn deleted(&self) -> usize {
        self.deleted
    }
}

/// Summary of a completed drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainReport {
    /// Entities listed before the first delete.
    pub initial: usize,
    /// Deletes performed.
    pub deleted: usize,
}

// ============================================================================
// SECTION: Driver
// ============================================================================

/// Deletes every entity and verifies the collection ends empty.
///
/// # Errors
///
/// Returns [`DrainError`] on collection failures, stalls, or a non-empty
/// verifying snapshot.
pub fn drain(
    handle: &mut dyn CollectionHandle,
    observer: &dyn RunObserver,
) -> Result<DrainReport, DrainError> {
    let mut current = handle.snapshot()?;
    let mut state = DrainState::start(&current);
    let initial = current.len();
    while let Some(target) = state.next_target(&current)? {
        handle.delete(target)?;
        let observed = handle.snapshot()?;
        state.advance(target, &observed)?;
        observer.record(&RunEvent::DrainProgress {
            deleted: target,
            remaining: observed.len(),
        });
        current = observed;
    }
    let remaining = handle.snapshot()?.len();
    if remaining > 0 {
        return Err(DrainError::NotEmpty {
            remaining,
        });
    }
    Ok(DrainReport {
        initial,
        deleted: state.deleted(),
    })
}

// ============================================================================
// SECTION: HTTP Collection
// ============================================================================

/// Collection handle backed by the target service.
pub struct HttpCollection<'a> {
    /// Request executor.
    executor: &'a dyn RequestExecutor,
    /// Session attached to every request.
    session: &'a Session,
}

impl<'a> HttpCollection<'a> {
    /// Creates a handle for the session.
    #[must_use]
    pub const fn new(executor: &'a dyn RequestExecutor, session: &'a Session) -> Self {
        Self {
            executor,
            session,
        }
    }
}

impl CollectionHandle for HttpCollection<'_> {
    fn snapshot(&mut self) -> Result<Vec<TodoId>, CollectionError> {
        let request = self.session.authorize(HttpRequest::get("/todos"));
        let response = self.executor.execute(&request)?;
        if response.status != 200 {
            return Err(CollectionError::UnexpectedStatus {
                operation: "GET /todos".to_string(),
                status: response.status,
            });
        }
        let list: TodoList =
            response.json().map_err(|err| CollectionError::Decode(err.to_string()))?;
        Ok(list.ids())
    }

    fn delete(&mut self, id: TodoId) -> Result<(), CollectionError> {
        let path = format!("/todos/{id}");
        let request = self.session.authorize(HttpRequest::new(Method::Delete, path.as_str()));
        let response = self.executor.execute(&request)?;
        if response.status != 200 {
            return Err(CollectionError::UnexpectedStatus {
                operation: format!("DELETE {path}"),
                status: response.status,
            });
        }
        Ok(())
    }
}
