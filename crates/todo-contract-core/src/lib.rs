// crates/todo-contract-core/src/lib.rs
// ============================================================================
// Module: Todo Contract Core Library
// Description: Public API surface for the Todo contract verifier.
// Purpose: Expose the resource contract, interfaces, and scenario runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Todo contract core describes what a conforming Todo HTTP service must do
//! and drives a live service through an ordered scenario catalog to check it.
//! The pure half (model, validation, negotiation, expectations) never performs
//! I/O; the runtime reaches the network only through [`RequestExecutor`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CollectionError;
pub use interfaces::CollectionHandle;
pub use interfaces::ExecutorError;
pub use interfaces::NoopObserver;
pub use interfaces::RequestExecutor;
pub use interfaces::RunEvent;
pub use interfaces::RunObserver;
pub use runtime::DrainError;
pub use runtime::DrainReport;
pub use runtime::DrainState;
pub use runtime::RunReport;
pub use runtime::RunnerConfig;
pub use runtime::ScenarioError;
pub use runtime::ScenarioOutcome;
pub use runtime::ScenarioRunner;
pub use runtime::Session;
pub use runtime::SessionError;
pub use runtime::SessionManager;
pub use runtime::SessionToken;
pub use runtime::Verdict;
