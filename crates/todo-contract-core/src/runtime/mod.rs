// crates/todo-contract-core/src/runtime/mod.rs
// ============================================================================
// Module: Todo Contract Runtime
// Description: Session handling, scenario execution, and the drain loop.
// Purpose: Drive the target service through the contract and judge it.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules own everything that talks to the target service. They reach
//! the network only through [`crate::interfaces::RequestExecutor`], so every
//! path can be exercised against an in-memory fake.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod assertions;
pub mod drain;
pub mod runner;
pub mod scenarios;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assertions::Assertions;
pub use drain::DrainError;
pub use drain::DrainReport;
pub use drain::DrainState;
pub use drain::HttpCollection;
pub use drain::drain;
pub use runner::DEFAULT_EXPECTED_CHALLENGE_COUNT;
pub use runner::DEFAULT_REPLACE_UNKNOWN_STATUS;
pub use runner::RunReport;
pub use runner::RunnerConfig;
pub use runner::ScenarioOutcome;
pub use runner::ScenarioRunner;
pub use runner::Verdict;
pub use runner::plan;
pub use scenarios::ScenarioContext;
pub use scenarios::ScenarioError;
pub use scenarios::run_scenario;
pub use session::SESSION_HEADER;
pub use session::SESSION_PATH;
pub use session::Session;
pub use session::SessionError;
pub use session::SessionManager;
pub use session::SessionToken;
