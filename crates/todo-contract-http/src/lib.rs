// crates/todo-contract-http/src/lib.rs
// ============================================================================
// Module: Todo Contract HTTP
// Description: Network transport for the Todo contract runtime.
// Purpose: Provide the production RequestExecutor over blocking reqwest.
// Dependencies: todo-contract-core, reqwest, url
// ============================================================================

//! ## Overview
//! This crate ships the only network-facing piece of the verifier: a blocking
//! [`HttpExecutor`] that implements the core `RequestExecutor` trait with
//! scheme policy, timeouts, and response size limits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod executor;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use executor::DEFAULT_MAX_RESPONSE_BYTES;
pub use executor::DEFAULT_TIMEOUT_MS;
pub use executor::DEFAULT_USER_AGENT;
pub use executor::HttpExecutor;
pub use executor::HttpExecutorConfig;
pub use executor::HttpSetupError;
pub use executor::parse_base_url;
