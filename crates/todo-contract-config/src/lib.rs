// crates/todo-contract-config/src/lib.rs
// ============================================================================
// Module: Todo Contract Config Library
// Description: Canonical config model and fail-closed validation.
// Purpose: Single source of truth for todo-contract.toml semantics.
// Dependencies: todo-contract-core, todo-contract-http, serde, toml
// ============================================================================

//! ## Overview
//! `todo-contract-config` defines the configuration model for contract runs:
//! the target service, scenario selection, tunable expectations, and the run
//! event sink. It resolves the config path, applies environment overrides, and
//! converts the result into runner and executor settings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
