// crates/todo-contract-cli/src/lib.rs
// ============================================================================
// Module: Todo Contract CLI Library
// Description: Shared helpers for the todo-contract command-line interface.
// Purpose: Provide message catalog, event sinks, and report rendering.
// Dependencies: todo-contract-core, todo-contract-config, serde_json
// ============================================================================

//! ## Overview
//! This library houses the pieces of the CLI that are worth testing without
//! spawning the binary: the message catalog, the run event sinks, and report
//! rendering. The binary entry point (`src/main.rs`) wires them to commands.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Message catalog and substitution helpers.
pub mod i18n;
/// Run event sinks.
pub mod log;
/// Run report rendering.
pub mod report;
