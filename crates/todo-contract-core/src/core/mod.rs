// crates/todo-contract-core/src/core/mod.rs
// ============================================================================
// Module: Todo Contract Core Types
// Description: Resource model, validation, negotiation, and expectations.
// Purpose: Provide the pure, network-free half of the contract.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe what a conforming Todo service looks like. Nothing in
//! this module performs I/O; runtime code derives expectations from here and
//! judges observed responses against them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod expectation;
pub mod http;
pub mod model;
pub mod negotiation;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::ScenarioId;
pub use catalog::UnknownScenario;
pub use expectation::BodyPredicate;
pub use expectation::ContractExpectation;
pub use expectation::ErrorMatch;
pub use expectation::HeaderPredicate;
pub use expectation::StatusExpectation;
pub use http::Headers;
pub use http::HttpRequest;
pub use http::HttpResponse;
pub use http::Method;
pub use model::ErrorBody;
pub use model::MAX_BODY_BYTES;
pub use model::MAX_DESCRIPTION_CHARS;
pub use model::MAX_TITLE_CHARS;
pub use model::Todo;
pub use model::TodoField;
pub use model::TodoId;
pub use model::TodoList;
pub use model::TodoPayload;
pub use negotiation::Negotiation;
pub use negotiation::Representation;
pub use negotiation::negotiate;
pub use negotiation::render_collection;
pub use validation::MutationKind;
pub use validation::MutationTarget;
pub use validation::Rejection;
pub use validation::RejectionKind;
pub use validation::ValidationResult;
pub use validation::validate_filter;
pub use validation::validate_mutation;
pub use validation::validate_value;
