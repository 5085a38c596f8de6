// crates/todo-contract-core/src/core/validation.rs
// ============================================================================
// Module: Todo Validation Engine
// Description: Pure evaluation of mutation payloads against the resource model.
// Purpose: Predict the exact rejection a conforming service must produce.
// Dependencies: crate::core::{expectation, model}, serde, serde_json
// ============================================================================

//! ## Overview
//! [`validate_mutation`] is a pure function from (operation kind, target,
//! body bytes) to a [`ValidationResult`]. Checks run in a fixed precedence:
//!
//! 1. existence of the update target (not-found wins over everything),
//! 2. aggregate body size (short-circuits field checks),
//! 3. body shape (must be a JSON object),
//! 4. id immutability on updates (standalone rejection),
//! 5. schema (first offending key in payload order, then stop),
//! 6. required, type and length checks, collected together in field order.
//!
//! Each [`Rejection`] also carries the rule a service's first error message
//! must meet. Wording the contract fixes (size, unknown field, id amend,
//! length) must match exactly; the rest only has to name the right field or
//! entity.
//!
//! Invariants:
//! - The same input always yields the same messages in the same order.
//! - Arbitrary bytes never panic; malformed input is a validation failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::expectation::ErrorMatch;
use crate::core::model::MAX_BODY_BYTES;
use crate::core::model::TodoField;
use crate::core::model::TodoId;
use crate::core::model::TodoPayload;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Message for bodies above [`MAX_BODY_BYTES`].
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str =
    "Error: Request body too large, max allowed is 5000 bytes";
/// Message for bodies that are not JSON objects.
pub const MALFORMED_BODY_MESSAGE: &str = "Failed Validation: request body must be a JSON object";
/// Message for create payloads carrying an id.
pub const CREATE_WITH_ID_MESSAGE: &str = "Failed Validation: Not allowed to create with id";

/// Formats the unknown-field message.
#[must_use]
pub fn unknown_field_message(name: &str) -> String {
    format!("Could not find field: {name}")
}

/// Formats the mandatory-field message.
#[must_use]
pub fn mandatory_field_message(field: TodoField) -> String {
    format!("{field} : field is mandatory")
}

/// Formats the type-mismatch message.
#[must_use]
pub fn type_mismatch_message(field: TodoField) -> String {
    format!("Failed Validation: {field} should be {}", field.type_label())
}

/// Formats the length-violation message.
#[must_use]
pub fn max_length_message(field: TodoField, limit: usize) -> String {
    format!(
        "Failed Validation: Maximum allowable length exceeded for {field} - maximum allowed is {limit}"
    )
}

/// Formats the id-amend message.
#[must_use]
pub fn amend_id_message(current: TodoId, requested: &str) -> String {
    format!("Can not amend id from {current} to {requested}")
}

/// Formats the part of the unknown-entity message every service must carry.
#[must_use]
pub fn not_found_fragment(id: TodoId) -> String {
    format!("No such todo entity instance with id == {id}")
}

/// Formats the unknown-entity message.
#[must_use]
pub fn not_found_message(id: TodoId) -> String {
    format!("{} found", not_found_fragment(id))
}

/// Formats the filter-value message.
#[must_use]
pub fn invalid_filter_message(value: &str) -> String {
    format!("Failed Validation: doneStatus filter must be true or false, got {value}")
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Mutating operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MutationKind {
    /// `POST /todos`.
    Create,
    /// `PUT /todos/{id}`.
    Replace,
    /// `POST /todos/{id}`.
    PartialUpdate,
}

impl MutationKind {
    /// Returns true when `title` must be present.
    #[must_use]
    pub const fn requires_title(self) -> bool {
        matches!(self, Self::Create | Self::Replace)
    }

    /// Returns the success status for an accepted mutation.
    #[must_use]
    pub const fn success_status(self) -> u16 {
        match self {
            Self::Create => 201,
            Self::Replace | Self::PartialUpdate => 200,
        }
    }

    /// Returns the kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Replace => "replace",
            Self::PartialUpdate => "partial-update",
        }
    }
}

/// Resource addressed by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    /// The collection itself (create).
    Collection,
    /// An entity known to exist.
    Existing(TodoId),
    /// An entity known not to exist.
    Missing(TodoId),
}

impl MutationTarget {
    /// Returns the addressed id, if any.
    #[must_use]
    pub const fn id(self) -> Option<TodoId> {
        match self {
            Self::Collection => None,
            Self::Existing(id) | Self::Missing(id) => Some(id),
        }
    }
}

/// Rejection classes in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// Target entity does not exist.
    NotFound,
    /// Serialized body exceeds the size limit.
    PayloadTooLarge,
    /// Payload shape or content is invalid.
    ValidationFailure,
}

impl RejectionKind {
    /// Returns the HTTP status a conforming service responds with.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::PayloadTooLarge => 413,
            Self::ValidationFailure => 400,
        }
    }

    /// Returns the snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PayloadTooLarge => "payload_too_large",
            Self::ValidationFailure => "validation_failure",
        }
    }
}

/// Rejection with ordered violation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Rejection class.
    pub kind: RejectionKind,
    /// Violation messages in emission order.
    pub messages: Vec<String>,
    /// Rule the first message of a service's error body must meet.
    pub lead: ErrorMatch,
}

impl Rejection {
    /// Creates a rejection whose single message must be reproduced exactly.
    #[must_use]
    pub fn single(kind: RejectionKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind,
            lead: ErrorMatch::FirstEquals(message.clone()),
            messages: vec![message],
        }
    }

    /// Replaces the lead-message rule.
    #[must_use]
    pub fn with_lead(mut self, lead: ErrorMatch) -> Self {
        self.lead = lead;
        self
    }
}

/// Validation engine verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Payload is acceptable.
    Accepted {
        /// Normalized payload.
        payload: TodoPayload,
    },
    /// Payload is rejected.
    Rejected {
        /// Rejection details.
        rejection: Rejection,
    },
}

impl ValidationResult {
    /// Returns the status a conforming service responds with.
    #[must_use]
    pub const fn expected_status(&self, kind: MutationKind) -> u16 {
        match self {
            Self::Accepted {
                ..
            } => kind.success_status(),
            Self::Rejected {
                rejection,
            } => rejection.kind.status(),
        }
    }

    /// Returns the rejection, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted {
                ..
            } => None,
            Self::Rejected {
                rejection,
            } => Some(rejection),
        }
    }

    /// Returns true when the payload was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Wraps a rejection.
    fn rejected(rejection: Rejection) -> Self {
        Self::Rejected {
            rejection,
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Evaluates a serialized mutation body.
#[must_use]
pub fn validate_mutation(
    kind: MutationKind,
    target: MutationTarget,
    body: &[u8],
) -> ValidationResult {
    if let MutationTarget::Missing(id) = target
        && kind != MutationKind::Create
    {
        return ValidationResult::rejected(
            Rejection::single(RejectionKind::NotFound, not_found_message(id))
                .with_lead(ErrorMatch::FirstContains(not_found_fragment(id))),
        );
    }
    if body.len() > MAX_BODY_BYTES {
        return ValidationResult::rejected(Rejection::single(
            RejectionKind::PayloadTooLarge,
            PAYLOAD_TOO_LARGE_MESSAGE,
        ));
    }
    let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
        return ValidationResult::rejected(malformed());
    };
    evaluate_object(kind, target, &map)
}

/// Evaluates a JSON value after compact serialization.
///
/// The size limit applies to the serialized form, so the value is encoded
/// exactly as a client would send it before evaluation.
#[must_use]
pub fn validate_value(kind: MutationKind, target: MutationTarget, payload: &Value) -> ValidationResult {
    match serde_json::to_vec(payload) {
        Ok(body) => validate_mutation(kind, target, &body),
        Err(_) => ValidationResult::rejected(malformed()),
    }
}

/// Validates a `doneStatus` listing filter value.
///
/// # Errors
///
/// Returns a [`Rejection`] when the value is not `true` or `false`.
pub fn validate_filter(value: &str) -> Result<bool, Rejection> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(Rejection::single(
            RejectionKind::ValidationFailure,
            invalid_filter_message(other),
        )
        .with_lead(ErrorMatch::NonEmpty)),
    }
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Rejection for bodies that are not JSON objects.
fn malformed() -> Rejection {
    Rejection::single(RejectionKind::ValidationFailure, MALFORMED_BODY_MESSAGE)
        .with_lead(ErrorMatch::NonEmpty)
}

/// Runs the object-level checks once size and shape have passed.
fn evaluate_object(
    kind: MutationKind,
    target: MutationTarget,
    map: &Map<String, Value>,
) -> ValidationResult {
    if kind != MutationKind::Create
        && let Some(current) = target.id()
        && let Some(raw) = map.get("id")
        && !id_matches(raw, current)
    {
        return ValidationResult::rejected(Rejection::single(
            RejectionKind::ValidationFailure,
            amend_id_message(current, &render_id(raw)),
        ));
    }

    if let Some(rejection) = schema_violation(kind, map) {
        return ValidationResult::rejected(rejection);
    }

    if let Some(rejection) = value_violations(kind, map) {
        return ValidationResult::rejected(rejection);
    }

    ValidationResult::Accepted {
        payload: extract_payload(map),
    }
}

/// Returns the first schema violation in payload key order.
fn schema_violation(kind: MutationKind, map: &Map<String, Value>) -> Option<Rejection> {
    map.keys().find_map(|key| {
        if TodoField::from_wire(key).is_some() {
            return None;
        }
        if key == "id" {
            return (kind == MutationKind::Create).then(|| {
                Rejection::single(RejectionKind::ValidationFailure, CREATE_WITH_ID_MESSAGE)
                    .with_lead(ErrorMatch::FirstContains("Not allowed to create with id".to_string()))
            });
        }
        Some(Rejection::single(RejectionKind::ValidationFailure, unknown_field_message(key)))
    })
}

/// Collects required, type, and length violations in field order.
fn value_violations(kind: MutationKind, map: &Map<String, Value>) -> Option<Rejection> {
    let mut violations: Vec<(String, ErrorMatch)> = Vec::new();
    if kind.requires_title() && !map.contains_key(TodoField::Title.as_str()) {
        let message = mandatory_field_message(TodoField::Title);
        violations.push((message.clone(), ErrorMatch::FirstContains(message)));
    }
    for field in TodoField::ALL {
        if let Some(value) = map.get(field.as_str())
            && !type_matches(field, value)
        {
            violations
                .push((type_mismatch_message(field), ErrorMatch::FirstContains(field.to_string())));
        }
    }
    for field in TodoField::ALL {
        let Some(limit) = field.max_chars() else {
            continue;
        };
        if let Some(Value::String(text)) = map.get(field.as_str())
            && text.chars().count() > limit
        {
            let message = max_length_message(field, limit);
            violations.push((message.clone(), ErrorMatch::FirstEquals(message)));
        }
    }
    let lead = violations.first()?.1.clone();
    Some(Rejection {
        kind: RejectionKind::ValidationFailure,
        messages: violations.into_iter().map(|(message, _)| message).collect(),
        lead,
    })
}

/// Returns true when the value has the field's wire type.
const fn type_matches(field: TodoField, value: &Value) -> bool {
    match field {
        TodoField::Title | TodoField::Description => matches!(value, Value::String(_)),
        TodoField::DoneStatus => matches!(value, Value::Bool(_)),
    }
}

/// Returns true when a payload id refers to the current entity.
fn id_matches(raw: &Value, current: TodoId) -> bool {
    match raw {
        Value::Number(number) => number.as_u64() == Some(current.get()),
        Value::String(text) => text.parse::<TodoId>().ok() == Some(current),
        _ => false,
    }
}

/// Renders a payload id for the amend message.
fn render_id(raw: &Value) -> String {
    match raw {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Builds the accepted payload from a validated object.
fn extract_payload(map: &Map<String, Value>) -> TodoPayload {
    TodoPayload {
        title: map.get(TodoField::Title.as_str()).and_then(Value::as_str).map(str::to_string),
        done_status: map.get(TodoField::DoneStatus.as_str()).and_then(Value::as_bool),
        description: map
            .get(TodoField::Description.as_str())
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
