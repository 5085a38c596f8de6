// crates/todo-contract-core/tests/validation.rs
// ============================================================================
// Module: Validation Engine Tests
// Description: Precedence, message text, and accepted payload extraction.
// Purpose: Pin the exact rejection a conforming service must produce.
// ============================================================================

//! ## Overview
//! Covers every rule of the mutation validation engine and the order in
//! which rules win over each other.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use serde_json::Value;
use serde_json::json;
use todo_contract_core::ErrorMatch;
use todo_contract_core::MutationKind;
use todo_contract_core::MutationTarget;
use todo_contract_core::RejectionKind;
use todo_contract_core::TodoId;
use todo_contract_core::TodoPayload;
use todo_contract_core::ValidationResult;
use todo_contract_core::validate_filter;
use todo_contract_core::validate_mutation;
use todo_contract_core::validate_value;

fn rejected(result: &ValidationResult) -> (RejectionKind, Vec<String>) {
    let rejection = result.rejection().expect("expected a rejection");
    (rejection.kind, rejection.messages.clone())
}

fn create(value: &Value) -> ValidationResult {
    validate_value(MutationKind::Create, MutationTarget::Collection, value)
}

const ID: TodoId = TodoId::new(7);

// ============================================================================
// SECTION: Accepted Payloads
// ============================================================================

#[test]
fn create_with_all_fields_is_accepted() {
    let result = create(&json!({"title": "write tests", "doneStatus": false, "description": "x"}));
    assert_eq!(result, ValidationResult::Accepted {
        payload: TodoPayload::full("write tests", false, "x"),
    });
    assert_eq!(result.expected_status(MutationKind::Create), 201);
}

#[test]
fn boundary_lengths_are_accepted() {
    let result = create(&json!({"title": "t".repeat(50), "description": "d".repeat(200)}));
    assert!(result.is_accepted());
}

#[test]
fn lengths_count_characters_not_bytes() {
    let result = create(&json!({"title": "é".repeat(50)}));
    assert!(result.is_accepted());
}

#[test]
fn partial_update_does_not_require_title() {
    let result = validate_value(
        MutationKind::PartialUpdate,
        MutationTarget::Existing(ID),
        &json!({"doneStatus": true}),
    );
    assert_eq!(result.expected_status(MutationKind::PartialUpdate), 200);
    assert!(result.is_accepted());
}

#[test]
fn update_with_matching_id_is_accepted() {
    let result = validate_value(
        MutationKind::Replace,
        MutationTarget::Existing(ID),
        &json!({"id": 7, "title": "same"}),
    );
    assert!(result.is_accepted());
    let result = validate_value(
        MutationKind::Replace,
        MutationTarget::Existing(ID),
        &json!({"id": "7", "title": "same"}),
    );
    assert!(result.is_accepted());
}

// ============================================================================
// SECTION: Single-Rule Rejections
// ============================================================================

#[test]
fn non_boolean_done_status_is_rejected() {
    let (kind, messages) = rejected(&create(&json!({"title": "t", "doneStatus": "bob"})));
    assert_eq!(kind, RejectionKind::ValidationFailure);
    assert_eq!(messages, vec!["Failed Validation: doneStatus should be BOOLEAN"]);
}

#[test]
fn boolean_like_done_status_values_are_rejected() {
    for value in [json!("true"), json!("false"), json!(1), json!(0), json!(null)] {
        let (kind, messages) = rejected(&create(&json!({"title": "t", "doneStatus": value})));
        assert_eq!(kind, RejectionKind::ValidationFailure, "{value}");
        assert_eq!(messages, vec!["Failed Validation: doneStatus should be BOOLEAN"], "{value}");
    }
}

#[test]
fn non_string_title_is_rejected() {
    let (_, messages) = rejected(&create(&json!({"title": 12})));
    assert_eq!(messages, vec!["Failed Validation: title should be STRING"]);
}

#[test]
fn long_title_is_rejected_with_limit() {
    let (kind, messages) = rejected(&create(&json!({"title": "t".repeat(51)})));
    assert_eq!(kind.status(), 400);
    assert_eq!(messages, vec![
        "Failed Validation: Maximum allowable length exceeded for title - maximum allowed is 50"
    ]);
}

#[test]
fn long_description_is_rejected_with_limit() {
    let (_, messages) = rejected(&create(&json!({"title": "t", "description": "d".repeat(201)})));
    assert_eq!(messages, vec![
        "Failed Validation: Maximum allowable length exceeded for description - maximum allowed is 200"
    ]);
}

#[test]
fn missing_title_on_create_and_replace_is_mandatory() {
    let (_, messages) = rejected(&create(&json!({"doneStatus": true})));
    assert_eq!(messages, vec!["title : field is mandatory"]);
    let replace = validate_value(
        MutationKind::Replace,
        MutationTarget::Existing(ID),
        &json!({"doneStatus": true}),
    );
    assert_eq!(rejected(&replace).1, vec!["title : field is mandatory"]);
}

#[test]
fn unknown_field_is_rejected_by_name() {
    let (_, messages) = rejected(&create(&json!({"title": "t", "priority": "high"})));
    assert_eq!(messages, vec!["Could not find field: priority"]);
}

#[test]
fn create_with_id_has_dedicated_message() {
    let (_, messages) = rejected(&create(&json!({"id": 3, "title": "t"})));
    assert_eq!(messages, vec!["Failed Validation: Not allowed to create with id"]);
}

#[test]
fn amending_id_is_rejected_standalone() {
    let result = validate_value(
        MutationKind::Replace,
        MutationTarget::Existing(ID),
        &json!({"id": 8, "title": "t".repeat(80), "priority": 1}),
    );
    let (kind, messages) = rejected(&result);
    assert_eq!(kind, RejectionKind::ValidationFailure);
    assert_eq!(messages, vec!["Can not amend id from 7 to 8"]);
}

#[test]
fn non_object_bodies_are_validation_failures() {
    let bodies: [&[u8]; 5] = [b"[]", b"\"title\"", b"null", b"{not json", b""];
    for body in bodies {
        let result = validate_mutation(MutationKind::Create, MutationTarget::Collection, body);
        let (kind, messages) = rejected(&result);
        assert_eq!(kind, RejectionKind::ValidationFailure);
        assert_eq!(messages, vec!["Failed Validation: request body must be a JSON object"]);
    }
}

// ============================================================================
// SECTION: Precedence
// ============================================================================

#[test]
fn not_found_wins_over_every_other_rule() {
    let oversized = json!({"title": "t", "description": "x".repeat(6000), "id": 99});
    for kind in [MutationKind::Replace, MutationKind::PartialUpdate] {
        let result = validate_value(kind, MutationTarget::Missing(TodoId::new(1234)), &oversized);
        let (rejection, messages) = rejected(&result);
        assert_eq!(rejection, RejectionKind::NotFound);
        assert_eq!(result.expected_status(kind), 404);
        assert_eq!(messages, vec!["No such todo entity instance with id == 1234 found"]);
    }
}

#[test]
fn oversized_body_short_circuits_field_checks() {
    let result = create(&json!({"title": "t".repeat(60), "description": "d".repeat(5000)}));
    let (kind, messages) = rejected(&result);
    assert_eq!(kind, RejectionKind::PayloadTooLarge);
    assert_eq!(result.expected_status(MutationKind::Create), 413);
    assert_eq!(messages, vec!["Error: Request body too large, max allowed is 5000 bytes"]);
}

#[test]
fn body_at_exact_limit_is_not_too_large() {
    let skeleton = serde_json::to_vec(&json!({"title": "t", "description": ""})).unwrap();
    let padding = 5000 - skeleton.len();
    let body = serde_json::to_vec(&json!({"title": "t", "description": "d".repeat(padding)})).unwrap();
    assert_eq!(body.len(), 5000);
    let (kind, _) =
        rejected(&validate_mutation(MutationKind::Create, MutationTarget::Collection, &body));
    assert_eq!(kind, RejectionKind::ValidationFailure);
}

#[test]
fn body_one_byte_over_limit_is_too_large() {
    let skeleton = serde_json::to_vec(&json!({"title": "t", "description": ""})).unwrap();
    let padding = 5001 - skeleton.len();
    let body = serde_json::to_vec(&json!({"title": "t", "description": "d".repeat(padding)})).unwrap();
    assert_eq!(body.len(), 5001);
    let result = validate_mutation(MutationKind::Create, MutationTarget::Collection, &body);
    let (kind, messages) = rejected(&result);
    assert_eq!(kind, RejectionKind::PayloadTooLarge);
    assert_eq!(messages, vec!["Error: Request body too large, max allowed is 5000 bytes"]);
}

#[test]
fn first_unknown_field_in_payload_order_wins() {
    let body = br#"{"zeta": 1, "alpha": 2, "title": "t"}"#;
    let result = validate_mutation(MutationKind::Create, MutationTarget::Collection, body);
    assert_eq!(rejected(&result).1, vec!["Could not find field: zeta"]);
}

#[test]
fn schema_violation_stops_before_type_and_length_checks() {
    let (_, messages) =
        rejected(&create(&json!({"doneStatus": "no", "extra": true, "title": "t".repeat(99)})));
    assert_eq!(messages, vec!["Could not find field: extra"]);
}

#[test]
fn required_type_and_length_messages_are_collected_in_order() {
    let (_, messages) = rejected(&create(&json!({
        "description": "d".repeat(250),
        "doneStatus": "yes",
    })));
    assert_eq!(messages, vec![
        "title : field is mandatory".to_string(),
        "Failed Validation: doneStatus should be BOOLEAN".to_string(),
        "Failed Validation: Maximum allowable length exceeded for description - maximum allowed is 200"
            .to_string(),
    ]);
}

#[test]
fn identical_input_yields_identical_messages() {
    let payload = json!({"title": 5, "doneStatus": "x", "description": 9});
    assert_eq!(create(&payload), create(&payload));
}

// ============================================================================
// SECTION: Lead Message Rules
// ============================================================================

fn lead(result: &ValidationResult) -> ErrorMatch {
    result.rejection().expect("expected a rejection").lead.clone()
}

#[test]
fn fixed_wording_must_match_exactly() {
    let cases = [
        json!({"title": "t".repeat(51)}),
        json!({"title": "t", "priority": "high"}),
        json!({"title": "t", "description": "d".repeat(6000)}),
    ];
    for payload in cases {
        let result = create(&payload);
        let first = rejected(&result).1[0].clone();
        assert_eq!(lead(&result), ErrorMatch::FirstEquals(first));
    }
    let amend = validate_value(
        MutationKind::Replace,
        MutationTarget::Existing(ID),
        &json!({"id": 8, "title": "t"}),
    );
    assert_eq!(lead(&amend), ErrorMatch::FirstEquals("Can not amend id from 7 to 8".to_string()));
}

#[test]
fn free_wording_only_has_to_name_the_field_or_entity() {
    let type_error = create(&json!({"title": "t", "doneStatus": "bob"}));
    assert_eq!(lead(&type_error), ErrorMatch::FirstContains("doneStatus".to_string()));

    let missing_title = create(&json!({"doneStatus": true}));
    assert_eq!(
        lead(&missing_title),
        ErrorMatch::FirstContains("title : field is mandatory".to_string())
    );

    let not_found = validate_value(
        MutationKind::PartialUpdate,
        MutationTarget::Missing(TodoId::new(1234)),
        &json!({"title": "t"}),
    );
    assert_eq!(
        lead(&not_found),
        ErrorMatch::FirstContains("No such todo entity instance with id == 1234".to_string())
    );

    let malformed = validate_mutation(MutationKind::Create, MutationTarget::Collection, b"[]");
    assert_eq!(lead(&malformed), ErrorMatch::NonEmpty);
}

#[test]
fn lead_rule_follows_the_first_collected_message() {
    let result = create(&json!({"doneStatus": "yes", "description": "d".repeat(250)}));
    assert_eq!(
        lead(&result),
        ErrorMatch::FirstContains("title : field is mandatory".to_string())
    );
    let result = create(&json!({"title": "t".repeat(51), "doneStatus": "yes"}));
    assert_eq!(lead(&result), ErrorMatch::FirstContains("doneStatus".to_string()));
}

// ============================================================================
// SECTION: Filters
// ============================================================================

#[test]
fn filter_accepts_only_boolean_literals() {
    assert_eq!(validate_filter("true"), Ok(true));
    assert_eq!(validate_filter("false"), Ok(false));
    let rejection = validate_filter("maybe").unwrap_err();
    assert_eq!(rejection.kind.status(), 400);
    assert!(rejection.messages[0].contains("maybe"));
}
