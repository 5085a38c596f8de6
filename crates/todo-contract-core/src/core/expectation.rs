// crates/todo-contract-core/src/core/expectation.rs
// ============================================================================
// Module: Contract Expectations
// Description: Declarative request/response expectations and predicates.
// Purpose: Judge one observed response against status, header, and body rules.
// Dependencies: crate::core::{http, model, negotiation}, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ContractExpectation`] pairs a request with the status, header
//! predicates, and body predicate a conforming service must satisfy.
//! Evaluation never short-circuits: every failed predicate contributes one
//! message, in declaration order (status, headers, body).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::http::HttpRequest;
use crate::core::http::HttpResponse;
use crate::core::model::ErrorBody;
use crate::core::model::Todo;
use crate::core::model::TodoId;
use crate::core::model::TodoList;
use crate::core::model::TodoPayload;
use crate::core::negotiation::xml_has_collection_markers;

// ============================================================================
// SECTION: Predicates
// ============================================================================

/// Expected status rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusExpectation {
    /// Exactly this status.
    Exactly(u16),
    /// Any non-2xx status.
    Failure,
}

impl StatusExpectation {
    /// Returns a failure message when the status does not satisfy the rule.
    fn check(self, status: u16) -> Option<String> {
        match self {
            Self::Exactly(expected) if expected != status => {
                Some(format!("expected status {expected}, got {status}"))
            }
            Self::Failure if (200 .. 300).contains(&status) => {
                Some(format!("expected a non-success status, got {status}"))
            }
            _ => None,
        }
    }
}

/// Header rule evaluated against response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderPredicate {
    /// Header equals the value exactly.
    Equals {
        /// Header name.
        name: String,
        /// Expected value.
        value: String,
    },
    /// Header contains the fragment.
    Contains {
        /// Header name.
        name: String,
        /// Expected fragment.
        fragment: String,
    },
    /// Header is a comma-separated list including every item.
    ListIncludes {
        /// Header name.
        name: String,
        /// Required list items.
        items: Vec<String>,
    },
}

impl HeaderPredicate {
    /// Builds an [`HeaderPredicate::Equals`] rule.
    #[must_use]
    pub fn equals(name: &str, value: impl Into<String>) -> Self {
        Self::Equals {
            name: name.to_string(),
            value: value.into(),
        }
    }

    /// Builds an [`HeaderPredicate::Contains`] rule.
    #[must_use]
    pub fn contains(name: &str, fragment: impl Into<String>) -> Self {
        Self::Contains {
            name: name.to_string(),
            fragment: fragment.into(),
        }
    }

    /// Returns a failure message when the headers do not satisfy the rule.
    fn check(&self, response: &HttpResponse) -> Option<String> {
        match self {
            Self::Equals {
                name,
                value,
            } => match response.header(name) {
                Some(actual) if actual == value => None,
                Some(actual) => Some(format!("header {name}: expected `{value}`, got `{actual}`")),
                None => Some(format!("header {name}: missing, expected `{value}`")),
            },
            Self::Contains {
                name,
                fragment,
            } => match response.header(name) {
                Some(actual) if actual.contains(fragment.as_str()) => None,
                Some(actual) => {
                    Some(format!("header {name}: expected to contain `{fragment}`, got `{actual}`"))
                }
                None => Some(format!("header {name}: missing, expected to contain `{fragment}`")),
            },
            Self::ListIncludes {
                name,
                items,
            } => {
                let Some(actual) = response.header(name) else {
                    return Some(format!("header {name}: missing"));
                };
                let listed: Vec<String> =
                    actual.split(',').map(|item| item.trim().to_ascii_uppercase()).collect();
                let missing: Vec<&str> = items
                    .iter()
                    .filter(|item| !listed.contains(&item.to_ascii_uppercase()))
                    .map(String::as_str)
                    .collect();
                if missing.is_empty() {
                    None
                } else {
                    Some(format!("header {name}: `{actual}` is missing {}", missing.join(", ")))
                }
            }
        }
    }
}

/// Error-message rule for `{ errorMessages: [...] }` bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "text", rename_all = "snake_case")]
pub enum ErrorMatch {
    /// At least one message.
    NonEmpty,
    /// First message equals the text.
    FirstEquals(String),
    /// First message contains the text.
    FirstContains(String),
}

/// Body rule evaluated against the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPredicate {
    /// No constraint.
    Any,
    /// Body must be empty.
    Empty,
    /// Body must be a JSON object.
    JsonObject,
    /// Body must be `{ "todos": [...] }`.
    TodoCollection {
        /// Require at least one entity.
        non_empty: bool,
    },
    /// Body must list exactly one entity with this id.
    SingleTodo(TodoId),
    /// Body must be one entity carrying the payload's fields.
    Todo {
        /// Required id, if known.
        id: Option<TodoId>,
        /// Fields the entity must carry.
        fields: TodoPayload,
    },
    /// Body must be an error body matching the rule.
    Errors(ErrorMatch),
    /// Body must carry XML collection markers.
    XmlCollection,
    /// Body must be `{ "challenges": [...] }` with this many entries.
    ChallengeCount(usize),
}

impl BodyPredicate {
    /// Returns a failure message when the body does not satisfy the rule.
    fn check(&self, response: &HttpResponse) -> Option<String> {
        match self {
            Self::Any => None,
            Self::Empty => (!response.body.is_empty())
                .then(|| format!("expected empty body, got {} bytes", response.body.len())),
            Self::JsonObject => match response.json::<Value>() {
                Ok(Value::Object(_)) => None,
                Ok(_) => Some("expected a JSON object body".to_string()),
                Err(err) => Some(format!("body is not JSON: {err}")),
            },
            Self::TodoCollection {
                non_empty,
            } => match response.json::<TodoList>() {
                Ok(list) if *non_empty && list.todos.is_empty() => {
                    Some("expected a non-empty todos array".to_string())
                }
                Ok(_) => None,
                Err(err) => Some(format!("body is not a todos listing: {err}")),
            },
            Self::SingleTodo(id) => match response.json::<TodoList>() {
                Ok(list) => match list.todos.as_slice() {
                    [todo] if todo.id == *id => None,
                    [todo] => Some(format!("expected todo {id}, got {}", todo.id)),
                    other => Some(format!("expected exactly one todo, got {}", other.len())),
                },
                Err(err) => Some(format!("body is not a todos listing: {err}")),
            },
            Self::Todo {
                id,
                fields,
            } => match response.json::<Todo>() {
                Ok(todo) => check_todo(&todo, *id, fields),
                Err(err) => Some(format!("body is not a todo: {err}")),
            },
            Self::Errors(rule) => match response.json::<ErrorBody>() {
                Ok(body) => check_errors(&body, rule),
                Err(err) => Some(format!("body is not an error body: {err}")),
            },
            Self::XmlCollection => (!xml_has_collection_markers(&response.text()))
                .then(|| "expected <todos>/<todo> elements in body".to_string()),
            Self::ChallengeCount(expected) => match response.json::<Value>() {
                Ok(value) => match value.get("challenges").and_then(Value::as_array) {
                    Some(items) if items.len() == *expected => None,
                    Some(items) => {
                        Some(format!("expected {expected} challenges, got {}", items.len()))
                    }
                    None => Some("expected a challenges array".to_string()),
                },
                Err(err) => Some(format!("body is not JSON: {err}")),
            },
        }
    }
}

/// Compares a decoded entity against the expected id and fields.
fn check_todo(todo: &Todo, id: Option<TodoId>, fields: &TodoPayload) -> Option<String> {
    if !todo.id.is_positive() {
        return Some(format!("expected a positive id, got {}", todo.id));
    }
    if let Some(expected) = id
        && todo.id != expected
    {
        return Some(format!("expected id {expected}, got {}", todo.id));
    }
    (!fields.matches(todo)).then(|| format!("todo {} does not carry the submitted fields", todo.id))
}

/// Applies an error-message rule.
fn check_errors(body: &ErrorBody, rule: &ErrorMatch) -> Option<String> {
    let first = body.error_messages.first();
    match (rule, first) {
        (_, None) => Some("expected at least one error message".to_string()),
        (ErrorMatch::NonEmpty, Some(_)) => None,
        (ErrorMatch::FirstEquals(expected), Some(actual)) => (actual != expected)
            .then(|| format!("expected error `{expected}`, got `{actual}`")),
        (ErrorMatch::FirstContains(expected), Some(actual)) => (!actual.contains(expected.as_str()))
            .then(|| format!("expected error containing `{expected}`, got `{actual}`")),
    }
}

// ============================================================================
// SECTION: Expectation
// ============================================================================

/// Declarative request/response contract for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractExpectation {
    /// Request to issue.
    pub request: HttpRequest,
    /// Expected status.
    pub status: StatusExpectation,
    /// Header rules.
    pub headers: Vec<HeaderPredicate>,
    /// Body rule.
    pub body: BodyPredicate,
}

impl ContractExpectation {
    /// Creates an expectation with an exact status and no other rules.
    #[must_use]
    pub const fn new(request: HttpRequest, status: u16) -> Self {
        Self {
            request,
            status: StatusExpectation::Exactly(status),
            headers: Vec::new(),
            body: BodyPredicate::Any,
        }
    }

    /// Adds a header rule.
    #[must_use]
    pub fn header(mut self, predicate: HeaderPredicate) -> Self {
        self.headers.push(predicate);
        self
    }

    /// Sets the body rule.
    #[must_use]
    pub fn body(mut self, predicate: BodyPredicate) -> Self {
        self.body = predicate;
        self
    }

    /// Returns every failed rule for the response, in declaration order.
    #[must_use]
    pub fn evaluate(&self, response: &HttpResponse) -> Vec<String> {
        let mut failures = Vec::new();
        failures.extend(self.status.check(response.status));
        failures.extend(self.headers.iter().filter_map(|rule| rule.check(response)));
        failures.extend(self.body.check(response));
        failures
    }
}
