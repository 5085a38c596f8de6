// crates/todo-contract-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: In-memory fake Todo service implementing RequestExecutor.
// Purpose: Exercise the scenario runtime without a network.
// Dependencies: todo-contract-core, serde_json
// ============================================================================

//! ## Overview
//! [`FakeTodoService`] answers every route the catalog touches. Mutations are
//! judged by the same validation engine the scenarios use, and listings are
//! rendered by the same negotiator, so a fault-free fake conforms. Individual
//! [`Fault`]s break one rule each, which keeps the scenarios honest: a
//! scenario that stops checking its rule no longer fails under its fault.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;

use serde_json::Value;
use serde_json::json;
use todo_contract_core::ErrorBody;
use todo_contract_core::ExecutorError;
use todo_contract_core::HttpRequest;
use todo_contract_core::HttpResponse;
use todo_contract_core::Method;
use todo_contract_core::MutationKind;
use todo_contract_core::MutationTarget;
use todo_contract_core::MAX_TITLE_CHARS;
use todo_contract_core::Negotiation;
use todo_contract_core::Representation;
use todo_contract_core::Rejection;
use todo_contract_core::RejectionKind;
use todo_contract_core::RequestExecutor;
use todo_contract_core::Todo;
use todo_contract_core::TodoId;
use todo_contract_core::TodoList;
use todo_contract_core::ValidationResult;
use todo_contract_core::core::http::ACCEPT;
use todo_contract_core::core::http::ALLOW;
use todo_contract_core::core::http::APPLICATION_JSON;
use todo_contract_core::core::http::CONTENT_TYPE;
use todo_contract_core::core::http::LOCATION;
use todo_contract_core::negotiate;
use todo_contract_core::render_collection;
use todo_contract_core::runtime::SESSION_HEADER;
use todo_contract_core::validate_filter;
use todo_contract_core::validate_mutation;
use todo_contract_core::validate_value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Token handed out by the fake.
pub const FAKE_TOKEN: &str = "fake-session-token";
/// Number of todos seeded at construction.
pub const SEEDED_TODOS: u64 = 10;
/// Number of challenges listed by the fake.
pub const FAKE_CHALLENGES: usize = 59;

// ============================================================================
// SECTION: Faults
// ============================================================================

/// Single-rule deviations from the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fault {
    /// Session response omits the token header.
    NoSessionToken,
    /// OPTIONS omits the Allow header.
    OptionsWithoutAllow,
    /// XML requests are answered with JSON.
    XmlAsJson,
    /// DELETE answers 200 without removing anything.
    RefuseDeletes,
    /// PATCH /heartbeat answers 200.
    HeartbeatPatchAllowed,
    /// Transport fails for every request after the session.
    TransportDown,
    /// Error messages use different wording that still names the field.
    RewordedErrors,
    /// Create accepts titles above the length limit.
    AcceptLongTitle,
    /// Oversized bodies are answered with 400 instead of 413.
    OversizedAsBadRequest,
    /// A rejected id amend still applies the new title.
    AmendMutates,
    /// Partial updates reset omitted fields to their defaults.
    PartialUpdateResets,
    /// HEAD reports a different content type than GET.
    HeadContentTypeDiffers,
    /// The doneStatus filter is ignored.
    FilterIgnored,
    /// DELETE of an unknown id answers 200.
    DeleteUnknownSucceeds,
}

// ============================================================================
// SECTION: Fake Service
// ============================================================================

/// Mutable fake state.
#[derive(Debug, Default)]
struct FakeState {
    /// Todos by id.
    todos: BTreeMap<TodoId, Todo>,
    /// Next id to assign.
    next_id: u64,
    /// Requests seen, in order.
    requests: Vec<HttpRequest>,
}

/// In-memory conforming Todo service.
#[derive(Debug)]
pub struct FakeTodoService {
    /// Shared state.
    state: Mutex<FakeState>,
    /// Active faults.
    faults: BTreeSet<Fault>,
}

impl Default for FakeTodoService {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTodoService {
    /// Creates a conforming fake seeded with [`SEEDED_TODOS`] todos.
    #[must_use]
    pub fn new() -> Self {
        Self::with_faults(&[])
    }

    /// Creates a fake with the given faults.
    #[must_use]
    pub fn with_faults(faults: &[Fault]) -> Self {
        let mut state = FakeState {
            next_id: 1,
            ..FakeState::default()
        };
        for index in 0 .. SEEDED_TODOS {
            let id = TodoId::new(state.next_id);
            state.next_id += 1;
            state.todos.insert(id, Todo {
                id,
                title: format!("seeded todo {index}"),
                done_status: index % 3 == 0,
                description: String::new(),
            });
        }
        Self {
            state: Mutex::new(state),
            faults: faults.iter().copied().collect(),
        }
    }

    /// Creates a fake with no todos.
    #[must_use]
    pub fn empty() -> Self {
        let fake = Self::new();
        fake.state.lock().unwrap().todos.clear();
        fake
    }

    /// Returns the current ids in listing order.
    #[must_use]
    pub fn ids(&self) -> Vec<TodoId> {
        self.state.lock().unwrap().todos.keys().copied().collect()
    }

    /// Returns a copy of every request seen.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Returns true when the fault is active.
    fn has(&self, fault: Fault) -> bool {
        self.faults.contains(&fault)
    }

    /// Answers a rejected mutation or filter.
    fn reject(&self, rejection: Rejection) -> HttpResponse {
        let status = if self.has(Fault::OversizedAsBadRequest)
            && rejection.kind == RejectionKind::PayloadTooLarge
        {
            400
        } else {
            rejection.kind.status()
        };
        let messages = if self.has(Fault::RewordedErrors) {
            rejection.messages.iter().map(|message| reword(message)).collect()
        } else {
            rejection.messages
        };
        error(status, messages)
    }

    /// Routes one request.
    fn handle(&self, state: &mut FakeState, request: &HttpRequest) -> HttpResponse {
        let (path, query) = request.path.split_once('?').unwrap_or((request.path.as_str(), ""));
        if request.method == Method::Post && path == "/challenger" {
            return self.session();
        }
        if request.headers.get(SESSION_HEADER) != Some(FAKE_TOKEN) {
            return error(401, vec!["missing session".to_string()]);
        }
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["challenges"] if request.method == Method::Get => challenges(),
            ["todos"] => self.collection(state, request, query),
            ["todos", raw] => match raw.parse::<TodoId>() {
                Ok(id) => self.entity(state, request, id),
                Err(_) => error(404, vec![format!("Could not find an instance with todos/{raw}")]),
            },
            ["heartbeat"] => self.heartbeat(request.method),
            _ => error(404, Vec::new()),
        }
    }

    /// Answers `POST /challenger`.
    fn session(&self) -> HttpResponse {
        let mut response = HttpResponse::new(201);
        if !self.has(Fault::NoSessionToken) {
            response.headers.insert(SESSION_HEADER, FAKE_TOKEN);
        }
        response.headers.insert(LOCATION, format!("/gui/challenges/{FAKE_TOKEN}"));
        response
    }

    /// Answers `/todos`.
    fn collection(&self, state: &mut FakeState, request: &HttpRequest, query: &str) -> HttpResponse {
        match request.method {
            Method::Get | Method::Head => {
                let filter = match query.strip_prefix("doneStatus=") {
                    Some(_) if self.has(Fault::FilterIgnored) => None,
                    Some(raw) => match validate_filter(raw) {
                        Ok(done) => Some(done),
                        Err(rejection) => return self.reject(rejection),
                    },
                    None => None,
                };
                let todos: Vec<Todo> = state
                    .todos
                    .values()
                    .filter(|todo| filter.is_none_or(|done| todo.done_status == done))
                    .cloned()
                    .collect();
                let mut response = self.listing(request, &todos);
                if request.method == Method::Head {
                    response.body.clear();
                    if self.has(Fault::HeadContentTypeDiffers) {
                        response.headers.insert(CONTENT_TYPE, "text/plain");
                    }
                }
                response
            }
            Method::Post => {
                let body = request.body.clone().unwrap_or_default();
                let verdict =
                    validate_mutation(MutationKind::Create, MutationTarget::Collection, &body);
                let verdict = if self.has(Fault::AcceptLongTitle) {
                    accept_long_title(&body).unwrap_or(verdict)
                } else {
                    verdict
                };
                match verdict {
                    ValidationResult::Accepted {
                        payload,
                    } => {
                        let id = TodoId::new(state.next_id);
                        state.next_id += 1;
                        let todo = payload.replace(id);
                        state.todos.insert(id, todo.clone());
                        let mut response = json_response(201, &todo);
                        response.headers.insert(LOCATION, format!("todos/{id}"));
                        response
                    }
                    ValidationResult::Rejected {
                        rejection,
                    } => self.reject(rejection),
                }
            }
            Method::Options => {
                let mut response = HttpResponse::new(200);
                if !self.has(Fault::OptionsWithoutAllow) {
                    response.headers.insert(ALLOW, "OPTIONS, GET, HEAD, POST");
                }
                response
            }
            _ => error(405, Vec::new()),
        }
    }

    /// Renders a listing honoring the Accept header.
    fn listing(&self, request: &HttpRequest, todos: &[Todo]) -> HttpResponse {
        let negotiation = negotiate(request.headers.get(ACCEPT));
        let representation = match negotiation {
            Negotiation::Selected {
                representation,
            } => representation,
            Negotiation::NotAcceptable {
                ..
            } => {
                let body = negotiation.error_body().unwrap_or_default();
                return error(negotiation.status(), body.error_messages);
            }
        };
        let representation = if self.has(Fault::XmlAsJson) {
            Representation::Json
        } else {
            representation
        };
        let mut response = HttpResponse::new(200);
        response.headers.insert(CONTENT_TYPE, representation.content_type());
        response.headers.insert(SESSION_HEADER, FAKE_TOKEN);
        response.body = render_collection(representation, todos).unwrap().into_bytes();
        response
    }

    /// Answers `/todos/{id}`.
    fn entity(&self, state: &mut FakeState, request: &HttpRequest, id: TodoId) -> HttpResponse {
        let existing = state.todos.get(&id).cloned();
        let target = if existing.is_some() {
            MutationTarget::Existing(id)
        } else {
            MutationTarget::Missing(id)
        };
        let body = request.body.clone().unwrap_or_default();
        match (request.method, existing) {
            (Method::Get, Some(todo)) => json_response(200, &TodoList {
                todos: vec![todo],
            }),
            (Method::Delete, None) if self.has(Fault::DeleteUnknownSucceeds) => HttpResponse::new(200),
            (Method::Get | Method::Delete, None) => {
                error(404, vec![format!("Could not find an instance with todos/{id}")])
            }
            (Method::Delete, Some(_)) => {
                if !self.has(Fault::RefuseDeletes) {
                    state.todos.remove(&id);
                }
                HttpResponse::new(200)
            }
            (Method::Post, existing) => {
                match validate_mutation(MutationKind::PartialUpdate, target, &body) {
                    ValidationResult::Accepted {
                        payload,
                    } => match existing {
                        Some(todo) => {
                            let updated = if self.has(Fault::PartialUpdateResets) {
                                payload.replace(id)
                            } else {
                                payload.merge_into(&todo)
                            };
                            state.todos.insert(id, updated.clone());
                            json_response(200, &updated)
                        }
                        None => error(404, Vec::new()),
                    },
                    ValidationResult::Rejected {
                        rejection,
                    } => self.reject(rejection),
                }
            }
            (Method::Put, _) => match validate_mutation(MutationKind::Replace, target, &body) {
                ValidationResult::Accepted {
                    payload,
                } => {
                    let replaced = payload.replace(id);
                    state.todos.insert(id, replaced.clone());
                    json_response(200, &replaced)
                }
                ValidationResult::Rejected {
                    rejection,
                } => {
                    let amend = rejection
                        .messages
                        .first()
                        .is_some_and(|message| message.starts_with("Can not amend id"));
                    if amend
                        && self.has(Fault::AmendMutates)
                        && let Some(title) = payload_title(&body)
                        && let Some(todo) = state.todos.get_mut(&id)
                    {
                        todo.title = title;
                    }
                    self.reject(rejection)
                }
            },
            _ => error(405, Vec::new()),
        }
    }

    /// Answers `/heartbeat`.
    fn heartbeat(&self, method: Method) -> HttpResponse {
        match method {
            Method::Get | Method::Head => HttpResponse::new(204),
            Method::Patch if self.has(Fault::HeartbeatPatchAllowed) => HttpResponse::new(200),
            Method::Patch => error(500, Vec::new()),
            _ => error(405, Vec::new()),
        }
    }
}

impl RequestExecutor for FakeTodoService {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExecutorError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        if self.has(Fault::TransportDown) && request.path != "/challenger" {
            return Err(ExecutorError::Transport("connection refused".to_string()));
        }
        let mut response = self.handle(&mut state, request);
        if response.header(SESSION_HEADER).is_none() && request.path != "/challenger" {
            response.headers.insert(SESSION_HEADER, FAKE_TOKEN);
        }
        Ok(response)
    }
}

// ============================================================================
// SECTION: Response Helpers
// ============================================================================

/// Builds a JSON response.
fn json_response(status: u16, value: &impl serde::Serialize) -> HttpResponse {
    let mut response = HttpResponse::new(status);
    response.headers.insert(CONTENT_TYPE, APPLICATION_JSON);
    response.body = serde_json::to_vec(value).unwrap();
    response
}

/// Builds an error response.
fn error(status: u16, messages: Vec<String>) -> HttpResponse {
    json_response(status, &ErrorBody::new(messages))
}

/// Rewords messages whose exact text the contract leaves open.
pub fn reword(message: &str) -> String {
    if message.starts_with("Failed Validation: doneStatus should be") {
        format!("{message} but was STRING")
    } else if message.ends_with(": field is mandatory") {
        format!("Failed Validation: {message}")
    } else if message.starts_with("No such todo entity instance") {
        format!("{message} for this session")
    } else {
        message.to_string()
    }
}

/// Accepts an over-long create title by validating a truncated copy.
fn accept_long_title(body: &[u8]) -> Option<ValidationResult> {
    let mut value: Value = serde_json::from_slice(body).ok()?;
    let title = value.get("title")?.as_str()?;
    let truncated: String = title.chars().take(MAX_TITLE_CHARS).collect();
    value["title"] = Value::String(truncated);
    let verdict = validate_value(MutationKind::Create, MutationTarget::Collection, &value);
    verdict.is_accepted().then_some(verdict)
}

/// Reads the title from a JSON request body.
fn payload_title(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("title")?.as_str().map(str::to_string)
}

/// Builds the challenge listing.
fn challenges() -> HttpResponse {
    let items: Vec<_> = (0 .. FAKE_CHALLENGES)
        .map(|index| json!({"id": format!("{:02}", index + 1), "status": false}))
        .collect();
    json_response(200, &json!({"challenges": items}))
}
