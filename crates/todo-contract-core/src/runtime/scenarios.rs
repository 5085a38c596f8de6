// crates/todo-contract-core/src/runtime/scenarios.rs
// ============================================================================
// Module: Contract Scenarios
// Description: One function per catalog entry, plus the shared request context.
// Purpose: Turn each scenario into requests and expectations, then judge them.
// Dependencies: crate::{core, interfaces, runtime}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every scenario is a plain function over a [`ScenarioContext`]. Expected
//! statuses and error messages for mutations come from the validation engine,
//! and expected representations come from the negotiator.
//!
//! Scenarios that act on "the first todo" fetch a fresh listing each time.
//! Ids used for not-found probes are the current maximum id plus
//! [`UNUSED_ID_OFFSET`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::core::ScenarioId;
use crate::core::expectation::BodyPredicate;
use crate::core::expectation::ContractExpectation;
use crate::core::expectation::ErrorMatch;
use crate::core::expectation::HeaderPredicate;
use crate::core::expectation::StatusExpectation;
use crate::core::http::ACCEPT;
use crate::core::http::ALLOW;
use crate::core::http::APPLICATION_JSON;
use crate::core::http::APPLICATION_XML;
use crate::core::http::CONTENT_TYPE;
use crate::core::http::HttpRequest;
use crate::core::http::HttpResponse;
use crate::core::http::Method;
use crate::core::model::MAX_BODY_BYTES;
use crate::core::model::MAX_DESCRIPTION_CHARS;
use crate::core::model::MAX_TITLE_CHARS;
use crate::core::model::Todo;
use crate::core::model::TodoId;
use crate::core::model::TodoList;
use crate::core::model::TodoPayload;
use crate::core::negotiation::Negotiation;
use crate::core::negotiation::Representation;
use crate::core::negotiation::negotiate;
use crate::core::validation::MutationKind;
use crate::core::validation::MutationTarget;
use crate::core::validation::ValidationResult;
use crate::core::validation::validate_mutation;
use crate::interfaces::ExecutorError;
use crate::interfaces::RequestExecutor;
use crate::interfaces::RunEvent;
use crate::interfaces::RunObserver;
use crate::runtime::assertions::Assertions;
use crate::runtime::drain::DrainError;
use crate::runtime::drain::HttpCollection;
use crate::runtime::drain::drain;
use crate::runtime::runner::RunnerConfig;
use crate::runtime::session::SESSION_HEADER;
use crate::runtime::session::Session;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Offset above the largest listed id used for not-found probes.
pub const UNUSED_ID_OFFSET: u64 = 1000;
/// Media type no conforming service can produce.
const UNSUPPORTED_ACCEPT: &str = "application/gzip";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reasons a scenario did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// A request could not be exchanged.
    #[error(transparent)]
    Transport(#[from] ExecutorError),
    /// The collection was not in the state the scenario needs.
    #[error("precondition failed: {0}")]
    Precondition(String),
    /// One or more checks failed.
    #[error("{} check(s) failed", .0.len())]
    Assertions(Vec<String>),
    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// A request body could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),
    /// The drain loop failed.
    #[error(transparent)]
    Drain(#[from] DrainError),
}

impl ScenarioError {
    /// Returns the failure reasons in order.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        match self {
            Self::Assertions(failures) => failures.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<Vec<String>> for ScenarioError {
    fn from(failures: Vec<String>) -> Self {
        Self::Assertions(failures)
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Everything a scenario needs to talk to the target service.
pub struct ScenarioContext<'a> {
    /// Request executor.
    pub executor: &'a dyn RequestExecutor,
    /// Session attached to every request.
    pub session: &'a Session,
    /// Tunable expectations.
    pub config: &'a RunnerConfig,
    /// Progress observer (drain events).
    pub observer: &'a dyn RunObserver,
}

impl ScenarioContext<'_> {
    /// Sends a request with the session attached.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Transport`] when no response is observed.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ScenarioError> {
        let authorized = self.session.authorize(request.clone());
        Ok(self.executor.execute(&authorized)?)
    }

    /// Sends the expectation's request and records every failed rule.
    fn observe(
        &self,
        expectation: &ContractExpectation,
        asserts: &mut Assertions,
    ) -> Result<HttpResponse, ScenarioError> {
        let response = self.send(&expectation.request)?;
        asserts.expectation(expectation, &response);
        Ok(response)
    }

    /// Sends the expectation's request and fails on any broken rule.
    fn expect(&self, expectation: &ContractExpectation) -> Result<(), ScenarioError> {
        let mut asserts = Assertions::new();
        self.observe(expectation, &mut asserts)?;
        Ok(asserts.into_result()?)
    }

    /// Fetches a fresh listing.
    fn listing(&self) -> Result<Vec<Todo>, ScenarioError> {
        let response = self.send(&HttpRequest::get("/todos"))?;
        if response.status != 200 {
            return Err(ScenarioError::Precondition(format!(
                "GET /todos returned {}",
                response.status
            )));
        }
        let list: TodoList =
            response.json().map_err(|err| ScenarioError::Decode(err.to_string()))?;
        Ok(list.todos)
    }

    /// Returns the first listed todo.
    fn first_todo(&self) -> Result<Todo, ScenarioError> {
        self.listing()?
            .into_iter()
            .next()
            .ok_or_else(|| ScenarioError::Precondition("collection is empty".to_string()))
    }

    /// Returns an id that is not currently listed.
    fn unused_id(&self) -> Result<TodoId, ScenarioError> {
        let highest = self.listing()?.iter().map(|todo| todo.id.get()).max().unwrap_or(0);
        Ok(TodoId::new(highest.saturating_add(UNUSED_ID_OFFSET)))
    }
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Runs one scenario.
///
/// # Errors
///
/// Returns [`ScenarioError`] describing why the scenario did not pass.
pub fn run_scenario(id: ScenarioId, ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    match id {
        ScenarioId::ChallengesListed => challenges_listed(ctx),
        ScenarioId::TodosListed => todos_listed(ctx),
        ScenarioId::TodoSingularNotFound => todo_singular_not_found(ctx),
        ScenarioId::TodoFetchedById => todo_fetched_by_id(ctx),
        ScenarioId::TodoFetchUnknownId => todo_fetch_unknown_id(ctx),
        ScenarioId::TodosFilteredByDone => todos_filtered_by_done(ctx),
        ScenarioId::TodosHeadMatchesGet => todos_head_matches_get(ctx),
        ScenarioId::TodoCreated => todo_created(ctx),
        ScenarioId::TodoCreateRejectsNonBooleanDone => {
            create_rejected(ctx, &json!({"title": "bad done status", "doneStatus": "bob"}))
        }
        ScenarioId::TodoCreateRejectsLongTitle => create_rejected(
            ctx,
            &json!({"title": "a".repeat(MAX_TITLE_CHARS + 1), "doneStatus": false}),
        ),
        ScenarioId::TodoCreateRejectsLongDescription => create_rejected(
            ctx,
            &json!({
                "title": "long description",
                "description": "d".repeat(MAX_DESCRIPTION_CHARS + 1),
            }),
        ),
        ScenarioId::TodoCreateAcceptsMaxLengths => todo_create_accepts_max_lengths(ctx),
        ScenarioId::TodoCreateRejectsOversizedPayload => create_rejected(
            ctx,
            &json!({"title": "oversized", "description": "x".repeat(MAX_BODY_BYTES)}),
        ),
        ScenarioId::TodoCreateRejectsUnknownField => {
            create_rejected(ctx, &json!({"title": "unknown field", "priority": "extremely"}))
        }
        ScenarioId::TodoReplaceUnknownId => todo_replace_unknown_id(ctx),
        ScenarioId::TodoPartiallyUpdated => todo_partially_updated(ctx),
        ScenarioId::TodoPartialUpdateUnknownId => todo_partial_update_unknown_id(ctx),
        ScenarioId::TodoPartialUpdateRetainsFields => todo_partial_update_retains_fields(ctx),
        ScenarioId::TodoReplaced => todo_replaced(
            ctx,
            &TodoPayload::full("replaced title", true, "replaced description"),
        ),
        ScenarioId::TodoReplacedTitleOnly => {
            todo_replaced(ctx, &TodoPayload::title_only("replaced title only"))
        }
        ScenarioId::TodoReplaceRequiresTitle => todo_replace_requires_title(ctx),
        ScenarioId::TodoReplaceRejectsIdAmend => todo_replace_rejects_id_amend(ctx),
        ScenarioId::TodoDeleted => todo_deleted(ctx),
        ScenarioId::TodoDeleteUnknownId => todo_delete_unknown_id(ctx),
        ScenarioId::TodosOptions => todos_options(ctx),
        ScenarioId::TodosXml => todos_negotiated(ctx, Some(APPLICATION_XML)),
        ScenarioId::TodosJson => todos_negotiated(ctx, Some(APPLICATION_JSON)),
        ScenarioId::TodosAnyAccept => todos_negotiated(ctx, Some("*/*")),
        ScenarioId::TodosNotAcceptable => todos_negotiated(ctx, Some(UNSUPPORTED_ACCEPT)),
        ScenarioId::HeartbeatDeleteNotAllowed => {
            ctx.expect(&ContractExpectation::new(HttpRequest::new(Method::Delete, "/heartbeat"), 405))
        }
        ScenarioId::HeartbeatPatchServerError => {
            ctx.expect(&ContractExpectation::new(HttpRequest::new(Method::Patch, "/heartbeat"), 500))
        }
        ScenarioId::TodosDrained => todos_drained(ctx),
    }
}

// ============================================================================
// SECTION: Mutation Helpers
// ============================================================================

/// Encodes a JSON value as a compact request body.
fn encode(value: &impl Serialize) -> Result<Vec<u8>, ScenarioError> {
    serde_json::to_vec(value).map_err(|err| ScenarioError::Encode(err.to_string()))
}

/// Builds the expectation a conforming service must meet for a mutation.
fn mutation_expectation(
    method: Method,
    path: &str,
    kind: MutationKind,
    target: MutationTarget,
    body: Vec<u8>,
) -> (ContractExpectation, ValidationResult) {
    let verdict = validate_mutation(kind, target, &body);
    let request = HttpRequest::new(method, path).with_json_body(body);
    let expectation = ContractExpectation::new(request, verdict.expected_status(kind));
    let expectation = match &verdict {
        ValidationResult::Accepted {
            payload,
        } => expectation.body(BodyPredicate::Todo {
            id: target.id(),
            fields: payload.clone(),
        }),
        ValidationResult::Rejected {
            rejection,
        } => expectation.body(BodyPredicate::Errors(rejection.lead.clone())),
    };
    (expectation, verdict)
}

/// Posts a create payload the engine rejects and checks the rejection.
fn create_rejected(ctx: &ScenarioContext<'_>, payload: &Value) -> Result<(), ScenarioError> {
    let (expectation, verdict) = mutation_expectation(
        Method::Post,
        "/todos",
        MutationKind::Create,
        MutationTarget::Collection,
        encode(payload)?,
    );
    let mut asserts = Assertions::new();
    asserts.check(!verdict.is_accepted(), "payload unexpectedly valid for create");
    let expectation = expectation
        .header(HeaderPredicate::equals(SESSION_HEADER, ctx.session.token.expose()));
    ctx.observe(&expectation, &mut asserts)?;
    Ok(asserts.into_result()?)
}

/// Decodes a todo from a response that already passed its expectation.
fn decode_todo(response: &HttpResponse) -> Result<Todo, ScenarioError> {
    response.json().map_err(|err| ScenarioError::Decode(err.to_string()))
}

// ============================================================================
// SECTION: Read Scenarios
// ============================================================================

/// GET /challenges lists the configured number of challenges.
fn challenges_listed(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    ctx.expect(
        &ContractExpectation::new(HttpRequest::get("/challenges"), 200)
            .body(BodyPredicate::ChallengeCount(ctx.config.expected_challenge_count)),
    )
}

/// GET /todos returns a non-empty JSON listing.
fn todos_listed(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    ctx.expect(
        &ContractExpectation::new(HttpRequest::get("/todos"), 200)
            .header(HeaderPredicate::contains(CONTENT_TYPE, APPLICATION_JSON))
            .body(BodyPredicate::TodoCollection {
                non_empty: true,
            }),
    )
}

/// GET /todo is not a route.
fn todo_singular_not_found(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    ctx.expect(
        &ContractExpectation::new(HttpRequest::get("/todo"), 404)
            .header(HeaderPredicate::contains(CONTENT_TYPE, APPLICATION_JSON)),
    )
}

/// GET /todos/{id} returns exactly the first listed todo.
fn todo_fetched_by_id(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let first = ctx.first_todo()?;
    ctx.expect(
        &ContractExpectation::new(HttpRequest::get(format!("/todos/{}", first.id)), 200)
            .body(BodyPredicate::SingleTodo(first.id)),
    )
}

/// GET /todos/{id} for an unlisted id is not found.
fn todo_fetch_unknown_id(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let unused = ctx.unused_id()?;
    ctx.expect(
        &ContractExpectation::new(HttpRequest::get(format!("/todos/{unused}")), 404)
            .body(BodyPredicate::JsonObject),
    )
}

/// Creates a done todo, then checks the filtered listing holds only done
/// entries and includes the new one.
fn todos_filtered_by_done(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let payload = TodoPayload::full("filter probe", true, "");
    let (seed, _) = mutation_expectation(
        Method::Post,
        "/todos",
        MutationKind::Create,
        MutationTarget::Collection,
        encode(&payload)?,
    );
    let mut setup = Assertions::new();
    let response = ctx.observe(&seed, &mut setup)?;
    if let Err(failures) = setup.into_result() {
        return Err(ScenarioError::Precondition(format!(
            "could not create a done todo: {}",
            failures.join("; ")
        )));
    }
    let created = decode_todo(&response)?;

    let mut asserts = Assertions::new();
    let filtered = ctx.observe(
        &ContractExpectation::new(HttpRequest::get("/todos?doneStatus=true"), 200).body(
            BodyPredicate::TodoCollection {
                non_empty: true,
            },
        ),
        &mut asserts,
    )?;
    if let Ok(list) = filtered.json::<TodoList>() {
        for todo in &list.todos {
            asserts.check(todo.done_status, format!("todo {} is not done", todo.id));
        }
        asserts.check(
            list.todos.iter().any(|todo| todo.id == created.id),
            format!("filtered listing is missing done todo {}", created.id),
        );
    }
    Ok(asserts.into_result()?)
}

/// HEAD /todos mirrors the GET headers with an empty body.
fn todos_head_matches_get(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let get = ctx.send(&HttpRequest::get("/todos"))?;
    let mut asserts = Assertions::new();
    let mut expectation = ContractExpectation::new(HttpRequest::new(Method::Head, "/todos"), 200)
        .header(HeaderPredicate::equals(SESSION_HEADER, ctx.session.token.expose()))
        .body(BodyPredicate::Empty);
    for name in [CONTENT_TYPE, SESSION_HEADER] {
        match get.header(name) {
            Some(value) => expectation = expectation.header(HeaderPredicate::equals(name, value)),
            None => asserts.fail(format!("GET /todos response is missing header {name}")),
        }
    }
    ctx.observe(&expectation, &mut asserts)?;
    Ok(asserts.into_result()?)
}

// ============================================================================
// SECTION: Create Scenarios
// ============================================================================

/// POST /todos creates an entity with a fresh id.
fn todo_created(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let before: Vec<TodoId> = ctx.listing()?.iter().map(|todo| todo.id).collect();
    let payload = TodoPayload::full("created by contract run", false, "fresh entity");
    let (expectation, _) = mutation_expectation(
        Method::Post,
        "/todos",
        MutationKind::Create,
        MutationTarget::Collection,
        encode(&payload)?,
    );
    let mut asserts = Assertions::new();
    let response = ctx.observe(&expectation, &mut asserts)?;
    if asserts.is_clean() {
        let created = decode_todo(&response)?;
        asserts.check(
            !before.contains(&created.id),
            format!("created id {} was already listed", created.id),
        );
    }
    Ok(asserts.into_result()?)
}

/// Boundary-length title and description are accepted.
fn todo_create_accepts_max_lengths(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let payload = TodoPayload::full(
        "t".repeat(MAX_TITLE_CHARS),
        false,
        "d".repeat(MAX_DESCRIPTION_CHARS),
    );
    let (expectation, _) = mutation_expectation(
        Method::Post,
        "/todos",
        MutationKind::Create,
        MutationTarget::Collection,
        encode(&payload)?,
    );
    ctx.expect(&expectation)
}

// ============================================================================
// SECTION: Update Scenarios
// ============================================================================

/// PUT on an unlisted id is rejected with the configured status.
fn todo_replace_unknown_id(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let unused = ctx.unused_id()?;
    let payload = TodoPayload::full("replace missing", false, "");
    let (mut expectation, _) = mutation_expectation(
        Method::Put,
        &format!("/todos/{unused}"),
        MutationKind::Replace,
        MutationTarget::Missing(unused),
        encode(&payload)?,
    );
    expectation.status = StatusExpectation::Exactly(ctx.config.replace_unknown_status);
    expectation.body = BodyPredicate::Errors(ErrorMatch::NonEmpty);
    ctx.expect(&expectation)
}

/// POST /todos/{id} with every field echoes the new values.
fn todo_partially_updated(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let first = ctx.first_todo()?;
    let payload = TodoPayload::full("updated title", true, "updated description");
    let (expectation, _) = mutation_expectation(
        Method::Post,
        &format!("/todos/{}", first.id),
        MutationKind::PartialUpdate,
        MutationTarget::Existing(first.id),
        encode(&payload)?,
    );
    ctx.expect(&expectation)
}

/// POST /todos/{id} for an unlisted id is not found.
fn todo_partial_update_unknown_id(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let unused = ctx.unused_id()?;
    let (expectation, _) = mutation_expectation(
        Method::Post,
        &format!("/todos/{unused}"),
        MutationKind::PartialUpdate,
        MutationTarget::Missing(unused),
        encode(&TodoPayload::title_only("update missing"))?,
    );
    ctx.expect(&expectation)
}

/// POST /todos/{id} with only a title keeps the other fields.
fn todo_partial_update_retains_fields(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let first = ctx.first_todo()?;
    let payload = TodoPayload::title_only("retitled only");
    let merged = payload.merge_into(&first);
    let (expectation, _) = mutation_expectation(
        Method::Post,
        &format!("/todos/{}", first.id),
        MutationKind::PartialUpdate,
        MutationTarget::Existing(first.id),
        encode(&payload)?,
    );
    let expectation = expectation.body(BodyPredicate::Todo {
        id: Some(first.id),
        fields: TodoPayload::full(
            merged.title.clone(),
            merged.done_status,
            merged.description.clone(),
        ),
    });
    let mut asserts = Assertions::new();
    ctx.observe(&expectation, &mut asserts)?;
    let after = ctx.observe(
        &ContractExpectation::new(HttpRequest::get(format!("/todos/{}", first.id)), 200)
            .body(BodyPredicate::SingleTodo(first.id)),
        &mut asserts,
    )?;
    if let Ok(list) = after.json::<TodoList>()
        && let Some(todo) = list.todos.first()
    {
        asserts.check(*todo == merged, format!("todo {} lost fields after partial update", first.id));
    }
    Ok(asserts.into_result()?)
}

/// PUT /todos/{id} replaces the first listed todo.
fn todo_replaced(ctx: &ScenarioContext<'_>, payload: &TodoPayload) -> Result<(), ScenarioError> {
    let first = ctx.first_todo()?;
    let (expectation, _) = mutation_expectation(
        Method::Put,
        &format!("/todos/{}", first.id),
        MutationKind::Replace,
        MutationTarget::Existing(first.id),
        encode(payload)?,
    );
    ctx.expect(&expectation.header(HeaderPredicate::contains(CONTENT_TYPE, APPLICATION_JSON)))
}

/// PUT without a title is rejected.
fn todo_replace_requires_title(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let first = ctx.first_todo()?;
    let (expectation, _) = mutation_expectation(
        Method::Put,
        &format!("/todos/{}", first.id),
        MutationKind::Replace,
        MutationTarget::Existing(first.id),
        encode(&json!({"doneStatus": true, "description": "no title supplied"}))?,
    );
    ctx.expect(&expectation)
}

/// Attempts to change the id, then checks the entity is unchanged.
fn todo_replace_rejects_id_amend(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let first = ctx.first_todo()?;
    let amended = first.id.get().saturating_add(1);
    let (expectation, _) = mutation_expectation(
        Method::Put,
        &format!("/todos/{}", first.id),
        MutationKind::Replace,
        MutationTarget::Existing(first.id),
        encode(&json!({"id": amended, "title": "amended id"}))?,
    );
    let mut asserts = Assertions::new();
    ctx.observe(&expectation, &mut asserts)?;
    let after = ctx.observe(
        &ContractExpectation::new(HttpRequest::get(format!("/todos/{}", first.id)), 200)
            .body(BodyPredicate::SingleTodo(first.id)),
        &mut asserts,
    )?;
    if let Ok(list) = after.json::<TodoList>()
        && let Some(todo) = list.todos.first()
    {
        asserts.check(*todo == first, format!("todo {} changed after rejected amend", first.id));
    }
    Ok(asserts.into_result()?)
}

// ============================================================================
// SECTION: Delete Scenarios
// ============================================================================

/// DELETE removes the first listed todo and a later read is 404.
fn todo_deleted(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let first = ctx.first_todo()?;
    let path = format!("/todos/{}", first.id);
    let mut asserts = Assertions::new();
    ctx.observe(
        &ContractExpectation::new(HttpRequest::new(Method::Delete, path.as_str()), 200)
            .body(BodyPredicate::Empty),
        &mut asserts,
    )?;
    ctx.observe(&ContractExpectation::new(HttpRequest::get(path), 404), &mut asserts)?;
    Ok(asserts.into_result()?)
}

/// DELETE on an unlisted id is not found.
fn todo_delete_unknown_id(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let unused = ctx.unused_id()?;
    ctx.expect(&ContractExpectation::new(
        HttpRequest::new(Method::Delete, format!("/todos/{unused}")),
        404,
    ))
}

/// Drains the collection through the service.
fn todos_drained(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let mut collection = HttpCollection::new(ctx.executor, ctx.session);
    let report = drain(&mut collection, ctx.observer)?;
    ctx.observer.record(&RunEvent::DrainFinished {
        initial: report.initial,
        deleted: report.deleted,
    });
    Ok(())
}

// ============================================================================
// SECTION: Protocol Scenarios
// ============================================================================

/// OPTIONS /todos advertises GET, POST and OPTIONS.
fn todos_options(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    ctx.expect(
        &ContractExpectation::new(HttpRequest::new(Method::Options, "/todos"), 200)
            .header(HeaderPredicate::ListIncludes {
                name: ALLOW.to_string(),
                items: [Method::Get, Method::Post, Method::Options]
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .body(BodyPredicate::Empty),
    )
}

/// Lists todos with an Accept header and checks the negotiated outcome.
fn todos_negotiated(ctx: &ScenarioContext<'_>, accept: Option<&str>) -> Result<(), ScenarioError> {
    let negotiation = negotiate(accept);
    let mut request = HttpRequest::get("/todos");
    if let Some(value) = accept {
        request = request.with_header(ACCEPT, value);
    }
    let expectation = ContractExpectation::new(request, negotiation.status());
    let expectation = match negotiation {
        Negotiation::Selected {
            representation,
        } => {
            let body = match representation {
                Representation::Json => BodyPredicate::TodoCollection {
                    non_empty: false,
                },
                Representation::Xml => BodyPredicate::XmlCollection,
            };
            expectation
                .header(HeaderPredicate::contains(CONTENT_TYPE, representation.content_type()))
                .body(body)
        }
        Negotiation::NotAcceptable {
            ..
        } => expectation.body(BodyPredicate::Errors(ErrorMatch::NonEmpty)),
    };
    ctx.expect(&expectation)
}
