// crates/todo-contract-core/src/core/catalog.rs
// ============================================================================
// Module: Scenario Catalog
// Description: Stable identifiers and titles for every contract scenario.
// Purpose: Name each independently gradable behavior in run order.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`ScenarioId::ALL`] lists every scenario in run order. Order matters only
//! because later scenarios assume the collection is non-empty until
//! [`ScenarioId::TodosDrained`] runs last.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Scenario Identifiers
// ============================================================================

/// Contract scenario identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    /// GET /challenges lists the configured number of challenges.
    ChallengesListed,
    /// GET /todos returns a non-empty JSON listing.
    TodosListed,
    /// GET /todo (singular) is not found.
    TodoSingularNotFound,
    /// GET /todos/{id} returns exactly that entity.
    TodoFetchedById,
    /// GET /todos/{unknown} is not found.
    TodoFetchUnknownId,
    /// GET /todos?doneStatus=true filters the listing.
    TodosFilteredByDone,
    /// HEAD /todos mirrors GET headers without a body.
    TodosHeadMatchesGet,
    /// POST /todos creates an entity.
    TodoCreated,
    /// POST /todos rejects a non-boolean doneStatus.
    TodoCreateRejectsNonBooleanDone,
    /// POST /todos rejects an over-long title.
    TodoCreateRejectsLongTitle,
    /// POST /todos rejects an over-long description.
    TodoCreateRejectsLongDescription,
    /// POST /todos accepts boundary-length fields.
    TodoCreateAcceptsMaxLengths,
    /// POST /todos rejects an oversized body.
    TodoCreateRejectsOversizedPayload,
    /// POST /todos rejects an unknown field.
    TodoCreateRejectsUnknownField,
    /// PUT /todos/{unknown} is rejected.
    TodoReplaceUnknownId,
    /// POST /todos/{id} updates every submitted field.
    TodoPartiallyUpdated,
    /// POST /todos/{unknown} is not found.
    TodoPartialUpdateUnknownId,
    /// POST /todos/{id} leaves omitted fields untouched.
    TodoPartialUpdateRetainsFields,
    /// PUT /todos/{id} replaces the entity.
    TodoReplaced,
    /// PUT /todos/{id} with only a title succeeds.
    TodoReplacedTitleOnly,
    /// PUT /todos/{id} without a title is rejected.
    TodoReplaceRequiresTitle,
    /// PUT /todos/{id} with a different id is rejected.
    TodoReplaceRejectsIdAmend,
    /// DELETE /todos/{id} removes the entity.
    TodoDeleted,
    /// DELETE /todos/{unknown} is not found.
    TodoDeleteUnknownId,
    /// OPTIONS /todos advertises allowed methods.
    TodosOptions,
    /// Accept: application/xml yields XML.
    TodosXml,
    /// Accept: application/json yields JSON.
    TodosJson,
    /// Accept: */* yields JSON.
    TodosAnyAccept,
    /// Unsupported Accept yields 406.
    TodosNotAcceptable,
    /// DELETE /heartbeat is not allowed.
    HeartbeatDeleteNotAllowed,
    /// PATCH /heartbeat is a server fault.
    HeartbeatPatchServerError,
    /// Deleting one-by-one drains the collection.
    TodosDrained,
}

impl ScenarioId {
    /// Every scenario in run order.
    pub const ALL: [Self; 32] = [
        Self::ChallengesListed,
        Self::TodosListed,
        Self::TodoSingularNotFound,
        Self::TodoFetchedById,
        Self::TodoFetchUnknownId,
        Self::TodosFilteredByDone,
        Self::TodosHeadMatchesGet,
        Self::TodoCreated,
        Self::TodoCreateRejectsNonBooleanDone,
        Self::TodoCreateRejectsLongTitle,
        Self::TodoCreateRejectsLongDescription,
        Self::TodoCreateAcceptsMaxLengths,
        Self::TodoCreateRejectsOversizedPayload,
        Self::TodoCreateRejectsUnknownField,
        Self::TodoReplaceUnknownId,
        Self::TodoPartiallyUpdated,
        Self::TodoPartialUpdateUnknownId,
        Self::TodoPartialUpdateRetainsFields,
        Self::TodoReplaced,
        Self::TodoReplacedTitleOnly,
        Self::TodoReplaceRequiresTitle,
        Self::TodoReplaceRejectsIdAmend,
        Self::TodoDeleted,
        Self::TodoDeleteUnknownId,
        Self::TodosOptions,
        Self::TodosXml,
        Self::TodosJson,
        Self::TodosAnyAccept,
        Self::TodosNotAcceptable,
        Self::HeartbeatDeleteNotAllowed,
        Self::HeartbeatPatchServerError,
        Self::TodosDrained,
    ];

    /// Returns the stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChallengesListed => "challenges-listed",
            Self::TodosListed => "todos-listed",
            Self::TodoSingularNotFound => "todo-singular-not-found",
            Self::TodoFetchedById => "todo-fetched-by-id",
            Self::TodoFetchUnknownId => "todo-fetch-unknown-id",
            Self::TodosFilteredByDone => "todos-filtered-by-done",
            Self::TodosHeadMatchesGet => "todos-head-matches-get",
            Self::TodoCreated => "todo-created",
            Self::TodoCreateRejectsNonBooleanDone => "todo-create-rejects-non-boolean-done",
            Self::TodoCreateRejectsLongTitle => "todo-create-rejects-long-title",
            Self::TodoCreateRejectsLongDescription => "todo-create-rejects-long-description",
            Self::TodoCreateAcceptsMaxLengths => "todo-create-accepts-max-lengths",
            Self::TodoCreateRejectsOversizedPayload => "todo-create-rejects-oversized-payload",
            Self::TodoCreateRejectsUnknownField => "todo-create-rejects-unknown-field",
            Self::TodoReplaceUnknownId => "todo-replace-unknown-id",
            Self::TodoPartiallyUpdated => "todo-partially-updated",
            Self::TodoPartialUpdateUnknownId => "todo-partial-update-unknown-id",
            Self::TodoPartialUpdateRetainsFields => "todo-partial-update-retains-fields",
            Self::TodoReplaced => "todo-replaced",
            Self::TodoReplacedTitleOnly => "todo-replaced-title-only",
            Self::TodoReplaceRequiresTitle => "todo-replace-requires-title",
            Self::TodoReplaceRejectsIdAmend => "todo-replace-rejects-id-amend",
            Self::TodoDeleted => "todo-deleted",
            Self::TodoDeleteUnknownId => "todo-delete-unknown-id",
            Self::TodosOptions => "todos-options",
            Self::TodosXml => "todos-xml",
            Self::TodosJson => "todos-json",
            Self::TodosAnyAccept => "todos-any-accept",
            Self::TodosNotAcceptable => "todos-not-acceptable",
            Self::HeartbeatDeleteNotAllowed => "heartbeat-delete-not-allowed",
            Self::HeartbeatPatchServerError => "heartbeat-patch-server-error",
            Self::TodosDrained => "todos-drained",
        }
    }

    /// Returns a one-line description of the behavior under test.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ChallengesListed => "GET /challenges lists every challenge",
            Self::TodosListed => "GET /todos returns a non-empty JSON listing",
            Self::TodoSingularNotFound => "GET /todo (not plural) is 404",
            Self::TodoFetchedById => "GET /todos/{id} returns that todo",
            Self::TodoFetchUnknownId => "GET /todos/{id} for an unknown id is 404",
            Self::TodosFilteredByDone => "GET /todos?doneStatus=true filters the listing",
            Self::TodosHeadMatchesGet => "HEAD /todos mirrors GET headers without a body",
            Self::TodoCreated => "POST /todos creates a todo",
            Self::TodoCreateRejectsNonBooleanDone => "POST /todos rejects a non-boolean doneStatus",
            Self::TodoCreateRejectsLongTitle => "POST /todos rejects a title over 50 characters",
            Self::TodoCreateRejectsLongDescription => {
                "POST /todos rejects a description over 200 characters"
            }
            Self::TodoCreateAcceptsMaxLengths => "POST /todos accepts 50/200 character fields",
            Self::TodoCreateRejectsOversizedPayload => "POST /todos rejects bodies over 5000 bytes",
            Self::TodoCreateRejectsUnknownField => "POST /todos rejects unknown fields",
            Self::TodoReplaceUnknownId => "PUT /todos/{id} for an unknown id is rejected",
            Self::TodoPartiallyUpdated => "POST /todos/{id} updates the submitted fields",
            Self::TodoPartialUpdateUnknownId => "POST /todos/{id} for an unknown id is 404",
            Self::TodoPartialUpdateRetainsFields => "POST /todos/{id} keeps omitted fields",
            Self::TodoReplaced => "PUT /todos/{id} replaces the todo",
            Self::TodoReplacedTitleOnly => "PUT /todos/{id} with only a title succeeds",
            Self::TodoReplaceRequiresTitle => "PUT /todos/{id} without a title is 400",
            Self::TodoReplaceRejectsIdAmend => "PUT /todos/{id} cannot amend the id",
            Self::TodoDeleted => "DELETE /todos/{id} removes the todo",
            Self::TodoDeleteUnknownId => "DELETE /todos/{id} for an unknown id is 404",
            Self::TodosOptions => "OPTIONS /todos lists allowed methods",
            Self::TodosXml => "GET /todos with Accept XML returns XML",
            Self::TodosJson => "GET /todos with Accept JSON returns JSON",
            Self::TodosAnyAccept => "GET /todos with Accept */* returns JSON",
            Self::TodosNotAcceptable => "GET /todos with an unsupported Accept is 406",
            Self::HeartbeatDeleteNotAllowed => "DELETE /heartbeat is 405",
            Self::HeartbeatPatchServerError => "PATCH /heartbeat is 500",
            Self::TodosDrained => "DELETE every todo until the collection is empty",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown scenario name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scenario: {0}")]
pub struct UnknownScenario(pub String);

impl FromStr for ScenarioId {
    type Err = UnknownScenario;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == trimmed)
            .ok_or_else(|| UnknownScenario(trimmed.to_string()))
    }
}
