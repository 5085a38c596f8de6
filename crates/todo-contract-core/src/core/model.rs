// crates/todo-contract-core/src/core/model.rs
// ============================================================================
// Module: Todo Resource Model
// Description: Todo entity, payload, and field constraints.
// Purpose: Define the resource contract the target service must honor.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The resource model fixes what a valid Todo is: a server-assigned positive
//! id, a title of at most [`MAX_TITLE_CHARS`] characters, a boolean
//! `doneStatus`, and an optional description of at most
//! [`MAX_DESCRIPTION_CHARS`] characters. Serialized mutation bodies are capped
//! at [`MAX_BODY_BYTES`]. Lengths count Unicode scalar values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum title length in characters.
pub const MAX_TITLE_CHARS: usize = 50;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;
/// Maximum serialized mutation body size in bytes.
pub const MAX_BODY_BYTES: usize = 5000;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Server-assigned Todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a Todo identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for ids the contract considers valid (strictly positive).
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(Self)
    }
}

// ============================================================================
// SECTION: Fields
// ============================================================================

/// Mutable Todo fields in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TodoField {
    /// `title` string field.
    Title,
    /// `doneStatus` boolean field.
    DoneStatus,
    /// `description` string field.
    Description,
}

impl TodoField {
    /// All mutable fields in declaration order.
    pub const ALL: [Self; 3] = [Self::Title, Self::DoneStatus, Self::Description];

    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DoneStatus => "doneStatus",
            Self::Description => "description",
        }
    }

    /// Returns the character limit for string fields.
    #[must_use]
    pub const fn max_chars(self) -> Option<usize> {
        match self {
            Self::Title => Some(MAX_TITLE_CHARS),
            Self::Description => Some(MAX_DESCRIPTION_CHARS),
            Self::DoneStatus => None,
        }
    }

    /// Returns the wire type label used in validation messages.
    #[must_use]
    pub const fn type_label(self) -> &'static str {
        match self {
            Self::Title | Self::Description => "STRING",
            Self::DoneStatus => "BOOLEAN",
        }
    }

    /// Resolves a wire name to a field.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for TodoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Entities
// ============================================================================

/// Todo entity as returned by the target service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned identifier.
    pub id: TodoId,
    /// Title text.
    pub title: String,
    /// Completion flag.
    pub done_status: bool,
    /// Description text (empty when unset).
    #[serde(default)]
    pub description: String,
}

/// Listing body shape shared by collection and single-entity reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoList {
    /// Entities in listing order.
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Returns the ids in listing order.
    #[must_use]
    pub fn ids(&self) -> Vec<TodoId> {
        self.todos.iter().map(|todo| todo.id).collect()
    }
}

/// Error body shape shared by every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Ordered error messages.
    #[serde(rename = "errorMessages")]
    pub error_messages: Vec<String>,
}

impl ErrorBody {
    /// Creates an error body from messages.
    #[must_use]
    pub const fn new(error_messages: Vec<String>) -> Self {
        Self {
            error_messages,
        }
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Mutation payload with the fields a request carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPayload {
    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional completion flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_status: Option<bool>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TodoPayload {
    /// Creates a payload with every field set.
    #[must_use]
    pub fn full(title: impl Into<String>, done_status: bool, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            done_status: Some(done_status),
            description: Some(description.into()),
        }
    }

    /// Creates a payload carrying only a title.
    #[must_use]
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Applies partial-update semantics: omitted fields keep prior values.
    #[must_use]
    pub fn merge_into(&self, todo: &Todo) -> Todo {
        Todo {
            id: todo.id,
            title: self.title.clone().unwrap_or_else(|| todo.title.clone()),
            done_status: self.done_status.unwrap_or(todo.done_status),
            description: self.description.clone().unwrap_or_else(|| todo.description.clone()),
        }
    }

    /// Applies full-replace semantics: omitted fields reset to defaults.
    #[must_use]
    pub fn replace(&self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title.clone().unwrap_or_default(),
            done_status: self.done_status.unwrap_or(false),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    /// Returns true when `todo` carries every field set on this payload.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        self.title.as_ref().is_none_or(|title| *title == todo.title)
            && self.done_status.is_none_or(|done| done == todo.done_status)
            && self.description.as_ref().is_none_or(|text| *text == todo.description)
    }
}
