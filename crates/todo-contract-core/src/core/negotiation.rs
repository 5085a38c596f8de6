// crates/todo-contract-core/src/core/negotiation.rs
// ============================================================================
// Module: Content Negotiation
// Description: Accept-header selection of JSON or XML representations.
// Purpose: Predict status, content type, and body shape for listing reads.
// Dependencies: crate::core::{http, model}
// ============================================================================

//! ## Overview
//! Negotiation is a pure function of the `Accept` header. JSON and wildcard
//! requests yield JSON, `application/xml` yields XML, and anything else is
//! not acceptable (406 with a validation-style error body). Accept lists are
//! scanned in order; media-type parameters are ignored and the first
//! recognized entry wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;

use crate::core::http::APPLICATION_JSON;
use crate::core::http::APPLICATION_XML;
use crate::core::model::ErrorBody;
use crate::core::model::Todo;
use crate::core::model::TodoList;

/// Error message for unsupported representations.
pub const NOT_ACCEPTABLE_MESSAGE: &str = "Unrecognised Accept Type";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Response representations supported by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// JSON body, `application/json`.
    Json,
    /// XML body, `application/xml`.
    Xml,
}

impl Representation {
    /// Returns the response content type.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => APPLICATION_JSON,
            Self::Xml => APPLICATION_XML,
        }
    }
}

/// Negotiation outcome for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Negotiation {
    /// A representation was selected.
    Selected {
        /// Selected representation.
        representation: Representation,
    },
    /// No supported representation matched.
    NotAcceptable {
        /// Raw Accept header value.
        requested: String,
    },
}

impl Negotiation {
    /// Returns the expected response status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Selected {
                ..
            } => 200,
            Self::NotAcceptable {
                ..
            } => 406,
        }
    }

    /// Returns the selected representation, if any.
    #[must_use]
    pub const fn representation(&self) -> Option<Representation> {
        match self {
            Self::Selected {
                representation,
            } => Some(*representation),
            Self::NotAcceptable {
                ..
            } => None,
        }
    }

    /// Returns the error body a conforming service sends when not acceptable.
    #[must_use]
    pub fn error_body(&self) -> Option<ErrorBody> {
        match self {
            Self::Selected {
                ..
            } => None,
            Self::NotAcceptable {
                ..
            } => Some(ErrorBody::new(vec![NOT_ACCEPTABLE_MESSAGE.to_string()])),
        }
    }
}

// ============================================================================
// SECTION: Negotiation
// ============================================================================

/// Selects a representation for the given `Accept` header.
#[must_use]
pub fn negotiate(accept: Option<&str>) -> Negotiation {
    let Some(raw) = accept.map(str::trim).filter(|value| !value.is_empty()) else {
        return Negotiation::Selected {
            representation: Representation::Json,
        };
    };
    raw.split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(|media| media.trim().to_ascii_lowercase())
        .find_map(|media| match media.as_str() {
            APPLICATION_JSON | "*/*" | "application/*" => Some(Representation::Json),
            APPLICATION_XML => Some(Representation::Xml),
            _ => None,
        })
        .map_or_else(
            || Negotiation::NotAcceptable {
                requested: raw.to_string(),
            },
            |representation| Negotiation::Selected {
                representation,
            },
        )
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a collection in the given representation.
///
/// # Errors
///
/// Returns [`serde_json::Error`] when JSON encoding fails.
pub fn render_collection(
    representation: Representation,
    todos: &[Todo],
) -> Result<String, serde_json::Error> {
    match representation {
        Representation::Json => serde_json::to_string(&TodoList {
            todos: todos.to_vec(),
        }),
        Representation::Xml => Ok(render_collection_xml(todos)),
    }
}

/// Renders `<todos><todo>...</todo></todos>`.
fn render_collection_xml(todos: &[Todo]) -> String {
    let mut out = String::from("<todos>");
    for todo in todos {
        out.push_str("<todo>");
        let _ = write!(out, "<doneStatus>{}</doneStatus>", todo.done_status);
        let _ = write!(out, "<description>{}</description>", escape_xml(&todo.description));
        let _ = write!(out, "<id>{}</id>", todo.id);
        let _ = write!(out, "<title>{}</title>", escape_xml(&todo.title));
        out.push_str("</todo>");
    }
    out.push_str("</todos>");
    out
}

/// Escapes XML text content.
fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Returns true when the body carries the collection and entity element tags.
#[must_use]
pub fn xml_has_collection_markers(body: &str) -> bool {
    ["<todos>", "</todos>", "<todo>", "</todo>"].iter().all(|marker| body.contains(marker))
}
