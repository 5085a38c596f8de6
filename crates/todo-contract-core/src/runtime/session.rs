// crates/todo-contract-core/src/runtime/session.rs
// ============================================================================
// Module: Session Manager
// Description: Acquisition and attachment of the per-run session credential.
// Purpose: Obtain the opaque token once and thread it through every request.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! A run begins with `POST /challenger`. The service answers with an opaque
//! token in the `x-challenger` header, and every later request carries it
//! back. The token is never parsed, refreshed, or revoked. [`SessionToken`]
//! has no `Display` impl and its `Debug` output is redacted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::core::http::HttpRequest;
use crate::core::http::LOCATION;
use crate::core::http::Method;
use crate::interfaces::ExecutorError;
use crate::interfaces::RequestExecutor;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Session acquisition path.
pub const SESSION_PATH: &str = "/challenger";
/// Session header name, used on responses and requests.
pub const SESSION_HEADER: &str = "x-challenger";
/// Marker written in place of the token wherever it would be displayed.
pub const REDACTED_MARKER: &str = "<redacted>";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Opaque session credential.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for header attachment and equality checks.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({REDACTED_MARKER})")
    }
}

/// Session context threaded through a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Session credential.
    pub token: SessionToken,
    /// Location header from the acquisition response, if any.
    pub location: Option<String>,
}

impl Session {
    /// Creates a session from a token.
    #[must_use]
    pub const fn new(token: SessionToken) -> Self {
        Self {
            token,
            location: None,
        }
    }

    /// Attaches the session header to a request.
    #[must_use]
    pub fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request.with_header(SESSION_HEADER, self.token.expose())
    }

    /// Returns the location with any embedded token replaced by a marker.
    #[must_use]
    pub fn redacted_location(&self) -> Option<String> {
        let token = self.token.expose();
        self.location.as_deref().map(|location| {
            if token.is_empty() {
                location.to_string()
            } else {
                location.replace(token, REDACTED_MARKER)
            }
        })
    }
}

/// Session acquisition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The acquisition request failed in transport.
    #[error("session transport error: {0}")]
    Transport(#[from] ExecutorError),
    /// The service answered with a non-success status.
    #[error("session request returned status {0}")]
    UnexpectedStatus(u16),
    /// The response carried no usable token.
    #[error("session response missing x-challenger header")]
    MissingToken,
}

// ============================================================================
// SECTION: Acquisition
// ============================================================================

/// Acquires sessions from the target service.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionManager;

impl SessionManager {
    /// Issues `POST /challenger` and extracts the session token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] on transport failure, non-2xx status, or a
    /// missing or empty token header.
    pub fn acquire(executor: &dyn RequestExecutor) -> Result<Session, SessionError> {
        let response = executor.execute(&HttpRequest::new(Method::Post, SESSION_PATH))?;
        if !response.is_success() {
            return Err(SessionError::UnexpectedStatus(response.status));
        }
        let token = response
            .header(SESSION_HEADER)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SessionError::MissingToken)?;
        Ok(Session {
            token: SessionToken::new(token),
            location: response.header(LOCATION).map(str::to_string),
        })
    }
}
