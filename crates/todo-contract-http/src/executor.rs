// crates/todo-contract-http/src/executor.rs
// ============================================================================
// Module: HTTP Request Executor
// Description: Blocking reqwest implementation of RequestExecutor.
// Purpose: Exchange contract requests with a live Todo service under limits.
// Dependencies: todo-contract-core, reqwest, url
// ============================================================================

//! ## Overview
//! [`HttpExecutor`] resolves request paths against a configured base URL and
//! performs one blocking exchange per call. Redirects are never followed,
//! cleartext HTTP must be opted into, and response bodies are capped at
//! [`HttpExecutorConfig::max_response_bytes`]. Non-2xx statuses are returned
//! as responses; only transport failures become errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use todo_contract_core::ExecutorError;
use todo_contract_core::Headers;
use todo_contract_core::HttpRequest;
use todo_contract_core::HttpResponse;
use todo_contract_core::Method;
use todo_contract_core::RequestExecutor;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default response size cap in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = "todo-contract/0.1";

/// Configuration for the HTTP executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpExecutorConfig {
    /// Base URL of the target service.
    pub base_url: String,
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl HttpExecutorConfig {
    /// Creates a configuration for the base URL with default limits.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            allow_http: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Executor construction errors.
///
/// Base URL variants render as a predicate so callers can prefix the field
/// that carried the URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpSetupError {
    /// Base URL failed to parse.
    #[error("is not a url: {0}")]
    InvalidBaseUrl(String),
    /// Base URL scheme is not permitted.
    #[error("scheme {0} unsupported")]
    UnsupportedScheme(String),
    /// Base URL is cleartext and cleartext was not allowed.
    #[error("uses http without allow_http")]
    CleartextDisabled,
    /// Base URL has no host.
    #[error("requires a host")]
    MissingHost,
    /// Base URL carries a query or fragment.
    #[error("must not carry a query or fragment")]
    QueryOrFragment,
    /// HTTP client could not be built.
    #[error("http client build failed: {0}")]
    ClientBuild(String),
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Blocking HTTP executor bound to one base URL.
#[derive(Debug)]
pub struct HttpExecutor {
    /// Executor configuration, including limits and policy.
    config: HttpExecutorConfig,
    /// Parsed base URL.
    base: Url,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpExecutor {
    /// Creates an executor with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpSetupError`] when the base URL is invalid or the client
    /// cannot be created.
    pub fn new(config: HttpExecutorConfig) -> Result<Self, HttpSetupError> {
        let base = parse_base_url(&config.base_url, config.allow_http)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| HttpSetupError::ClientBuild(err.to_string()))?;
        Ok(Self {
            config,
            base,
            client,
        })
    }

    /// Resolves a request path (with optional query) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::InvalidRequest`] when the result is not a URL.
    pub fn resolve(&self, path: &str) -> Result<Url, ExecutorError> {
        if !path.starts_with('/') {
            return Err(ExecutorError::InvalidRequest(format!("path must start with '/': {path}")));
        }
        let joined = format!("{}{path}", self.base.as_str().trim_end_matches('/'));
        Url::parse(&joined).map_err(|err| ExecutorError::InvalidRequest(err.to_string()))
    }
}

impl RequestExecutor for HttpExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExecutorError> {
        let url = self.resolve(&request.path)?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        let mut response =
            builder.send().map_err(|err| ExecutorError::Transport(describe_transport(&err)))?;
        let status = response.status().as_u16();
        let headers = collect_headers(&response);
        let body = if request.method == Method::Head {
            Vec::new()
        } else {
            read_response_limited(&mut response, self.config.max_response_bytes)?
        };
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a base URL and enforces the scheme, host, and query policy.
///
/// # Errors
///
/// Returns [`HttpSetupError`] naming the first rule the URL breaks.
pub fn parse_base_url(raw: &str, allow_http: bool) -> Result<Url, HttpSetupError> {
    let url = Url::parse(raw.trim()).map_err(|err| HttpSetupError::InvalidBaseUrl(err.to_string()))?;
    match url.scheme() {
        "https" => {}
        "http" if allow_http => {}
        "http" => return Err(HttpSetupError::CleartextDisabled),
        other => return Err(HttpSetupError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().is_none() {
        return Err(HttpSetupError::MissingHost);
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(HttpSetupError::QueryOrFragment);
    }
    Ok(url)
}

/// Maps a contract method onto reqwest.
fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Patch => reqwest::Method::PATCH,
    }
}

/// Copies response headers, joining repeated names with `", "`.
fn collect_headers(response: &Response) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in response.headers() {
        let text = String::from_utf8_lossy(value.as_bytes());
        headers.append(name.as_str(), &text);
    }
    headers
}

/// Classifies a reqwest failure without echoing the full URL.
fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else if err.is_redirect() {
        "redirect rejected".to_string()
    } else {
        "http request failed".to_string()
    }
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(response: &mut Response, max_bytes: usize) -> Result<Vec<u8>, ExecutorError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| ExecutorError::InvalidRequest("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(ExecutorError::ResponseTooLarge {
            limit: max_bytes,
            actual: usize::try_from(expected).unwrap_or(usize::MAX),
        });
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| ExecutorError::Transport("failed to read response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(ExecutorError::ResponseTooLarge {
            limit: max_bytes,
            actual: buf.len(),
        });
    }
    if let Some(expected) = expected_len {
        let expected = usize::try_from(expected)
            .map_err(|_| ExecutorError::Transport("invalid response length".to_string()))?;
        if buf.len() < expected {
            return Err(ExecutorError::Transport("http response truncated".to_string()));
        }
    }
    Ok(buf)
}
