//! Classified REST errors.
//!
//! Every failure the dispatch pipeline can surface to a client is a
//! [`RestError`]: a kind with a fixed HTTP status code, a human-readable
//! message, and an open map of structured info that is merged into the
//! serialized error body alongside the `error` key.

use http::StatusCode;
use thiserror::Error;

use crate::value::{Map, Value};

/// Result type alias using [`RestError`].
pub type RestResult<T> = Result<T, RestError>;

/// The classified error kinds, each with a fixed HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or invalid request shape, payload, or routing mismatch.
    BadRequest,
    /// Handler-level authorization failure.
    Forbidden,
    /// Handler-level "entity missing" signal.
    NotFound,
    /// Unsupported HTTP verb.
    MethodNotAllowed,
    /// Handler-level conflict (e.g. concurrent modification).
    Conflict,
    /// Internal failure: misconfiguration, opaque handler error, or a
    /// serialization failure on the way out.
    ServerError,
}

impl ErrorKind {
    /// Returns the HTTP status code for this error kind.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ServerError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// A classified error carrying a message and optional structured info.
///
/// Constructed at the failure site and serialized once into an error
/// response body; the info map is caller-supplied context (e.g. a numeric
/// `code`) returned alongside the message.
///
/// # Example
///
/// ```
/// use praxis_core::{ErrorKind, RestError};
///
/// let err = RestError::not_found("Site doesn't exist").with_info("code", 10);
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RestError {
    kind: ErrorKind,
    message: String,
    info: Map,
}

impl RestError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            info: Map::new(),
        }
    }

    /// Creates a `BadRequest` (400) error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Creates a `Forbidden` (403) error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Creates a `NotFound` (404) error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a `MethodNotAllowed` (405) error.
    #[must_use]
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotAllowed, message)
    }

    /// Creates a `Conflict` (409) error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Creates a `ServerError` (503) error.
    #[must_use]
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, message)
    }

    /// Attaches a structured info entry returned in the error body.
    #[must_use]
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured info map.
    #[must_use]
    pub fn info(&self) -> &Map {
        &self.info
    }

    /// Builds the error response body: the info map plus an `error` key
    /// holding the message.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body = self.info.clone();
        body.insert("error".to_string(), Value::String(self.message.clone()));
        Value::Map(body)
    }
}
