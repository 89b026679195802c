//! The abstract request capability.
//!
//! Adapters wrap their host framework's native request type in this trait
//! so the dispatch engine never sees framework specifics. The contract is
//! read-only: the verb, header lookup, the raw body text, and single
//! GET-parameter lookup.

use indexmap::IndexMap;

/// Read-only view of an inbound HTTP request.
pub trait Request {
    /// The HTTP verb as sent by the client (e.g. `"GET"`).
    fn method(&self) -> &str;

    /// Looks up a header by name, case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// The raw request body as text; empty when there is none.
    fn data(&self) -> &str;

    /// Looks up a single GET parameter by name.
    fn get(&self, name: &str) -> Option<&str>;
}

/// A plain in-memory [`Request`], for adapters that already own their
/// request data and for tests.
///
/// # Example
///
/// ```
/// use praxis_core::{OwnedRequest, Request};
///
/// let request = OwnedRequest::new("POST")
///     .header("X-HTTP-Method-Override", "PUT")
///     .data(r#"{"name":"a"}"#);
/// assert_eq!(Request::header(&request, "x-http-method-override"), Some("PUT"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OwnedRequest {
    method: String,
    headers: IndexMap<String, String>,
    data: String,
    query: IndexMap<String, String>,
}

impl OwnedRequest {
    /// Creates a request with the given HTTP verb.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the raw body text.
    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Adds a GET parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }
}

impl Request for OwnedRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn data(&self) -> &str {
        &self.data
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
