//! The response tuple handed back to adapters.

use http::StatusCode;
use indexmap::IndexMap;

/// Everything an adapter needs to build its host framework's response:
/// serialized body, status code, content type, and the ordered response
/// headers populated by the handler.
#[derive(Debug, Clone)]
pub struct ResponseParts {
    /// The serialized response body.
    pub body: String,
    /// The HTTP status code.
    pub status: StatusCode,
    /// The negotiated content type.
    pub content_type: String,
    /// Response headers, in insertion order.
    pub headers: IndexMap<String, String>,
}

impl ResponseParts {
    /// Looks up a response header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
