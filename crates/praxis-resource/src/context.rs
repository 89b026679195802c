//! Per-request state shared with handlers.

use indexmap::IndexMap;
use praxis_core::{Map, Request};

/// Request-scoped state a handler can read and mutate: the validated
/// payload, the path arguments, and the ordered response headers.
pub struct Context<'r> {
    request: &'r dyn Request,
    args: Vec<String>,
    /// The validated, cleaned payload for this request.
    pub payload: Map,
    headers: IndexMap<String, String>,
}

impl<'r> Context<'r> {
    pub(crate) fn new(request: &'r dyn Request, args: &[&str]) -> Self {
        Self {
            request,
            args: args.iter().map(ToString::to_string).collect(),
            payload: Map::new(),
            headers: IndexMap::new(),
        }
    }

    /// The abstract request being dispatched.
    #[must_use]
    pub fn request(&self) -> &dyn Request {
        self.request
    }

    /// The path arguments supplied to dispatch.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The identifier path segment, when one was supplied.
    #[must_use]
    pub fn iden(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Sets a response header.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Clears an outgoing response header.
    pub fn clear_header(&mut self, name: &str) {
        self.headers.shift_remove(name);
    }

    /// The response headers collected so far, in insertion order.
    #[must_use]
    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    pub(crate) fn into_headers(self) -> IndexMap<String, String> {
        self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use praxis_core::OwnedRequest;

    #[test]
    fn test_iden_is_first_arg() {
        let request = OwnedRequest::new("GET");
        let ctx = Context::new(&request, &["5", "extra"]);
        assert_eq!(ctx.iden(), Some("5"));
        assert_eq!(ctx.args().len(), 2);
    }

    #[test]
    fn test_headers_keep_insertion_order() {
        let request = OwnedRequest::new("GET");
        let mut ctx = Context::new(&request, &[]);
        ctx.set_header("X-One", "1");
        ctx.set_header("X-Two", "2");
        ctx.clear_header("X-One");
        let names: Vec<&str> = ctx.headers().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["X-Two"]);
    }
}
