//! The per-request dispatch state machine.

use std::sync::Arc;

use http::StatusCode;
use praxis_core::{Map, Request, ResponseParts, RestError, Value};
use praxis_fields::{FieldError, FieldSet};
use praxis_formats::{default_formatter, Formatter};

use crate::context::Context;
use crate::resource::{compose, HandlerError, HandlerTable, Resource};

/// Serialized fallback body for the unreachable case where even the
/// default formatter cannot encode an error.
const FALLBACK_ERROR_BODY: &str = r#"{"error":"Service is not available"}"#;

/// Methods outside this set address a single entity and require an
/// identifier; these three must not receive one.
fn iden_required(method_name: &str) -> bool {
    !matches!(method_name, "list" | "create" | "describe")
}

/// Drives one request through a [`Resource`].
///
/// Terminal on the first classified failure: [`Dispatcher::dispatch`]
/// always produces a well-formed [`ResponseParts`], serializing errors
/// with the configured formatter when it is valid and the process default
/// otherwise.
pub struct Dispatcher<'r, R: Resource> {
    resource: R,
    request: &'r dyn Request,
    formatter: Option<Arc<dyn Formatter>>,
}

impl<'r, R: Resource + 'static> Dispatcher<'r, R> {
    /// Creates a dispatcher for one request.
    ///
    /// `formatter` is the outcome of format negotiation; `None` means the
    /// caller asked for an unrecognizable format, which dispatch reports
    /// as a 400 rather than a panic.
    #[must_use]
    pub fn new(
        resource: R,
        request: &'r dyn Request,
        formatter: Option<Arc<dyn Formatter>>,
    ) -> Self {
        Self {
            resource,
            request,
            formatter,
        }
    }

    /// Processes the request and returns the response tuple.
    ///
    /// On success: the serialized handler result, 200, the formatter's
    /// content type, and the response headers. On any classified error:
    /// the serialized error body (info map plus `error` message), the
    /// error's status code, and the error formatter's content type, with
    /// the response headers in both cases.
    pub fn dispatch(mut self, args: &[&str]) -> ResponseParts {
        let mut ctx = Context::new(self.request, args);
        match self.process(&mut ctx) {
            Ok(body) => {
                let content_type = self
                    .formatter
                    .as_ref()
                    .map_or_else(|| default_formatter().content_type(), |f| f.content_type());
                ResponseParts {
                    body,
                    status: StatusCode::OK,
                    content_type: content_type.to_string(),
                    headers: ctx.into_headers(),
                }
            }
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), error = %err, "request failed");
                let formatter = self.error_formatter();
                let body = formatter
                    .serialize(&err.to_body())
                    .unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_string());
                ResponseParts {
                    body,
                    status: err.status_code(),
                    content_type: formatter.content_type().to_string(),
                    headers: ctx.into_headers(),
                }
            }
        }
    }

    /// The formatter used for error bodies: the configured one when
    /// valid, else the process-wide default. Guarantees error responses
    /// stay serializable even when the requested format was not
    /// recognized.
    fn error_formatter(&self) -> Arc<dyn Formatter> {
        self.formatter.clone().unwrap_or_else(default_formatter)
    }

    fn process(&mut self, ctx: &mut Context<'_>) -> Result<String, RestError> {
        let Some(formatter) = self.formatter.clone() else {
            return Err(RestError::bad_request("Not recognizable format"));
        };

        let has_iden = !ctx.args().is_empty();
        let method_name = self.resolve_method_name(has_iden)?;
        tracing::debug!(
            method = %self.request.method(),
            handler = method_name,
            has_iden,
            "dispatching"
        );

        ctx.payload = self.read_payload(formatter.as_ref(), method_name)?;

        let table = R::handlers();
        let Some(handler) = table.get(method_name) else {
            return Err(RestError::bad_request(format!(
                "Method \"{}\" is not implemented for a given endpoint",
                self.request.method()
            )));
        };
        let middleware = R::middleware();
        let mut handler = compose(handler, &middleware);

        if method_name == "describe" {
            add_allow_header::<R>(ctx, &table);
        }

        self.resource.prepare(ctx).map_err(classify)?;
        let result = handler(&mut self.resource, ctx).map_err(classify)?;
        let result = self.resource.finish(ctx, result).map_err(classify)?;
        let result = self.filter_output(method_name, result);

        formatter
            .serialize(&result)
            .map_err(|_| RestError::server_error("Service can't respond with this format"))
    }

    /// Resolves the resource method name from the HTTP verb (or its
    /// override header) and identifier presence, enforcing consistency
    /// between the two.
    fn resolve_method_name(&self, has_iden: bool) -> Result<&'static str, RestError> {
        let verb = self
            .request
            .header("X-HTTP-Method-Override")
            .unwrap_or_else(|| self.request.method());

        let map = R::method_map();
        let Some(binding) = map.get(verb) else {
            return Err(RestError::method_not_allowed(format!(
                "Method \"{}\" is not supported",
                self.request.method()
            )));
        };
        let method_name = binding.select(has_iden);

        if !has_iden && iden_required(method_name) {
            return Err(RestError::bad_request("Given method requires iden"));
        }
        if has_iden && !iden_required(method_name) {
            return Err(RestError::bad_request("Given method shouldn't have iden"));
        }

        Ok(method_name)
    }

    /// Unserializes and validates the request body against the field
    /// rules for the resolved method.
    fn read_payload(
        &self,
        formatter: &dyn Formatter,
        method_name: &str,
    ) -> Result<Map, RestError> {
        let raw = self.request.data();
        if raw.is_empty() {
            return Ok(Map::new());
        }

        let parsed = formatter
            .unserialize(raw)
            .map_err(|_| RestError::bad_request("Fail to load the data"))?;
        let Value::Map(data) = parsed else {
            return Err(RestError::bad_request("Data should be key -> value structure"));
        };

        match self.resource.fields(method_name) {
            None => Ok(data),
            Some(fields) => fields.validate(&data).map_err(|err| match err {
                FieldError::Invalid(message) => RestError::bad_request(message),
                FieldError::Configuration(message) => RestError::server_error(message),
            }),
        }
    }

    /// Filters handler output to the declared field names when field
    /// rules govern the resolved method: maps directly, lists per map
    /// element.
    fn filter_output(&self, method_name: &str, result: Value) -> Value {
        let Some(fields) = self.resource.fields(method_name) else {
            return result;
        };
        match result {
            Value::Map(map) => Value::Map(filter_map(map, fields)),
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::Map(map) => Value::Map(filter_map(map, fields)),
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        }
    }

}

/// Populates the `Allow` header for `describe`: every verb whose bound
/// method name(s) exist on the resource, each verb once.
fn add_allow_header<R: Resource>(ctx: &mut Context<'_>, table: &HandlerTable<R>) {
    let mut verbs: Vec<String> = Vec::new();
    for (verb, binding) in R::method_map().iter() {
        if binding.names().iter().any(|name| table.contains(name)) {
            let verb = verb.to_ascii_uppercase();
            if !verbs.contains(&verb) {
                verbs.push(verb);
            }
        }
    }
    ctx.set_header("Allow", verbs.join(","));
}

/// Maps a handler failure onto the classified taxonomy: classified errors
/// pass through, opaque ones become a generic 503 with the detail logged
/// and withheld from the client.
fn classify(err: HandlerError) -> RestError {
    match err {
        HandlerError::Rest(err) => err,
        HandlerError::Other(source) => {
            tracing::error!(error = %source, "handler failed");
            RestError::server_error("Service is not available")
        }
    }
}

fn filter_map(map: Map, fields: &FieldSet) -> Map {
    map.into_iter()
        .filter(|(key, _)| fields.contains(key))
        .collect()
}
