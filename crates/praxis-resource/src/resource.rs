//! The resource contract: handler table, hooks, and middleware.

use std::collections::HashMap;

use praxis_core::{RestError, Value};
use praxis_fields::FieldSet;
use thiserror::Error;

use crate::context::Context;
use crate::method_map::MethodMap;

/// What a handler invocation can fail with.
///
/// Classified [`RestError`]s pass through dispatch unchanged and keep
/// their status code; an opaque [`anyhow::Error`] is reclassified as a
/// 503 with a generic message; its detail is logged, never serialized to
/// the client.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// An already classified error.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// Any other failure raised inside a handler or hook.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type returned by handlers and hooks.
pub type HandlerResult = Result<Value, HandlerError>;

/// A resource handler method.
pub type Handler<R> = fn(&mut R, &mut Context<'_>) -> HandlerResult;

/// A boxed, possibly middleware-wrapped handler.
pub type BoxedHandler<R> = Box<dyn FnMut(&mut R, &mut Context<'_>) -> HandlerResult>;

/// A middleware layer: takes the next handler, returns the wrapped one.
pub type Middleware<R> = Box<dyn Fn(BoxedHandler<R>) -> BoxedHandler<R>>;

/// Explicit name-to-handler lookup table, built once per resource type.
///
/// Replaces convention-based attribute lookup with a table consulted at
/// request time; a name with no entry is the dispatchers' "method not
/// implemented" path.
pub struct HandlerTable<R> {
    entries: HashMap<&'static str, Handler<R>>,
}

impl<R> HandlerTable<R> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds a handler under a method name.
    #[must_use]
    pub fn with(mut self, name: &'static str, handler: Handler<R>) -> Self {
        self.entries.insert(name, handler);
        self
    }

    /// Looks up a handler by method name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Handler<R>> {
        self.entries.get(name).copied()
    }

    /// Returns `true` if a handler exists under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl<R> Default for HandlerTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Composes a handler with middleware by folding the list in reverse:
/// the last middleware wraps the handler tightest, the first one runs
/// outermost.
#[must_use]
pub fn compose<R: 'static>(handler: Handler<R>, middleware: &[Middleware<R>]) -> BoxedHandler<R> {
    let mut wrapped: BoxedHandler<R> = Box::new(move |resource, ctx| handler(resource, ctx));
    for layer in middleware.iter().rev() {
        wrapped = layer(wrapped);
    }
    wrapped
}

/// The unit of user-defined behavior dispatched per request.
///
/// Implementations supply the handler table and, optionally, a custom
/// verb map, per-method payload rules, middleware, and the
/// prepare/finish hooks. Instances are created fresh per request and
/// discarded after dispatch.
pub trait Resource: Sized {
    /// The name-to-handler table for this resource.
    fn handlers() -> HandlerTable<Self>;

    /// The verb-to-method map; defaults to the standard CRUD mapping.
    #[must_use]
    fn method_map() -> MethodMap {
        MethodMap::default()
    }

    /// Payload rules for the resolved method name, if any.
    fn fields(&self, method_name: &str) -> Option<&FieldSet> {
        let _ = method_name;
        None
    }

    /// Middleware wrapped around the selected handler, composed by
    /// [`compose`].
    #[must_use]
    fn middleware() -> Vec<Middleware<Self>> {
        Vec::new()
    }

    /// Hook invoked after payload validation, before the handler.
    fn prepare(&mut self, ctx: &mut Context<'_>) -> Result<(), HandlerError> {
        let _ = ctx;
        Ok(())
    }

    /// Hook invoked with the handler's result before serialization.
    fn finish(&mut self, ctx: &mut Context<'_>, result: Value) -> HandlerResult {
        let _ = ctx;
        Ok(result)
    }
}
