//! The Praxis resource contract and dispatch engine.
//!
//! A [`Resource`] is the unit of user-defined behavior: a table of named
//! handler methods, a verb-to-method map, optional per-method payload
//! rules, and optional middleware. The [`Dispatcher`] drives one request
//! through the pipeline (format check, method resolution, payload
//! validation, middleware composition, handler invocation, serialization)
//! and normalizes every failure into a structured [`ResponseParts`].
//!
//! Dispatch is synchronous and request-scoped: construct a fresh
//! `Dispatcher` per request and discard it after the response tuple is
//! produced. The only process-wide state it touches is the read-mostly
//! format registry.
//!
//! # Example
//!
//! ```
//! use praxis_core::{OwnedRequest, Value};
//! use praxis_formats::get_formatter;
//! use praxis_resource::{Context, Dispatcher, HandlerResult, HandlerTable, Resource};
//!
//! struct Items;
//!
//! impl Items {
//!     fn list(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
//!         Ok(Value::List(vec![Value::from("widget")]))
//!     }
//! }
//!
//! impl Resource for Items {
//!     fn handlers() -> HandlerTable<Self> {
//!         HandlerTable::new().with("list", Items::list)
//!     }
//! }
//!
//! let request = OwnedRequest::new("GET");
//! let response = Dispatcher::new(Items, &request, get_formatter("json")).dispatch(&[]);
//! assert_eq!(response.status.as_u16(), 200);
//! assert_eq!(response.body, r#"["widget"]"#);
//! ```

mod context;
mod dispatch;
mod method_map;
mod resource;

pub use context::Context;
pub use dispatch::Dispatcher;
pub use method_map::{MethodBinding, MethodMap};
pub use resource::{
    compose, BoxedHandler, Handler, HandlerError, HandlerResult, HandlerTable, Middleware,
    Resource,
};

pub use praxis_core::ResponseParts;
