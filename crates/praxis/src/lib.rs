//! # Praxis
//!
//! **Synchronous REST resource toolkit**
//!
//! Praxis turns plain structs into REST endpoints. It provides:
//!
//! - **Resource dispatch** – a verb-to-method state machine that resolves
//!   HTTP verbs (plus the `X-HTTP-Method-Override` header) and identifier
//!   presence into named handler methods
//! - **Payload validation** – declarative [`FieldSet`](fields::FieldSet)
//!   rules with typecasting, pattern matching, and conditional requiredness
//! - **Pluggable wire formats** – a process-wide registry of
//!   [`Formatter`](formats::Formatter)s, with JSON and form-urlencoded
//!   built in
//! - **A classified error taxonomy** – every failure maps to a fixed HTTP
//!   status and a structured, serializable error body
//!
//! The toolkit is transport-agnostic: adapters implement the read-only
//! [`Request`](core::Request) trait over their host framework's request
//! type and hand the resulting [`ResponseParts`](core::ResponseParts)
//! back to it.
//!
//! ## Quick Start
//!
//! ```
//! use praxis::prelude::*;
//!
//! struct Sites;
//!
//! impl Sites {
//!     fn list(&mut self, _ctx: &mut Context<'_>) -> HandlerResult {
//!         Ok(Value::List(vec![Value::from("example.org")]))
//!     }
//! }
//!
//! impl Resource for Sites {
//!     fn handlers() -> HandlerTable<Self> {
//!         HandlerTable::new().with("list", Sites::list)
//!     }
//! }
//!
//! let request = OwnedRequest::new("GET");
//! let response = Dispatcher::new(Sites, &request, get_formatter("json")).dispatch(&[]);
//! assert_eq!(response.status.as_u16(), 200);
//! assert_eq!(response.body, r#"["example.org"]"#);
//! ```

#![doc(html_root_url = "https://docs.rs/praxis/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use praxis_core as core;

// Re-export wire formats and the registry
pub use praxis_formats as formats;

// Re-export payload validation
pub use praxis_fields as fields;

// Re-export the resource contract and dispatcher
pub use praxis_resource as resource;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use praxis::prelude::*;
/// ```
pub mod prelude {
    pub use praxis_core::{
        ErrorKind, Map, OwnedRequest, Request, ResponseParts, RestError, RestResult, Value,
    };

    // Re-export format negotiation entry points
    pub use praxis_formats::{
        default_formatter, get_formatter, register_formatter, Formatter, LoadError,
    };

    // Re-export payload validation types
    pub use praxis_fields::{Field, FieldError, FieldSet, Requirement};

    // Re-export the resource contract and dispatcher
    pub use praxis_resource::{
        compose, BoxedHandler, Context, Dispatcher, Handler, HandlerError, HandlerResult,
        HandlerTable, MethodBinding, MethodMap, Middleware, Resource,
    };
}
