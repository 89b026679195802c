//! Core types for the Praxis REST resource toolkit.
//!
//! This crate holds the leaf types shared by the rest of the workspace:
//!
//! - [`Value`]: the self-describing payload currency that formatters
//!   decode into, fields coerce, and handlers return
//! - [`RestError`]: the classified error taxonomy with fixed HTTP status
//!   codes and an open structured-info map
//! - [`Request`]: the abstract request capability implemented by
//!   per-framework adapters
//! - [`ResponseParts`]: the body/status/content-type/headers tuple an
//!   adapter forwards to its host framework
//!
//! Nothing in this crate performs I/O; the toolkit is a synchronous,
//! single-request processing pipeline invoked by a caller-owned server.

mod error;
mod request;
mod response;
mod value;

pub use error::{ErrorKind, RestError, RestResult};
pub use request::{OwnedRequest, Request};
pub use response::ResponseParts;
pub use value::{Map, Value};
