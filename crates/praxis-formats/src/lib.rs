//! Pluggable serialization formats for Praxis.
//!
//! A [`Formatter`] turns raw request body text into a
//! [`Value`](praxis_core::Value) and serializes handler output back to
//! text. Variants are identified by a unique name and a content type and
//! live in a process-wide registry: the built-in JSON and form-urlencoded
//! variants are installed when the registry is first touched, and custom
//! variants are added with an explicit [`register_formatter`] call at
//! process startup. The registry is read-mostly after that point and safe
//! to consult from concurrently handled requests.
//!
//! # Example
//!
//! ```
//! use praxis_formats::{get_formatter, DEFAULT_FORMAT};
//!
//! let json = get_formatter(DEFAULT_FORMAT).expect("json is built in");
//! let value = json.unserialize(r#"{"id": 5}"#).expect("well-formed");
//! assert_eq!(json.content_type(), "application/json");
//! let text = json.serialize(&value).expect("serializable");
//! assert_eq!(text, r#"{"id":5}"#);
//! ```

mod form;
mod json;
mod registry;

use praxis_core::Value;
use thiserror::Error;

pub use form::FormEncodedFormat;
pub use json::JsonFormat;
pub use registry::{default_formatter, get_formatter, register_formatter, DEFAULT_FORMAT};

/// Error raised when serializing or unserializing goes wrong.
///
/// Formatters never let the underlying parser error escape raw; malformed
/// input and unencodable output both surface as a `LoadError`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    /// Creates a load error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A serialization strategy identified by name and content type.
pub trait Formatter: Send + Sync {
    /// The unique registry name of this format (e.g. `"json"`).
    fn name(&self) -> &'static str;

    /// The content type sent with responses in this format.
    fn content_type(&self) -> &'static str;

    /// Serializes outgoing data.
    fn serialize(&self, data: &Value) -> Result<String, LoadError>;

    /// Unserializes an incoming payload.
    fn unserialize(&self, data: &str) -> Result<Value, LoadError>;
}
