//! Declarative payload validation for Praxis.
//!
//! A [`FieldSet`] maps payload keys to [`Field`] rules. Validating a
//! payload drops unknown keys, runs each present field's shape check and
//! settings in declared order, then enforces the required set against the
//! cleaned result, where requiredness can itself be a predicate over the
//! already-validated sibling data.
//!
//! # Example
//!
//! ```
//! use praxis_core::{Map, Value};
//! use praxis_fields::{Field, FieldSet};
//!
//! let fields = FieldSet::new()
//!     .with("id", Field::integer().required())
//!     .with("name", Field::string().max_length(50));
//!
//! let mut payload = Map::new();
//! payload.insert("id".to_string(), Value::from("7"));
//! payload.insert("junk".to_string(), Value::Bool(true));
//!
//! let cleaned = fields.validate(&payload).expect("valid");
//! assert_eq!(cleaned["id"], Value::Int(7));
//! assert!(!cleaned.contains_key("junk"));
//! ```

mod error;
mod field;
mod set;

pub use error::FieldError;
pub use field::{Field, FieldKind, Requirement, Setting};
pub use set::FieldSet;
