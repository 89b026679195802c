//! Field engine failures.

use thiserror::Error;

/// A field validation or configuration failure.
///
/// The two variants are deliberately distinct: [`FieldError::Invalid`] is
/// a data problem the client can fix, [`FieldError::Configuration`] is a
/// programming mistake (an unsupported setting on a field), and the
/// dispatch boundary maps them to 400 and 503 respectively.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The payload value failed validation.
    #[error("{0}")]
    Invalid(String),

    /// The field declaration itself is misconfigured.
    #[error("{0}")]
    Configuration(String),
}

impl FieldError {
    /// Creates a validation failure.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// Creates a configuration failure.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
