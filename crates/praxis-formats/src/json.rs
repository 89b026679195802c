//! The built-in JSON format.

use praxis_core::Value;

use crate::{Formatter, LoadError};

/// JSON format variant, the process-wide default.
///
/// Encodes [`Value::DateTime`] values as epoch seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Formatter for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn serialize(&self, data: &Value) -> Result<String, LoadError> {
        serde_json::to_string(data)
            .map_err(|err| LoadError::new(format!("failed to encode json: {err}")))
    }

    fn unserialize(&self, data: &str) -> Result<Value, LoadError> {
        let parsed: serde_json::Value = serde_json::from_str(data)
            .map_err(|err| LoadError::new(format!("malformed json payload: {err}")))?;
        Ok(Value::from(parsed))
    }
}
