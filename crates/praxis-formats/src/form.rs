//! The form-urlencoded format.
//!
//! Query-string bodies carry no type information, so scalar values are
//! typecast on the way in: integer literals become integers, `true` and
//! `false` become booleans, `null`/`none` become null, and anything else
//! stays a string. Nested keys in `root[a][b]=v` notation expand into
//! nested maps, matching the bracket convention HTML forms use for
//! structured payloads.

use std::sync::OnceLock;

use praxis_core::{Map, Value};
use regex::Regex;

use crate::{Formatter, LoadError};

/// Form-urlencoded format variant, registered as `"html"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormEncodedFormat;

fn nested_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(\w+)\]").expect("valid pattern"))
}

/// Typecasts a query-string scalar: int, then bool, then null, else string.
fn typecast(value: &str) -> Value {
    if value.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(number) = value.parse::<i64>() {
        return Value::Int(number);
    }
    match value.to_ascii_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" | "none" => Value::Null,
        _ => Value::String(value.to_string()),
    }
}

/// Builds the nested branch for `[a][b][c]=value` style keys: the chain of
/// single-entry maps ending in the typecast value.
fn build_branch(keys: &[&str], value: &str) -> Value {
    let mut node = typecast(value);
    for key in keys.iter().skip(1).rev() {
        let mut map = Map::new();
        map.insert((*key).to_string(), node);
        node = Value::Map(map);
    }
    node
}

fn scalar_to_string(key: &str, value: &Value) -> Result<String, LoadError> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        Value::Int(value) => Ok(value.to_string()),
        Value::Float(value) => Ok(value.to_string()),
        Value::String(value) => Ok(value.clone()),
        Value::DateTime(value) => Ok(value.timestamp().to_string()),
        Value::List(_) | Value::Map(_) => Err(LoadError::new(format!(
            "form encoding does not support nested values under \"{key}\""
        ))),
    }
}

impl Formatter for FormEncodedFormat {
    fn name(&self) -> &'static str {
        "html"
    }

    fn content_type(&self) -> &'static str {
        "application/x-www-form-urlencoded"
    }

    fn serialize(&self, data: &Value) -> Result<String, LoadError> {
        let Value::Map(map) = data else {
            return Err(LoadError::new(
                "form encoding requires a key -> value structure",
            ));
        };
        let mut pairs = Vec::with_capacity(map.len());
        for (key, value) in map {
            pairs.push((key.clone(), scalar_to_string(key, value)?));
        }
        serde_urlencoded::to_string(pairs)
            .map_err(|err| LoadError::new(format!("failed to encode form data: {err}")))
    }

    fn unserialize(&self, data: &str) -> Result<Value, LoadError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(data)
            .map_err(|err| LoadError::new(format!("malformed form payload: {err}")))?;

        let mut result = Map::new();
        for (key, value) in pairs {
            let nested: Vec<&str> = nested_key_pattern()
                .captures_iter(&key)
                .filter_map(|captures| captures.get(1).map(|group| group.as_str()))
                .collect();
            if nested.is_empty() {
                result.insert(key, typecast(&value));
                continue;
            }
            let root_key = key.split('[').next().unwrap_or_default().to_string();
            let branch = build_branch(&nested, &value);
            let root = result
                .entry(root_key)
                .or_insert_with(|| Value::Map(Map::new()));
            if let Value::Map(root_map) = root {
                root_map.insert(nested[0].to_string(), branch);
            }
        }
        Ok(Value::Map(result))
    }
}
