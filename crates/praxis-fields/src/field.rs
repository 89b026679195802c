//! A single named, typed validation and coercion rule.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::TimeZone;
use chrono::Utc;
use praxis_core::{Map, Value};
use regex::{Regex, RegexBuilder};

use crate::error::FieldError;

/// Scheme, host, optional port, and path.
const URL_PATTERN: &str = r"^(?:https?|ftp)://[\w.-]+(?::\d+)?(?:/\S*)?$";

/// Local part at domain, loosely per RFC shapes.
const EMAIL_PATTERN: &str = r"^[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}$";

/// Whether and when a field must be present in the cleaned payload.
pub enum Requirement {
    /// The field is optional.
    Never,
    /// The field must always be present.
    Always,
    /// The field is required when the predicate over the *cleaned*
    /// sibling data returns true; evaluated after all present fields
    /// have validated individually.
    When(Arc<dyn Fn(&Map) -> bool + Send + Sync>),
}

impl Requirement {
    /// Evaluates the requirement against the cleaned payload.
    #[must_use]
    pub fn evaluate(&self, cleaned: &Map) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::When(predicate) => predicate(cleaned),
        }
    }
}

impl Clone for Requirement {
    fn clone(&self) -> Self {
        match self {
            Self::Never => Self::Never,
            Self::Always => Self::Always,
            Self::When(predicate) => Self::When(Arc::clone(predicate)),
        }
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "Never"),
            Self::Always => write!(f, "Always"),
            Self::When(_) => write!(f, "When(..)"),
        }
    }
}

/// The shape a field coerces its input into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric value coerced to an integer.
    Integer,
    /// Textual value.
    Str,
    /// Textual value matched against one or more patterns.
    Pattern,
    /// Exactly a boolean.
    Boolean,
    /// A sequence, optionally with per-element validation.
    List,
    /// A key-value mapping.
    Dict,
    /// Epoch milliseconds coerced to a UTC calendar value.
    DateTime,
}

/// A configured validation setting.
///
/// Settings run after the shape check, in declared order; a setting the
/// field's kind does not support is a configuration error, not a data
/// error.
#[derive(Debug, Clone)]
pub enum Setting {
    /// Maximum string length.
    MaxLength(usize),
    /// Inclusive integer bounds.
    Range(i64, i64),
    /// Patterns the value must match at least one of (case-insensitive).
    Patterns(Vec<String>),
    /// Return only the first match instead of all matched groups.
    UseFirstFound,
    /// Validation rule applied to every list element.
    Element(Box<Field>),
}

impl Setting {
    /// The setting's declarative name, used in configuration errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MaxLength(_) => "max_length",
            Self::Range(..) => "range",
            Self::Patterns(_) => "pattern",
            Self::UseFirstFound => "use_first_found",
            Self::Element(_) => "element_field",
        }
    }
}

/// A single named validation and coercion rule.
///
/// Built with the kind constructors ([`Field::integer`], [`Field::string`],
/// ...) and chainable settings; named by the [`FieldSet`](crate::FieldSet)
/// that owns it.
#[derive(Debug, Clone)]
pub struct Field {
    kind: FieldKind,
    name: String,
    requirement: Requirement,
    nullable: bool,
    settings: Vec<Setting>,
    // Pattern sources are fixed once the field is declared; compiled
    // regexes are cached on first validation.
    compiled_patterns: OnceLock<Result<Vec<Regex>, String>>,
}

impl Field {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            name: String::new(),
            requirement: Requirement::Never,
            nullable: false,
            settings: Vec::new(),
            compiled_patterns: OnceLock::new(),
        }
    }

    /// An integer field.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    /// A string field.
    #[must_use]
    pub fn string() -> Self {
        Self::new(FieldKind::Str)
    }

    /// A string field matched against configured patterns.
    #[must_use]
    pub fn regex() -> Self {
        Self::new(FieldKind::Pattern)
    }

    /// A pattern field with the built-in URL pattern.
    #[must_use]
    pub fn url() -> Self {
        Self::regex().pattern(URL_PATTERN)
    }

    /// A pattern field with the built-in email pattern.
    #[must_use]
    pub fn email() -> Self {
        Self::regex().pattern(EMAIL_PATTERN)
    }

    /// A boolean field.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    /// A list field.
    #[must_use]
    pub fn list() -> Self {
        Self::new(FieldKind::List)
    }

    /// A mapping field.
    #[must_use]
    pub fn dict() -> Self {
        Self::new(FieldKind::Dict)
    }

    /// A datetime field reading epoch milliseconds.
    #[must_use]
    pub fn datetime() -> Self {
        Self::new(FieldKind::DateTime)
    }

    /// Marks the field as always required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Always;
        self
    }

    /// Marks the field required when the predicate over the cleaned
    /// payload returns true.
    #[must_use]
    pub fn required_when(
        mut self,
        predicate: impl Fn(&Map) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.requirement = Requirement::When(Arc::new(predicate));
        self
    }

    /// Lets a null input short-circuit to null without further checks.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Limits string length.
    #[must_use]
    pub fn max_length(mut self, limit: usize) -> Self {
        self.settings.push(Setting::MaxLength(limit));
        self
    }

    /// Bounds an integer inclusively.
    #[must_use]
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.settings.push(Setting::Range(min, max));
        self
    }

    /// Adds a pattern the value may match.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        for setting in &mut self.settings {
            if let Setting::Patterns(patterns) = setting {
                patterns.push(pattern);
                return self;
            }
        }
        self.settings.push(Setting::Patterns(vec![pattern]));
        self
    }

    /// Adds several patterns at once.
    #[must_use]
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self = self.pattern(pattern);
        }
        self
    }

    /// Makes pattern matching return only the first match.
    #[must_use]
    pub fn use_first_found(mut self) -> Self {
        self.settings.push(Setting::UseFirstFound);
        self
    }

    /// Validates every list element with the given field.
    #[must_use]
    pub fn element(mut self, field: Field) -> Self {
        self.settings.push(Setting::Element(Box::new(field)));
        self
    }

    /// Returns the field's name, assigned by its owning field set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field's kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the field's requirement.
    #[must_use]
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Validates and coerces a single value.
    ///
    /// Runs the nullable short-circuit, the shape check, then every
    /// configured setting in declared order, each of which may transform
    /// the value further.
    pub fn validate(&self, value: &Value) -> Result<Value, FieldError> {
        if self.nullable && value.is_null() {
            return Ok(Value::Null);
        }
        let mut current = self.check_shape(value)?;
        for setting in &self.settings {
            current = self.apply_setting(setting, current)?;
        }
        Ok(current)
    }

    fn check_shape(&self, value: &Value) -> Result<Value, FieldError> {
        match self.kind {
            FieldKind::Integer => coerce_int(value).map(Value::Int).ok_or_else(|| {
                FieldError::invalid(format!("Field \"{}\" not a number", self.name))
            }),
            FieldKind::Str | FieldKind::Pattern => match value {
                Value::String(text) => Ok(Value::String(text.clone())),
                _ => Err(FieldError::invalid(format!(
                    "Field \"{}\" not a string",
                    self.name
                ))),
            },
            FieldKind::Boolean => match value {
                Value::Bool(flag) => Ok(Value::Bool(*flag)),
                _ => Err(FieldError::invalid(format!(
                    "Field \"{}\" not a boolean",
                    self.name
                ))),
            },
            FieldKind::List => match value {
                Value::List(items) => Ok(Value::List(items.clone())),
                _ => Err(FieldError::invalid(format!(
                    "Field \"{}\" not a list",
                    self.name
                ))),
            },
            FieldKind::Dict => match value {
                Value::Map(map) => Ok(Value::Map(map.clone())),
                _ => Err(FieldError::invalid(format!(
                    "Field \"{}\" not a mapping",
                    self.name
                ))),
            },
            FieldKind::DateTime => coerce_int(value)
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                .map(Value::DateTime)
                .ok_or_else(|| {
                    FieldError::invalid(format!(
                        "Field \"{}\" can't be parsed as a datetime",
                        self.name
                    ))
                }),
        }
    }

    fn apply_setting(&self, setting: &Setting, value: Value) -> Result<Value, FieldError> {
        match (self.kind, setting) {
            (FieldKind::Str | FieldKind::Pattern, Setting::MaxLength(limit)) => {
                if let Value::String(text) = &value {
                    if text.chars().count() > *limit {
                        return Err(FieldError::invalid(format!(
                            "Field \"{}\" is longer than expected",
                            self.name
                        )));
                    }
                }
                Ok(value)
            }
            (FieldKind::Integer, Setting::Range(min, max)) => {
                if let Value::Int(number) = &value {
                    if number < min || number > max {
                        return Err(FieldError::invalid(format!(
                            "Field \"{}\" is out of range",
                            self.name
                        )));
                    }
                }
                Ok(value)
            }
            (FieldKind::Pattern, Setting::Patterns(patterns)) => {
                self.apply_patterns(patterns, value)
            }
            // Consumed by the pattern validator; a no-op on its own.
            (FieldKind::Pattern, Setting::UseFirstFound) => Ok(value),
            (FieldKind::List, Setting::Element(element)) => self.apply_element(element, value),
            _ => Err(FieldError::configuration(format!(
                "Setting \"{}\" is not supported for field \"{}\"",
                setting.name(),
                self.name
            ))),
        }
    }

    fn apply_patterns(&self, patterns: &[String], value: Value) -> Result<Value, FieldError> {
        let Value::String(text) = &value else {
            return Ok(value);
        };
        let first_only = self
            .settings
            .iter()
            .any(|setting| matches!(setting, Setting::UseFirstFound));

        let compiled = self
            .compiled_patterns
            .get_or_init(|| compile_patterns(patterns))
            .as_ref()
            .map_err(|err| {
                FieldError::configuration(format!(
                    "Setting \"pattern\" for field \"{}\" is not a valid expression: {err}",
                    self.name
                ))
            })?;

        for pattern in compiled {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let whole = captures
                .get(0)
                .map(|found| found.as_str().to_string())
                .unwrap_or_default();
            if first_only {
                let first = captures
                    .get(1)
                    .map_or(whole, |group| group.as_str().to_string());
                return Ok(Value::String(first));
            }
            if captures.len() > 1 {
                let groups = (1..captures.len())
                    .map(|index| {
                        captures
                            .get(index)
                            .map_or(Value::Null, |group| Value::from(group.as_str()))
                    })
                    .collect();
                return Ok(Value::List(groups));
            }
            return Ok(Value::String(whole));
        }
        Err(FieldError::invalid(format!(
            "Field \"{}\" does not match the pattern",
            self.name
        )))
    }

    fn apply_element(&self, element: &Field, value: Value) -> Result<Value, FieldError> {
        let Value::List(items) = value else {
            return Ok(value);
        };
        let mut validated = Vec::with_capacity(items.len());
        for item in &items {
            match element.validate(item) {
                Ok(cleaned) => validated.push(cleaned),
                // A misconfigured element field is still a programming
                // mistake; only data failures aggregate.
                Err(err @ FieldError::Configuration(_)) => return Err(err),
                Err(FieldError::Invalid(_)) => {
                    return Err(FieldError::invalid(format!(
                        "Field \"{}\" contains invalid elements",
                        self.name
                    )));
                }
            }
        }
        Ok(Value::List(validated))
    }
}

/// Compiles every declared pattern source, case-insensitively. The first
/// invalid source fails the whole set; the error is cached alongside the
/// compiled patterns and reported on every validation.
fn compile_patterns(sources: &[String]) -> Result<Vec<Regex>, String> {
    sources
        .iter()
        .map(|source| {
            RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map_err(|err| err.to_string())
        })
        .collect()
}

/// Numeric coercion shared by the integer and datetime shapes: integers
/// pass through, floats truncate, integer-literal strings parse.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(number) => Some(*number),
        Value::Float(number) => Some(*number as i64),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}
