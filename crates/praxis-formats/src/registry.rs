//! The process-wide format registry.
//!
//! Lifecycle: the registry is created on first access with the built-in
//! variants already installed, custom variants are registered once at
//! process startup, and there is no unregistration. After startup the
//! registry is effectively read-only, which makes lookups safe from any
//! number of concurrently handled requests.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::form::FormEncodedFormat;
use crate::json::JsonFormat;
use crate::Formatter;

/// Name of the process-wide default format.
pub const DEFAULT_FORMAT: &str = "json";

type Registry = RwLock<HashMap<String, Arc<dyn Formatter>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut formatters: HashMap<String, Arc<dyn Formatter>> = HashMap::new();
        let builtins: [Arc<dyn Formatter>; 2] =
            [Arc::new(JsonFormat), Arc::new(FormEncodedFormat)];
        for formatter in builtins {
            formatters.insert(formatter.name().to_string(), formatter);
        }
        RwLock::new(formatters)
    })
}

/// Registers a format variant under its [`Formatter::name`].
///
/// Call once per custom variant at process startup. Registering a name
/// twice replaces the earlier variant.
pub fn register_formatter(formatter: Arc<dyn Formatter>) {
    tracing::debug!(name = formatter.name(), "registering formatter");
    registry()
        .write()
        .insert(formatter.name().to_string(), formatter);
}

/// Returns the format variant registered under `name`, if any.
///
/// Never panics: an unknown name is `None`, which dispatch treats as an
/// unrecognizable format.
#[must_use]
pub fn get_formatter(name: &str) -> Option<Arc<dyn Formatter>> {
    registry().read().get(name).cloned()
}

/// Returns the process-wide default format (JSON).
#[must_use]
pub fn default_formatter() -> Arc<dyn Formatter> {
    get_formatter(DEFAULT_FORMAT).unwrap_or_else(|| Arc::new(JsonFormat))
}
