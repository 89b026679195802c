//! Mapping of HTTP verbs to resource method names.

use indexmap::IndexMap;

/// What a verb maps to: one method name, or a pair selected by whether
/// the request path carried an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodBinding {
    /// One method regardless of identifier presence.
    Single(&'static str),
    /// `(no-identifier, with-identifier)` pair, e.g. `(list, show)`.
    Pair(&'static str, &'static str),
}

impl MethodBinding {
    /// Selects the method name for the given identifier presence.
    #[must_use]
    pub fn select(&self, has_iden: bool) -> &'static str {
        match *self {
            Self::Single(name) => name,
            Self::Pair(without, with) => {
                if has_iden {
                    with
                } else {
                    without
                }
            }
        }
    }

    /// All method names this binding can resolve to.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        match *self {
            Self::Single(name) => vec![name],
            Self::Pair(without, with) => vec![without, with],
        }
    }
}

/// Insertion-ordered map of lowercased HTTP verb to [`MethodBinding`].
///
/// # Example
///
/// ```
/// use praxis_resource::MethodMap;
///
/// let map = MethodMap::default();
/// assert_eq!(map.get("GET").unwrap().select(true), "show");
/// assert_eq!(map.get("post").unwrap().select(false), "create");
/// ```
#[derive(Debug, Clone)]
pub struct MethodMap {
    bindings: IndexMap<String, MethodBinding>,
}

impl MethodMap {
    /// Creates an empty map.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Binds a verb to a single method name.
    #[must_use]
    pub fn single(mut self, verb: &str, name: &'static str) -> Self {
        self.bindings
            .insert(verb.to_ascii_lowercase(), MethodBinding::Single(name));
        self
    }

    /// Binds a verb to a `(no-identifier, with-identifier)` pair.
    #[must_use]
    pub fn pair(mut self, verb: &str, without: &'static str, with: &'static str) -> Self {
        self.bindings
            .insert(verb.to_ascii_lowercase(), MethodBinding::Pair(without, with));
        self
    }

    /// Looks up a verb, case-insensitively.
    #[must_use]
    pub fn get(&self, verb: &str) -> Option<&MethodBinding> {
        self.bindings.get(&verb.to_ascii_lowercase())
    }

    /// Iterates verbs and bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MethodBinding)> {
        self.bindings
            .iter()
            .map(|(verb, binding)| (verb.as_str(), binding))
    }
}

impl Default for MethodMap {
    /// The standard CRUD mapping: GET to `(list, show)`, POST to
    /// `create`, PUT to `edit`, DELETE to `delete`, OPTIONS to
    /// `describe`.
    fn default() -> Self {
        Self::empty()
            .pair("get", "list", "show")
            .single("post", "create")
            .single("put", "edit")
            .single("delete", "delete")
            .single("options", "describe")
    }
}
