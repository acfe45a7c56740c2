use serde::{Deserialize, Serialize};

/// The reserved type names of GraphQL's introspection meta-model.
pub const INTROSPECTION_TYPES: [&str; 7] = [
    "__Schema",
    "__Type",
    "__TypeKind",
    "__Field",
    "__InputValue",
    "__EnumValue",
    "__Directive",
];

/// Returns whether `name` is one of the reserved [INTROSPECTION_TYPES].
#[inline]
pub fn is_introspection_type(name: &str) -> bool {
    INTROSPECTION_TYPES.contains(&name)
}

/// Options of a single marshal or unmarshal call.
///
/// ```
/// use graphql_marshal::marshal::MarshalOptions;
///
/// let options = MarshalOptions::new().include_directives(true);
/// assert!(options.includes_directives());
/// assert!(!options.includes_introspection_types());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarshalOptions {
    include_introspection_types: bool,
    include_directives: bool,
}

impl MarshalOptions {
    #[inline]
    pub fn new() -> Self {
        MarshalOptions::default()
    }

    /// Keep the introspection types (`__Schema`, `__Type`, ...) in the document.
    #[inline]
    pub fn include_introspection_types(mut self, include: bool) -> Self {
        self.include_introspection_types = include;
        self
    }

    /// Keep the schema's directive definitions in the document.
    #[inline]
    pub fn include_directives(mut self, include: bool) -> Self {
        self.include_directives = include;
        self
    }

    #[inline]
    pub fn includes_introspection_types(&self) -> bool {
        self.include_introspection_types
    }

    #[inline]
    pub fn includes_directives(&self) -> bool {
        self.include_directives
    }

    /// Whether a named type should be part of the document.
    #[inline]
    pub(crate) fn includes_type(&self, name: &str) -> bool {
        self.include_introspection_types || !is_introspection_type(name)
    }
}
