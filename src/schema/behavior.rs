//! Opaque behaviors that are attached to a live schema.
//!
//! A [DataFetcher] produces the runtime value of a field, and a [TypeResolver] maps a runtime
//! value of an abstract type to its concrete object type. Neither can be serialized. The
//! marshaller only records a stable id for them, the name of the implementing type, and for the
//! [StaticDataFetcher] case the constant value it returns.

use serde_json::{Map, Value};
use std::fmt;

/// A behavior attached to a field that produces the field's runtime value.
pub trait DataFetcher: fmt::Debug {
    /// Produce the value of the field for a parent `source` value and the field's arguments.
    fn fetch(&self, source: &Value, arguments: &Map<String, Value>) -> Value;

    /// Whether this fetcher is a pass-through property accessor.
    ///
    /// Trivial fetchers are what every field would get by default and are not serialized.
    #[inline]
    fn is_trivial(&self) -> bool {
        false
    }

    /// The constant value this fetcher always returns, if it is a constant fetcher.
    #[inline]
    fn static_value(&self) -> Option<&Value> {
        None
    }

    /// The name of the implementing type, recorded alongside the fetcher's id.
    #[inline]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A behavior attached to an interface or union type that determines the concrete object type
/// of a runtime value.
pub trait TypeResolver: fmt::Debug {
    /// Return the name of the object type `value` belongs to.
    fn resolve_type(&self, value: &Value) -> Option<String>;

    /// The name of the implementing type, recorded alongside the resolver's id.
    #[inline]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Reads a property with the field's name off its parent value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDataFetcher {
    pub property: String,
}

impl PropertyDataFetcher {
    pub fn new<S: Into<String>>(property: S) -> Self {
        PropertyDataFetcher {
            property: property.into(),
        }
    }
}

impl DataFetcher for PropertyDataFetcher {
    fn fetch(&self, source: &Value, _arguments: &Map<String, Value>) -> Value {
        source.get(&self.property).cloned().unwrap_or(Value::Null)
    }

    #[inline]
    fn is_trivial(&self) -> bool {
        true
    }
}

/// Always returns the same constant value.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticDataFetcher {
    pub value: Value,
}

impl StaticDataFetcher {
    pub fn new(value: Value) -> Self {
        StaticDataFetcher { value }
    }
}

impl DataFetcher for StaticDataFetcher {
    fn fetch(&self, _source: &Value, _arguments: &Map<String, Value>) -> Value {
        self.value.clone()
    }

    #[inline]
    fn static_value(&self) -> Option<&Value> {
        Some(&self.value)
    }
}

/// Resolves the object type from a `__typename` property on the runtime value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TypenameResolver;

impl TypeResolver for TypenameResolver {
    fn resolve_type(&self, value: &Value) -> Option<String> {
        value
            .get("__typename")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}
