use serde_json::{Map, Value};

/// Builder for the JSON objects of marshaled nodes.
///
/// Optional properties are only written when they carry a value, and optional lists are only
/// written when they aren't empty, which keeps marshaled documents free of `null` values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JsonObject {
    map: Map<String, Value>,
}

impl JsonObject {
    #[inline]
    pub fn new() -> Self {
        JsonObject { map: Map::new() }
    }

    /// Always writes `value` under `key`.
    pub fn put<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    /// Writes `value` under `key` unless it's `None` or `null`.
    pub fn put_if_present<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value.map(Into::into) {
            Some(Value::Null) | None => self,
            Some(value) => self.put(key, value),
        }
    }

    /// Writes `values` as an array under `key` unless it's empty.
    pub fn put_list_if_present(self, key: &str, values: Vec<Value>) -> Self {
        if values.is_empty() {
            self
        } else {
            self.put(key, Value::Array(values))
        }
    }

    /// Writes `value` under `key` only when `condition` holds.
    pub fn put_if<V: Into<Value>>(self, key: &str, value: V, condition: bool) -> Self {
        if condition {
            self.put(key, value)
        } else {
            self
        }
    }
}

impl From<JsonObject> for Value {
    #[inline]
    fn from(object: JsonObject) -> Self {
        Value::Object(object.map)
    }
}
