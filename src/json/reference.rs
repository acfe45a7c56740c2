use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Json key for reference values, i.e. `{"$ref": "#/__types/Query"}`.
pub const REF_KEY: &str = "$ref";

/// Path separator of reference strings.
pub const SLASH: &str = "/";

/// Reference to the root of a marshaled document.
pub const ROOT_REFERENCE: &str = "#/";
/// Reference to the bucket holding the single schema entry.
pub const SCHEMAS_REFERENCE: &str = "#/__schemas/";
/// Reference to the bucket of named non-interface types.
pub const TYPES_REFERENCE: &str = "#/__types/";
/// Reference to the bucket of interface types.
pub const INTERFACES_REFERENCE: &str = "#/__interfaces/";
/// Reference to the bucket of type resolvers, keyed by their generated id.
pub const RESOLVERS_REFERENCE: &str = "#/__typeResolvers/";
/// Reference to the bucket of data fetchers, keyed by their generated id.
pub const FETCHERS_REFERENCE: &str = "#/__dataFetchers/";
/// Reference to the bucket of scalar types, keyed by name.
pub const SCALARS_REFERENCE: &str = "#/__scalarTypes/";

/// A JSON Reference pointing at a node inside a marshaled schema document.
///
/// References are slash-delimited paths with a leading `#/`, formatted after the
/// [JSON Reference draft](https://tools.ietf.org/html/draft-pbryan-zyp-json-ref-03). Named types
/// are addressed by a bucket prefix and their name, while child nodes are addressed relative to
/// their parent, e.g. `#/__types/Query/fieldDefinitions/hello`.
///
/// Two references are equal when their reference strings are equal.
#[derive(Clone)]
pub struct JsonReference {
    reference: String,
}

impl JsonReference {
    /// Create a reference from a reference string. An empty string refers to the document root.
    pub fn new<S: Into<String>>(reference: S) -> Self {
        let reference = reference.into();
        JsonReference {
            reference: if reference.is_empty() {
                ROOT_REFERENCE.to_string()
            } else {
                reference
            },
        }
    }

    /// Reference to the root of the document.
    #[inline]
    pub fn root() -> Self {
        JsonReference::new(ROOT_REFERENCE)
    }

    /// Create the reference of a node that's located in a top-level bucket.
    #[inline]
    pub fn in_bucket(bucket: &str, key: &str) -> Self {
        JsonReference::new(format!("{}{}", bucket, key))
    }

    /// Create the reference of a child node, located under `bucket` relative to this reference.
    ///
    /// When `bucket` is `None` the child is addressed directly by its key, which is the case for
    /// enum values and directives.
    pub fn child(&self, bucket: Option<&str>, key: &str) -> Self {
        let reference = match bucket {
            Some(bucket) => format!("{}{}{}{}{}", self.reference, SLASH, bucket, SLASH, key),
            None => format!("{}{}{}", self.reference, SLASH, key),
        };
        JsonReference::new(reference)
    }

    /// Returns the reference string.
    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the key of the referenced node, which is the last segment of the reference
    /// string, or an empty string when this is the root reference.
    #[inline]
    pub fn target_key(&self) -> &str {
        target_key(&self.reference)
    }

    /// Whether this is the root reference.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.reference == ROOT_REFERENCE
    }

    /// Returns the reference object, `{"$ref": "<reference>"}`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(REF_KEY.to_string(), Value::String(self.reference.clone()));
        Value::Object(map)
    }

    /// Reads the reference out of a `{"$ref": ...}` object, if `json` is a reference object.
    pub fn from_json(json: &Value) -> Option<Self> {
        reference_of(json).map(JsonReference::new)
    }

    /// Follows this reference through `root` segment by segment.
    ///
    /// A segment on an object selects the member of that key. A segment on an array selects the
    /// element whose `name` equals the segment, since lists of named nodes are marshaled as
    /// arrays. An empty segment selects the current node, which covers the trailing slash of
    /// list and non-null addresses.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let path = self
            .reference
            .strip_prefix(ROOT_REFERENCE)
            .or_else(|| self.reference.strip_prefix('#'))?;
        path.split(SLASH).try_fold(root, |json, segment| match json {
            _ if segment.is_empty() => Some(json),
            Value::Object(map) => map.get(segment),
            Value::Array(list) => list
                .iter()
                .find(|element| element.get("name").and_then(Value::as_str) == Some(segment)),
            _ => None,
        })
    }
}

/// Returns the reference string of a `{"$ref": ...}` object.
#[inline]
pub fn reference_of(json: &Value) -> Option<&str> {
    json.get(REF_KEY).and_then(Value::as_str)
}

/// Returns the last segment of a reference string.
#[inline]
pub fn target_key(reference: &str) -> &str {
    if reference == ROOT_REFERENCE {
        ""
    } else {
        reference
            .rfind(SLASH)
            .map_or(reference, |index| &reference[index + 1..])
    }
}

impl PartialEq for JsonReference {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for JsonReference {}

impl Hash for JsonReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

impl fmt::Display for JsonReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}

impl fmt::Debug for JsonReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonReference").field(&self.reference).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_reference_is_root() {
        let reference = JsonReference::new("");
        assert!(reference.is_root());
        assert_eq!(reference, JsonReference::root());
        assert_eq!(reference.target_key(), "");
    }

    #[test]
    fn child_references() {
        let query = JsonReference::in_bucket(TYPES_REFERENCE, "Query");
        assert_eq!(query.reference(), "#/__types/Query");

        let field = query.child(Some("fieldDefinitions"), "hello");
        assert_eq!(field.reference(), "#/__types/Query/fieldDefinitions/hello");
        assert_eq!(field.target_key(), "hello");

        let wrapped = field.child(Some("wrappedType"), "");
        assert_eq!(
            wrapped.reference(),
            "#/__types/Query/fieldDefinitions/hello/wrappedType/"
        );
        assert_eq!(wrapped.target_key(), "");

        let value = JsonReference::in_bucket(TYPES_REFERENCE, "Episode").child(None, "JEDI");
        assert_eq!(value.reference(), "#/__types/Episode/JEDI");
    }

    #[test]
    fn equality_only_compares_strings() {
        let left = JsonReference::new("#/__types/Query");
        let right = JsonReference::from_json(&json!({ "$ref": "#/__types/Query" })).unwrap();
        assert_eq!(left, right);
        assert_ne!(left, JsonReference::new("#/__interfaces/Query"));
        assert_eq!(left.to_json(), json!({ "$ref": "#/__types/Query" }));
        assert_eq!(left.to_string(), "#/__types/Query");
    }

    #[test]
    fn resolve_through_objects_and_arrays() {
        let document = json!({
            "__types": {
                "Query": {
                    "name": "Query",
                    "fieldDefinitions": [
                        { "name": "hello", "type": { "$ref": "#/__scalarTypes/String" } }
                    ]
                }
            }
        });

        let query = JsonReference::new("#/__types/Query").resolve(&document).unwrap();
        assert_eq!(query.get("name"), Some(&json!("Query")));

        let hello = JsonReference::new("#/__types/Query/fieldDefinitions/hello")
            .resolve(&document)
            .unwrap();
        assert!(std::ptr::eq(hello, &document["__types"]["Query"]["fieldDefinitions"][0]));

        assert!(JsonReference::new("#/__types/Mutation")
            .resolve(&document)
            .is_none());
        assert!(std::ptr::eq(
            JsonReference::root().resolve(&document).unwrap(),
            &document
        ));
    }
}
