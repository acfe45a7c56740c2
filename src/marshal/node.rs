use crate::json::{props, reference_of, target_key, JsonReference};
use crate::schema::*;
use serde_json::Value;
use std::fmt;

/// Handle of a [Node] inside a [SchemaContext](super::SchemaContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}", self.0)
    }
}

/// The closed set of node kinds a schema document is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Enum,
    EnumValue,
    Object,
    Interface,
    Union,
    InputObject,
    InputField,
    List,
    NonNull,
    TypeReference,
    FieldDefinition,
    Argument,
    Directive,
    DataFetcher,
    TypeResolver,
    Schema,
}

impl NodeKind {
    /// The type tag stored under `__marshaled` for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Scalar => "Scalar",
            NodeKind::Enum => "Enum",
            NodeKind::EnumValue => "EnumValue",
            NodeKind::Object => "Object",
            NodeKind::Interface => "Interface",
            NodeKind::Union => "Union",
            NodeKind::InputObject => "InputObject",
            NodeKind::InputField => "InputField",
            NodeKind::List => "List",
            NodeKind::NonNull => "NonNull",
            NodeKind::TypeReference => "TypeReference",
            NodeKind::FieldDefinition => "FieldDefinition",
            NodeKind::Argument => "Argument",
            NodeKind::Directive => "Directive",
            NodeKind::DataFetcher => "DataFetcher",
            NodeKind::TypeResolver => "TypeResolver",
            NodeKind::Schema => "Schema",
        }
    }

    /// List and non-null modifiers have no name and are always marshaled inline.
    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self, NodeKind::List | NodeKind::NonNull)
    }

    /// Whether this kind may appear in the position of a field's, argument's or input field's
    /// type.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            NodeKind::Scalar
                | NodeKind::Enum
                | NodeKind::Object
                | NodeKind::Interface
                | NodeKind::Union
                | NodeKind::InputObject
                | NodeKind::List
                | NodeKind::NonNull
                | NodeKind::TypeReference
        )
    }

    /// Whether nodes of this kind are stored in the `__types` or `__interfaces` buckets.
    pub fn is_schema_type(&self) -> bool {
        matches!(
            self,
            NodeKind::Enum
                | NodeKind::Object
                | NodeKind::Interface
                | NodeKind::Union
                | NodeKind::InputObject
                | NodeKind::TypeReference
        )
    }

    /// Whether nodes of this kind never have children.
    fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Scalar
                | NodeKind::EnumValue
                | NodeKind::TypeReference
                | NodeKind::DataFetcher
                | NodeKind::TypeResolver
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node of a live schema that may be decorated.
#[derive(Debug, Clone, Copy)]
pub enum Live<'a> {
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
    EnumValue(&'a SchemaEnumValue<'a>),
    Object(&'a SchemaObject<'a>),
    Interface(&'a SchemaInterface<'a>),
    Union(&'a SchemaUnion<'a>),
    InputObject(&'a SchemaInputObject<'a>),
    InputField(&'a SchemaInputField<'a>),
    List(&'a TypeRef<'a>),
    NonNull(&'a TypeRef<'a>),
    /// A named type the live schema doesn't define.
    TypeReference(&'a str),
    FieldDefinition(&'a SchemaField<'a>),
    Argument(&'a SchemaArgument<'a>),
    Directive(&'a SchemaDirective<'a>),
    DataFetcher(&'a dyn DataFetcher),
    TypeResolver(&'a dyn TypeResolver),
    Schema(&'a Schema<'a>),
}

#[inline]
fn address<T: ?Sized>(value: &T) -> usize {
    value as *const T as *const () as usize
}

impl<'a> Live<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Live::Scalar(_) => NodeKind::Scalar,
            Live::Enum(_) => NodeKind::Enum,
            Live::EnumValue(_) => NodeKind::EnumValue,
            Live::Object(_) => NodeKind::Object,
            Live::Interface(_) => NodeKind::Interface,
            Live::Union(_) => NodeKind::Union,
            Live::InputObject(_) => NodeKind::InputObject,
            Live::InputField(_) => NodeKind::InputField,
            Live::List(_) => NodeKind::List,
            Live::NonNull(_) => NodeKind::NonNull,
            Live::TypeReference(_) => NodeKind::TypeReference,
            Live::FieldDefinition(_) => NodeKind::FieldDefinition,
            Live::Argument(_) => NodeKind::Argument,
            Live::Directive(_) => NodeKind::Directive,
            Live::DataFetcher(_) => NodeKind::DataFetcher,
            Live::TypeResolver(_) => NodeKind::TypeResolver,
            Live::Schema(_) => NodeKind::Schema,
        }
    }

    /// The key this live node is cached under.
    ///
    /// Live nodes are identified by their address, apart from type references, which only
    /// exist as a name and are identified by it. Zero-sized behaviors may share an address, so
    /// data fetchers and type resolvers are also keyed by their implementing type.
    pub fn identity(&self) -> Identity {
        let kind = self.kind();
        let address = match self {
            Live::Scalar(x) => address(*x),
            Live::Enum(x) => address(*x),
            Live::EnumValue(x) => address(*x),
            Live::Object(x) => address(*x),
            Live::Interface(x) => address(*x),
            Live::Union(x) => address(*x),
            Live::InputObject(x) => address(*x),
            Live::InputField(x) => address(*x),
            Live::List(x) | Live::NonNull(x) => address(*x),
            Live::TypeReference(name) => return Identity::Named(kind, (*name).to_string()),
            Live::FieldDefinition(x) => address(*x),
            Live::Argument(x) => address(*x),
            Live::Directive(x) => address(*x),
            Live::DataFetcher(x) => {
                return Identity::Behavior(kind, address(*x), x.type_name());
            }
            Live::TypeResolver(x) => {
                return Identity::Behavior(kind, address(*x), x.type_name());
            }
            Live::Schema(x) => address(*x),
        };
        Identity::Live(kind, address)
    }

    fn name(&self) -> Option<&'a str> {
        match self {
            Live::Scalar(x) => Some(x.name),
            Live::Enum(x) => Some(x.name),
            Live::EnumValue(x) => Some(x.name),
            Live::Object(x) => Some(x.name),
            Live::Interface(x) => Some(x.name),
            Live::Union(x) => Some(x.name),
            Live::InputObject(x) => Some(x.name),
            Live::InputField(x) => Some(x.name),
            Live::TypeReference(name) => Some(*name),
            Live::FieldDefinition(x) => Some(x.name),
            Live::Argument(x) => Some(x.name),
            Live::Directive(x) => Some(x.name),
            Live::Schema(x) => Some(x.query_type().name),
            Live::List(_) | Live::NonNull(_) | Live::DataFetcher(_) | Live::TypeResolver(_) => {
                None
            }
        }
    }

    fn description(&self) -> Option<&'a str> {
        match self {
            Live::Scalar(x) => x.description,
            Live::Enum(x) => x.description,
            Live::EnumValue(x) => x.description,
            Live::Object(x) => x.description,
            Live::Interface(x) => x.description,
            Live::Union(x) => x.description,
            Live::InputObject(x) => x.description,
            Live::InputField(x) => x.description,
            Live::FieldDefinition(x) => x.description,
            Live::Argument(x) => x.description,
            Live::Directive(x) => x.description,
            _ => None,
        }
    }
}

impl<'a> From<SchemaType<'a>> for Live<'a> {
    fn from(schema_type: SchemaType<'a>) -> Self {
        match schema_type {
            SchemaType::InputObject(x) => Live::InputObject(x),
            SchemaType::Object(x) => Live::Object(x),
            SchemaType::Union(x) => Live::Union(x),
            SchemaType::Interface(x) => Live::Interface(x),
            SchemaType::Scalar(x) => Live::Scalar(x),
            SchemaType::Enum(x) => Live::Enum(x),
        }
    }
}

/// The key under which a [SchemaContext](super::SchemaContext) caches decorated nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// A live node, by kind and address.
    Live(NodeKind, usize),
    /// A live data fetcher or type resolver, by kind, address and implementing type.
    Behavior(NodeKind, usize, &'static str),
    /// A node of a parsed document, by the address of its JSON value.
    Serialized(usize),
    /// A live node that only exists as a name.
    Named(NodeKind, String),
}

impl Identity {
    #[inline]
    pub fn of_json(json: &Value) -> Self {
        Identity::Serialized(address(json))
    }
}

/// What a [Node] has been decorated from. A node is backed by either a live node or a JSON
/// value, never both.
#[derive(Debug, Clone, Copy)]
pub enum Origin<'a> {
    Live(Live<'a>),
    Serialized(&'a Value),
}

/// The children of a [Node].
///
/// Children are computed after the node itself was registered, so a node's body starts out as
/// [Body::Pending] and is filled exactly once.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Pending,
    Leaf,
    Enum {
        values: Vec<NodeId>,
    },
    Object {
        fields: Vec<NodeId>,
        interfaces: Vec<NodeId>,
    },
    Interface {
        fields: Vec<NodeId>,
        type_resolver: Option<NodeId>,
    },
    Union {
        types: Vec<NodeId>,
        type_resolver: Option<NodeId>,
    },
    InputObject {
        fields: Vec<NodeId>,
    },
    /// The body of arguments and input fields.
    Input {
        input_type: NodeId,
    },
    Wrapper {
        wrapped_type: NodeId,
    },
    Field {
        output_type: NodeId,
        arguments: Vec<NodeId>,
        data_fetcher: Option<NodeId>,
    },
    Directive {
        arguments: Vec<NodeId>,
    },
    Schema {
        query_type: NodeId,
        mutation_type: Option<NodeId>,
        directives: Vec<NodeId>,
        dictionary: Vec<NodeId>,
    },
}

/// A decorated schema node.
///
/// Every attribute accessor dispatches once on the node's [Origin], so a node decorated from a
/// live schema and a node reconstructed from a document expose the same values.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    pub(crate) kind: NodeKind,
    pub(crate) reference: JsonReference,
    pub(crate) parent: Option<NodeId>,
    pub(crate) origin: Origin<'a>,
    pub(crate) id: Option<String>,
    pub(crate) body: Body,
}

#[inline]
fn json_str<'a>(json: &'a Value, key: &str) -> Option<&'a str> {
    json.get(key).and_then(Value::as_str)
}

#[inline]
fn json_value<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    json.get(key).filter(|value| !value.is_null())
}

impl<'a> Node<'a> {
    /// Create an unregistered node. Its reference is assigned when it's registered.
    pub fn new(kind: NodeKind, origin: Origin<'a>, parent: Option<NodeId>) -> Self {
        Node {
            kind,
            reference: JsonReference::root(),
            parent,
            origin,
            id: None,
            body: if kind.is_leaf() {
                Body::Leaf
            } else {
                Body::Pending
            },
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn reference(&self) -> &JsonReference {
        &self.reference
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn origin(&self) -> Origin<'a> {
        self.origin
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Whether this node was reconstructed from a document.
    #[inline]
    pub fn is_serialized(&self) -> bool {
        matches!(self.origin, Origin::Serialized(_))
    }

    /// The generated or stored id of a data fetcher or type resolver.
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The node's name. A schema is named after its query type.
    pub fn name(&self) -> Option<&'a str> {
        match self.origin {
            Origin::Live(live) => live.name(),
            Origin::Serialized(json) if self.kind == NodeKind::Schema => json
                .get(props::QUERY_TYPE)
                .and_then(reference_of)
                .map(target_key),
            Origin::Serialized(json) => json_str(json, props::NAME),
        }
    }

    pub fn description(&self) -> Option<&'a str> {
        match self.origin {
            Origin::Live(live) => live.description(),
            Origin::Serialized(json) => json_str(json, props::DESCRIPTION),
        }
    }

    pub fn deprecation_reason(&self) -> Option<&'a str> {
        match self.origin {
            Origin::Live(Live::FieldDefinition(field)) => field.deprecation_reason,
            Origin::Live(Live::EnumValue(value)) => value.deprecation_reason,
            Origin::Live(_) => None,
            Origin::Serialized(json) => json_str(json, props::DEPRECATION_REASON),
        }
    }

    #[inline]
    pub fn is_deprecated(&self) -> bool {
        matches!(self.deprecation_reason(), Some(reason) if !reason.is_empty())
    }

    /// The default value of an argument or input field.
    pub fn default_value(&self) -> Option<&'a Value> {
        match self.origin {
            Origin::Live(Live::Argument(argument)) => argument.default_value.as_ref(),
            Origin::Live(Live::InputField(field)) => field.default_value.as_ref(),
            Origin::Live(_) => None,
            Origin::Serialized(json) => json_value(json, props::DEFAULT_VALUE),
        }
    }

    /// The runtime value of an enum value.
    pub fn value(&self) -> Option<Value> {
        match self.origin {
            Origin::Live(Live::EnumValue(value)) => Some(value.value.to_json()),
            Origin::Live(_) => None,
            Origin::Serialized(json) => json.get(props::VALUE).cloned(),
        }
    }

    /// The constant value of a data fetcher that always returns the same value.
    pub fn static_value(&self) -> Option<&'a Value> {
        match self.origin {
            Origin::Live(Live::DataFetcher(fetcher)) => fetcher.static_value(),
            Origin::Live(_) => None,
            Origin::Serialized(json) => json.get(props::STATIC_VALUE),
        }
    }

    /// The name of the Rust type implementing a data fetcher or type resolver.
    pub fn type_name(&self) -> Option<&'a str> {
        match self.origin {
            Origin::Live(Live::DataFetcher(fetcher)) => Some(fetcher.type_name()),
            Origin::Live(Live::TypeResolver(resolver)) => Some(resolver.type_name()),
            Origin::Live(_) => None,
            Origin::Serialized(json) => json_str(json, props::MARSHALED_TYPE_CLASS),
        }
    }

    /// The reference to the owner of a data fetcher or type resolver as stored in a document.
    pub fn stored_parent(&self) -> Option<&'a str> {
        match self.origin {
            Origin::Live(_) => None,
            Origin::Serialized(json) => json.get(props::PARENT).and_then(reference_of),
        }
    }

    pub fn is_on_operation(&self) -> bool {
        self.directive_location(|directive| directive.on_operation, props::IS_ON_OPERATION)
    }

    pub fn is_on_fragment(&self) -> bool {
        self.directive_location(|directive| directive.on_fragment, props::IS_ON_FRAGMENT)
    }

    pub fn is_on_field(&self) -> bool {
        self.directive_location(|directive| directive.on_field, props::IS_ON_FIELD)
    }

    fn directive_location(&self, live: fn(&SchemaDirective<'a>) -> bool, key: &str) -> bool {
        match self.origin {
            Origin::Live(Live::Directive(directive)) => live(directive),
            Origin::Live(_) => false,
            Origin::Serialized(json) => json.get(key).and_then(Value::as_bool).unwrap_or(false),
        }
    }
}
