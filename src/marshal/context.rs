use super::node::{Body, Identity, Live, Node, NodeId, NodeKind};
use super::options::MarshalOptions;
use super::{marshaller, unmarshaller};
use crate::error::{Error, Result};
use crate::json::{self, props, JsonReference};
use crate::schema::{builtin_scalar, DataFetcher, Schema, SchemaType, TypeRef, TypeResolver};
use hashbrown::HashMap;
use serde_json::Value;
use tracing::debug;

/// A source that a [SchemaContext] can turn into a decorated node.
///
/// This is implemented for live schema nodes, which are decorated on first use and cached by
/// identity afterwards, and for [NodeId], which is already decorated and returned as is.
pub trait Decorate<'a> {
    fn decorate(self, context: &mut SchemaContext<'a>, parent: Option<NodeId>) -> Result<NodeId>;
}

impl<'a> Decorate<'a> for NodeId {
    #[inline]
    fn decorate(self, context: &mut SchemaContext<'a>, _parent: Option<NodeId>) -> Result<NodeId> {
        context.node(self).map(|_| self)
    }
}

impl<'a> Decorate<'a> for Live<'a> {
    fn decorate(self, context: &mut SchemaContext<'a>, parent: Option<NodeId>) -> Result<NodeId> {
        match context.lookup(&self.identity()) {
            Some(id) => Ok(id),
            None => marshaller::construct(context, self, parent),
        }
    }
}

impl<'a> Decorate<'a> for SchemaType<'a> {
    #[inline]
    fn decorate(self, context: &mut SchemaContext<'a>, parent: Option<NodeId>) -> Result<NodeId> {
        Live::from(self).decorate(context, parent)
    }
}

impl<'a> Decorate<'a> for &'a Schema<'a> {
    #[inline]
    fn decorate(self, context: &mut SchemaContext<'a>, parent: Option<NodeId>) -> Result<NodeId> {
        Live::Schema(self).decorate(context, parent)
    }
}

/// The registry of a single marshal or unmarshal call.
///
/// The context owns every decorated [Node] and caches them by the [Identity] of what they were
/// decorated from, so that any live node or JSON value is only ever decorated once. A node is
/// registered, and receives its [JsonReference], before any of its children are decorated. This
/// is what lets cyclic schemas terminate: a child that refers back to its ancestor finds the
/// ancestor already registered.
///
/// Data fetchers, type resolvers and scalars are additionally tracked in side tables, which make
/// up the `__dataFetchers`, `__typeResolvers` and `__scalarTypes` buckets of a document.
///
/// A context must not be reused across calls.
#[derive(Debug)]
pub struct SchemaContext<'a> {
    options: MarshalOptions,
    document: Option<&'a Value>,
    schema: Option<&'a Schema<'a>>,
    nodes: Vec<Node<'a>>,
    decorated: HashMap<Identity, NodeId>,
    data_fetchers: Vec<NodeId>,
    type_resolvers: Vec<NodeId>,
    scalar_types: Vec<NodeId>,
    attached_fetchers: HashMap<String, &'a dyn DataFetcher>,
    attached_resolvers: HashMap<String, &'a dyn TypeResolver>,
}

impl<'a> SchemaContext<'a> {
    /// Create a context for decorating a live schema.
    pub fn new(options: MarshalOptions) -> Self {
        SchemaContext {
            options,
            document: None,
            schema: None,
            nodes: Vec::new(),
            decorated: HashMap::new(),
            data_fetchers: Vec::new(),
            type_resolvers: Vec::new(),
            scalar_types: Vec::new(),
            attached_fetchers: HashMap::new(),
            attached_resolvers: HashMap::new(),
        }
    }

    /// Create a context for reconstructing nodes from a document. References are resolved
    /// against `document`.
    pub fn for_document(options: MarshalOptions, document: &'a Value) -> Self {
        let mut context = SchemaContext::new(options);
        context.document = Some(document);
        context
    }

    #[inline]
    pub fn options(&self) -> &MarshalOptions {
        &self.options
    }

    #[inline]
    pub fn document(&self) -> Option<&'a Value> {
        self.document
    }

    /// The live schema that named type references are resolved against.
    #[inline]
    pub fn schema(&self) -> Option<&'a Schema<'a>> {
        self.schema
    }

    #[inline]
    pub(crate) fn set_schema(&mut self, schema: &'a Schema<'a>) {
        self.schema = Some(schema);
    }

    /// Returns a registered node.
    pub fn node(&self, id: NodeId) -> Result<&Node<'a>> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| Error::identity("Node was never registered", id.to_string()))
    }

    /// Returns all registered nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<'a>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node that was decorated from the given identity.
    #[inline]
    pub fn lookup(&self, identity: &Identity) -> Option<NodeId> {
        self.decorated.get(identity).copied()
    }

    /// Registers a node under `identity` and assigns its reference.
    pub fn register(&mut self, mut node: Node<'a>, identity: Identity) -> Result<NodeId> {
        node.reference = self.address_of(&node)?;
        let id = NodeId(self.nodes.len());
        debug!(
            kind = node.kind.tag(),
            reference = %node.reference,
            "registered schema node"
        );
        self.nodes.push(node);
        self.decorated.insert(identity, id);
        Ok(id)
    }

    /// Registers a data fetcher unless an equal one is known already, in which case the known
    /// fetcher is returned. Fetchers are equal when they share an id or the same static value.
    pub fn register_data_fetcher(&mut self, mut node: Node<'a>, identity: Identity) -> Result<NodeId> {
        if let Some(existing) = self.find_equal(&self.data_fetchers, &node) {
            debug!(
                reference = %self.nodes[existing.0].reference,
                "deduplicated data fetcher"
            );
            self.decorated.insert(identity, existing);
            return Ok(existing);
        }
        if node.id.is_none() {
            node.id = Some(format!("dataFetcher-{}", self.data_fetchers.len()));
        }
        let id = self.register(node, identity)?;
        self.data_fetchers.push(id);
        Ok(id)
    }

    /// Registers a type resolver unless one with the same id is known already.
    pub fn register_type_resolver(&mut self, mut node: Node<'a>, identity: Identity) -> Result<NodeId> {
        if let Some(existing) = self.find_equal(&self.type_resolvers, &node) {
            debug!(
                reference = %self.nodes[existing.0].reference,
                "deduplicated type resolver"
            );
            self.decorated.insert(identity, existing);
            return Ok(existing);
        }
        if node.id.is_none() {
            node.id = Some(format!("typeResolver-{}", self.type_resolvers.len()));
        }
        let id = self.register(node, identity)?;
        self.type_resolvers.push(id);
        Ok(id)
    }

    /// Registers a scalar. Scalars are keyed by name, and a later scalar of the same name
    /// replaces the earlier one in the `__scalarTypes` bucket.
    pub fn register_scalar(&mut self, node: Node<'a>, identity: Identity) -> Result<NodeId> {
        let name = node.name();
        let id = self.register(node, identity)?;
        let existing = self
            .scalar_types
            .iter()
            .position(|scalar| self.nodes[scalar.0].name() == name);
        match existing {
            Some(index) => {
                debug!(name = ?name, "replaced scalar type of the same name");
                self.scalar_types[index] = id;
            }
            None => self.scalar_types.push(id),
        }
        Ok(id)
    }

    fn find_equal(&self, candidates: &[NodeId], node: &Node<'a>) -> Option<NodeId> {
        candidates.iter().copied().find(|candidate| {
            let other = &self.nodes[candidate.0];
            let same_id = node.id.is_some() && other.id == node.id;
            let same_value = matches!(
                (node.static_value(), other.static_value()),
                (Some(left), Some(right)) if left == right
            );
            same_id || same_value
        })
    }

    /// Fills in the children of a registered node.
    pub(crate) fn set_body(&mut self, id: NodeId, body: Body) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or_else(|| Error::identity("Node was never registered", id.to_string()))?;
        node.body = body;
        Ok(())
    }

    fn address_of(&self, node: &Node<'a>) -> Result<JsonReference> {
        let kind = node.kind;
        let reference = match kind {
            NodeKind::List | NodeKind::NonNull => self
                .parent_reference(node)?
                .child(Some(props::WRAPPED_TYPE), ""),
            NodeKind::DataFetcher => JsonReference::in_bucket(json::FETCHERS_REFERENCE, behavior_id(node)?),
            NodeKind::TypeResolver => JsonReference::in_bucket(json::RESOLVERS_REFERENCE, behavior_id(node)?),
            NodeKind::Scalar => JsonReference::in_bucket(json::SCALARS_REFERENCE, name_of(node)?),
            NodeKind::Interface => JsonReference::in_bucket(json::INTERFACES_REFERENCE, name_of(node)?),
            NodeKind::Enum
            | NodeKind::Object
            | NodeKind::Union
            | NodeKind::InputObject
            | NodeKind::TypeReference => JsonReference::in_bucket(json::TYPES_REFERENCE, name_of(node)?),
            NodeKind::Schema => JsonReference::in_bucket(json::SCHEMAS_REFERENCE, name_of(node)?),
            NodeKind::FieldDefinition => self
                .parent_reference(node)?
                .child(Some(props::FIELD_DEFINITIONS), name_of(node)?),
            NodeKind::Argument => self
                .parent_reference(node)?
                .child(Some(props::ARGUMENTS), name_of(node)?),
            NodeKind::InputField => self
                .parent_reference(node)?
                .child(Some(props::FIELDS), name_of(node)?),
            NodeKind::EnumValue | NodeKind::Directive => {
                self.parent_reference(node)?.child(None, name_of(node)?)
            }
        };
        Ok(reference)
    }

    fn parent_reference(&self, node: &Node<'a>) -> Result<&JsonReference> {
        let parent = node.parent.ok_or_else(|| {
            Error::format(
                format!("{} node must have a parent", node.kind),
                node.name().unwrap_or_else(|| node.kind.tag()),
            )
        })?;
        Ok(&self.node(parent)?.reference)
    }

    /// Decorates `source`, or returns its node if it was decorated before.
    #[inline]
    pub fn decorator_of<D: Decorate<'a>>(&mut self, source: D, parent: Option<NodeId>) -> Result<NodeId> {
        source.decorate(self, parent)
    }

    /// Resolves a type name against the live schema. Unknown names become type references.
    ///
    /// Introspection types that the options exclude can't be referenced, since the document
    /// wouldn't contain them.
    pub(crate) fn resolve_name(&self, name: &'a str) -> Result<Live<'a>> {
        if !self.options.includes_type(name) {
            return Err(Error::format(
                format!("Introspection type `{}` is excluded from the document", name),
                name,
            ));
        }
        let schema_type = match self.schema {
            Some(schema) => schema.get_type(name),
            None => builtin_scalar(name).map(SchemaType::Scalar),
        };
        Ok(schema_type.map_or(Live::TypeReference(name), Live::from))
    }

    pub(crate) fn resolve_type_ref(&self, type_ref: &'a TypeRef<'a>) -> Result<Live<'a>> {
        match *type_ref {
            TypeRef::Type(name) => self.resolve_name(name),
            TypeRef::ListType(_) => Ok(Live::List(type_ref)),
            TypeRef::NonNullType(_) => Ok(Live::NonNull(type_ref)),
        }
    }

    /// Returns how a node is referenced from another node: lists and non-null modifiers are
    /// marshaled inline, every other node is referenced as `{"$ref": ...}`.
    pub fn reference_to(&self, id: NodeId) -> Result<Value> {
        let node = self.node(id)?;
        if node.kind.is_inline() {
            self.marshall(id)
        } else {
            Ok(node.reference.to_json())
        }
    }

    /// Marshals a single node. A schema node is marshaled as its `__schemas` entry.
    #[inline]
    pub fn marshall(&self, id: NodeId) -> Result<Value> {
        marshaller::to_json(self, id)
    }

    /// Returns the node of a JSON value that was unmarshaled before, or follows a
    /// `{"$ref": ...}` value to the node it references. Returns `None` for any other value.
    pub fn dereference(&mut self, json: &'a Value, parent: Option<NodeId>) -> Result<Option<NodeId>> {
        if let Some(id) = self.lookup(&Identity::of_json(json)) {
            return Ok(Some(id));
        }
        let reference = match JsonReference::from_json(json) {
            Some(reference) => reference,
            None => return Ok(None),
        };
        let document = self.document.ok_or_else(|| {
            Error::identity("No document to resolve references against", reference.reference())
        })?;
        let target = reference
            .resolve(document)
            .ok_or_else(|| Error::format("Failed to resolve reference", reference.reference()))?;
        if json::reference_of(target).is_some() {
            return Err(Error::format(
                "Reference resolves to another reference",
                reference.reference(),
            ));
        }
        debug!(reference = %reference, "dereferenced schema node");
        self.unmarshall(target, parent).map(Some)
    }

    /// Reconstructs the node of a JSON value, following references.
    pub fn unmarshall(&mut self, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
        match self.dereference(json, parent)? {
            Some(id) => Ok(id),
            None => unmarshaller::construct(self, json, parent),
        }
    }

    /// Reconstructs the nodes listed under `key`, which may either be an array of nodes or an
    /// object of nodes keyed by name. A missing list is empty.
    pub fn unmarshall_list(
        &mut self,
        json: &'a Value,
        key: &str,
        parent: Option<NodeId>,
    ) -> Result<Vec<NodeId>> {
        match json.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(list)) => list
                .iter()
                .map(|element| self.unmarshall(element, parent))
                .collect(),
            Some(Value::Object(map)) => map
                .values()
                .map(|element| self.unmarshall(element, parent))
                .collect(),
            Some(_) => Err(Error::format(
                format!("Failed to unmarshall `{}` to a list", key),
                key,
            )),
        }
    }

    /// Fails unless the node is of the `expected` kind.
    pub(crate) fn expect(&self, id: NodeId, expected: NodeKind) -> Result<NodeId> {
        let node = self.node(id)?;
        if node.kind == expected {
            Ok(id)
        } else {
            Err(Error::format(
                format!("Expected {}, found {}", expected, node.kind),
                node.reference.reference(),
            ))
        }
    }

    /// Fails unless the node may be used as the type of a field, argument or input field.
    pub(crate) fn expect_type(&self, id: NodeId) -> Result<NodeId> {
        let node = self.node(id)?;
        if node.kind.is_type() {
            Ok(id)
        } else {
            Err(Error::format(
                format!("Expected a type, found {}", node.kind),
                node.reference.reference(),
            ))
        }
    }

    /// The registered data fetchers in registration order.
    #[inline]
    pub fn data_fetchers(&self) -> &[NodeId] {
        &self.data_fetchers
    }

    /// The registered type resolvers in registration order.
    #[inline]
    pub fn type_resolvers(&self) -> &[NodeId] {
        &self.type_resolvers
    }

    /// The registered scalars, one per name.
    #[inline]
    pub fn scalar_types(&self) -> &[NodeId] {
        &self.scalar_types
    }

    /// All registered nodes that belong into the `__types` or `__interfaces` buckets.
    pub fn named_types(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.kind.is_schema_type())
            .map(|(id, _)| id)
            .collect()
    }

    /// Attaches behavior to the reconstructed data fetcher with the given id.
    pub fn attach_data_fetcher<S: Into<String>>(&mut self, id: S, fetcher: &'a dyn DataFetcher) {
        self.attached_fetchers.insert(id.into(), fetcher);
    }

    /// Attaches behavior to the reconstructed type resolver with the given id.
    pub fn attach_type_resolver<S: Into<String>>(&mut self, id: S, resolver: &'a dyn TypeResolver) {
        self.attached_resolvers.insert(id.into(), resolver);
    }

    #[inline]
    pub fn attached_data_fetcher(&self, id: &str) -> Option<&'a dyn DataFetcher> {
        self.attached_fetchers.get(id).copied()
    }

    #[inline]
    pub fn attached_type_resolver(&self, id: &str) -> Option<&'a dyn TypeResolver> {
        self.attached_resolvers.get(id).copied()
    }
}

fn name_of<'a>(node: &Node<'a>) -> Result<&'a str> {
    node.name().ok_or_else(|| {
        Error::format(
            format!("{} node has no name", node.kind),
            node.kind.tag(),
        )
    })
}

fn behavior_id<'n>(node: &'n Node<'_>) -> Result<&'n str> {
    node.id().ok_or_else(|| {
        Error::format(format!("{} node has no id", node.kind), node.kind.tag())
    })
}
