//! Typed read views onto decorated nodes.
//!
//! A view borrows its [SchemaContext] and exposes the same read API for a node regardless of
//! whether it was decorated from a live schema or reconstructed from a document. Lists of
//! children are read from the node's body, and named lookups that find nothing fail with an
//! [ErrorType::UnknownType](crate::error::ErrorType::UnknownType) error. A child of the wrong
//! kind fails the whole accessor with an [ErrorType::Format](crate::error::ErrorType::Format)
//! error.

use super::context::SchemaContext;
use super::node::{Body, Live, Node, NodeId, NodeKind, Origin};
use crate::error::{Error, Result};
use crate::json::JsonReference;
use serde_json::{Map, Value};
use std::fmt;

/// Trait implemented by all typed views onto a decorated node.
pub trait Decorated<'c, 'a: 'c>: Sized {
    /// The node kinds this view may be cast from.
    const KINDS: &'static [NodeKind];

    #[doc(hidden)]
    fn from_parts(context: &'c SchemaContext<'a>, id: NodeId, node: &'c Node<'a>) -> Self;

    fn context(&self) -> &'c SchemaContext<'a>;

    fn node_id(&self) -> NodeId;

    fn node(&self) -> &'c Node<'a>;

    /// Creates a view onto a registered node, failing if the node is of the wrong kind.
    fn cast(context: &'c SchemaContext<'a>, id: NodeId) -> Result<Self> {
        let node = context.node(id)?;
        if Self::KINDS.contains(&node.kind()) {
            Ok(Self::from_parts(context, id, node))
        } else {
            Err(Error::format(
                format!("Expected {}, found {}", Self::KINDS[0], node.kind()),
                node.reference().reference(),
            ))
        }
    }

    /// The node's name, which is empty for list and non-null modifiers.
    #[inline]
    fn name(&self) -> &'a str {
        self.node().name().unwrap_or_default()
    }

    #[inline]
    fn description(&self) -> Option<&'a str> {
        self.node().description()
    }

    #[inline]
    fn reference(&self) -> &'c JsonReference {
        self.node().reference()
    }

    /// Marshals the node. A schema is marshaled as its `__schemas` entry.
    #[inline]
    fn to_json(&self) -> Result<Value> {
        self.context().marshall(self.node_id())
    }
}

macro_rules! decorated_views {
    ($($(#[$meta:meta])* $view:ident => [$($kind:ident),+];)+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy)]
            pub struct $view<'c, 'a> {
                context: &'c SchemaContext<'a>,
                id: NodeId,
                node: &'c Node<'a>,
            }

            impl<'c, 'a: 'c> Decorated<'c, 'a> for $view<'c, 'a> {
                const KINDS: &'static [NodeKind] = &[$(NodeKind::$kind),+];

                #[inline]
                fn from_parts(context: &'c SchemaContext<'a>, id: NodeId, node: &'c Node<'a>) -> Self {
                    $view { context, id, node }
                }

                #[inline]
                fn context(&self) -> &'c SchemaContext<'a> {
                    self.context
                }

                #[inline]
                fn node_id(&self) -> NodeId {
                    self.id
                }

                #[inline]
                fn node(&self) -> &'c Node<'a> {
                    self.node
                }
            }

            impl<'c, 'a> fmt::Debug for $view<'c, 'a> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($view))
                        .field(&self.node.reference())
                        .finish()
                }
            }

            /// Views are equal when they view the same node of the same context.
            impl<'c, 'a> PartialEq for $view<'c, 'a> {
                fn eq(&self, other: &Self) -> bool {
                    std::ptr::eq(self.context, other.context) && self.id == other.id
                }
            }
        )+
    };
}

decorated_views! {
    /// The root of a decorated schema.
    DecoratedSchema => [Schema];
    DecoratedScalar => [Scalar];
    DecoratedObject => [Object];
    DecoratedInterface => [Interface];
    DecoratedUnion => [Union];
    DecoratedEnum => [Enum];
    DecoratedEnumValue => [EnumValue];
    DecoratedInputObject => [InputObject];
    DecoratedInputField => [InputField];
    DecoratedList => [List];
    DecoratedNonNull => [NonNull];
    /// A named type that was referenced but never defined.
    DecoratedTypeReference => [TypeReference];
    DecoratedField => [FieldDefinition];
    DecoratedArgument => [Argument];
    DecoratedDirective => [Directive];
    DecoratedDataFetcher => [DataFetcher];
    DecoratedTypeResolver => [TypeResolver];
}

fn views<'c, 'a: 'c, T: Decorated<'c, 'a>>(context: &'c SchemaContext<'a>, ids: &[NodeId]) -> Result<Vec<T>> {
    ids.iter().map(|id| T::cast(context, *id)).collect()
}

fn type_views<'c, 'a: 'c>(context: &'c SchemaContext<'a>, ids: &[NodeId]) -> Result<Vec<DecoratedType<'c, 'a>>> {
    ids.iter().map(|id| DecoratedType::of(context, *id)).collect()
}

fn find_named<'c, 'a: 'c, T: Decorated<'c, 'a>>(
    views: Result<Vec<T>>,
    name: &str,
    owner: &JsonReference,
) -> Result<T> {
    views?
        .into_iter()
        .find(|view| view.name() == name)
        .ok_or_else(|| {
            Error::unknown_type(
                format!("Unknown {} `{}`", T::KINDS[0], name),
                owner.reference(),
            )
        })
}

fn pending(node: &Node<'_>) -> Error {
    Error::identity(
        "Node was registered but never decorated",
        node.reference().reference(),
    )
}

impl<'c, 'a: 'c> DecoratedSchema<'c, 'a> {
    pub fn query_type(&self) -> Result<DecoratedObject<'c, 'a>> {
        match self.node.body() {
            Body::Schema { query_type, .. } => DecoratedObject::cast(self.context, *query_type),
            _ => Err(pending(self.node)),
        }
    }

    pub fn mutation_type(&self) -> Result<Option<DecoratedObject<'c, 'a>>> {
        match self.node.body() {
            Body::Schema { mutation_type, .. } => mutation_type
                .map(|mutation_type| DecoratedObject::cast(self.context, mutation_type))
                .transpose(),
            _ => Err(pending(self.node)),
        }
    }

    #[inline]
    pub fn is_supporting_mutations(&self) -> bool {
        matches!(
            self.node.body(),
            Body::Schema {
                mutation_type: Some(_),
                ..
            }
        )
    }

    /// The schema's directives, which are only decorated when directives are included.
    pub fn directives(&self) -> Result<Vec<DecoratedDirective<'c, 'a>>> {
        match self.node.body() {
            Body::Schema { directives, .. } => views(self.context, directives),
            _ => Err(pending(self.node)),
        }
    }

    pub fn directive(&self, name: &str) -> Result<DecoratedDirective<'c, 'a>> {
        find_named(self.directives(), name, self.reference())
    }

    /// Types that were added to the schema without being reachable from its root types.
    pub fn dictionary(&self) -> Result<Vec<DecoratedType<'c, 'a>>> {
        match self.node.body() {
            Body::Schema { dictionary, .. } => type_views(self.context, dictionary),
            _ => Err(pending(self.node)),
        }
    }

    /// All named types of the schema, scalars included.
    pub fn all_types(&self) -> Result<Vec<DecoratedType<'c, 'a>>> {
        let mut ids = self.context.named_types();
        ids.extend_from_slice(self.context.scalar_types());
        type_views(self.context, &ids)
    }

    /// Retrieves a named type by name.
    pub fn get_type(&self, name: &str) -> Result<DecoratedType<'c, 'a>> {
        self.all_types()?
            .into_iter()
            .find(|schema_type| schema_type.name() == Some(name))
            .ok_or_else(|| {
                Error::unknown_type(format!("Unknown type `{}`", name), self.reference().reference())
            })
    }
}

/// Shared accessors of views onto types that define fields.
pub trait DecoratedFields<'c, 'a: 'c>: Decorated<'c, 'a> {
    fn field_definitions(&self) -> Result<Vec<DecoratedField<'c, 'a>>> {
        match self.node().body() {
            Body::Object { fields, .. } | Body::Interface { fields, .. } => {
                views(self.context(), fields)
            }
            _ => Err(pending(self.node())),
        }
    }

    fn field_definition(&self, name: &str) -> Result<DecoratedField<'c, 'a>> {
        find_named(self.field_definitions(), name, self.reference())
    }
}

impl<'c, 'a: 'c> DecoratedFields<'c, 'a> for DecoratedObject<'c, 'a> {}
impl<'c, 'a: 'c> DecoratedFields<'c, 'a> for DecoratedInterface<'c, 'a> {}

impl<'c, 'a: 'c> DecoratedObject<'c, 'a> {
    /// The implemented interfaces. An interface that was never defined is a type reference.
    pub fn interfaces(&self) -> Result<Vec<DecoratedType<'c, 'a>>> {
        match self.node.body() {
            Body::Object { interfaces, .. } => type_views(self.context, interfaces),
            _ => Err(pending(self.node)),
        }
    }
}

impl<'c, 'a: 'c> DecoratedInterface<'c, 'a> {
    pub fn type_resolver(&self) -> Result<Option<DecoratedTypeResolver<'c, 'a>>> {
        match self.node.body() {
            Body::Interface { type_resolver, .. } => type_resolver
                .map(|id| DecoratedTypeResolver::cast(self.context, id))
                .transpose(),
            _ => Err(pending(self.node)),
        }
    }
}

impl<'c, 'a: 'c> DecoratedUnion<'c, 'a> {
    pub fn types(&self) -> Result<Vec<DecoratedType<'c, 'a>>> {
        match self.node.body() {
            Body::Union { types, .. } => type_views(self.context, types),
            _ => Err(pending(self.node)),
        }
    }

    pub fn type_resolver(&self) -> Result<Option<DecoratedTypeResolver<'c, 'a>>> {
        match self.node.body() {
            Body::Union { type_resolver, .. } => type_resolver
                .map(|id| DecoratedTypeResolver::cast(self.context, id))
                .transpose(),
            _ => Err(pending(self.node)),
        }
    }
}

impl<'c, 'a: 'c> DecoratedEnum<'c, 'a> {
    pub fn values(&self) -> Result<Vec<DecoratedEnumValue<'c, 'a>>> {
        match self.node.body() {
            Body::Enum { values } => views(self.context, values),
            _ => Err(pending(self.node)),
        }
    }

    pub fn value(&self, name: &str) -> Result<DecoratedEnumValue<'c, 'a>> {
        find_named(self.values(), name, self.reference())
    }
}

impl<'c, 'a: 'c> DecoratedEnumValue<'c, 'a> {
    /// The runtime value this enum value stands for.
    #[inline]
    pub fn value(&self) -> Option<Value> {
        self.node.value()
    }

    #[inline]
    pub fn deprecation_reason(&self) -> Option<&'a str> {
        self.node.deprecation_reason()
    }

    #[inline]
    pub fn is_deprecated(&self) -> bool {
        self.node.is_deprecated()
    }
}

impl<'c, 'a: 'c> DecoratedInputObject<'c, 'a> {
    pub fn fields(&self) -> Result<Vec<DecoratedInputField<'c, 'a>>> {
        match self.node.body() {
            Body::InputObject { fields } => views(self.context, fields),
            _ => Err(pending(self.node)),
        }
    }

    pub fn field(&self, name: &str) -> Result<DecoratedInputField<'c, 'a>> {
        find_named(self.fields(), name, self.reference())
    }
}

fn input_type<'c, 'a: 'c>(context: &'c SchemaContext<'a>, node: &'c Node<'a>) -> Result<DecoratedType<'c, 'a>> {
    match node.body() {
        Body::Input { input_type } => DecoratedType::of(context, *input_type),
        _ => Err(pending(node)),
    }
}

impl<'c, 'a: 'c> DecoratedInputField<'c, 'a> {
    #[inline]
    pub fn input_type(&self) -> Result<DecoratedType<'c, 'a>> {
        input_type(self.context, self.node)
    }

    #[inline]
    pub fn default_value(&self) -> Option<&'a Value> {
        self.node.default_value()
    }
}

impl<'c, 'a: 'c> DecoratedArgument<'c, 'a> {
    #[inline]
    pub fn input_type(&self) -> Result<DecoratedType<'c, 'a>> {
        input_type(self.context, self.node)
    }

    #[inline]
    pub fn default_value(&self) -> Option<&'a Value> {
        self.node.default_value()
    }
}

fn wrapped_type<'c, 'a: 'c>(context: &'c SchemaContext<'a>, node: &'c Node<'a>) -> Result<DecoratedType<'c, 'a>> {
    match node.body() {
        Body::Wrapper { wrapped_type } => DecoratedType::of(context, *wrapped_type),
        _ => Err(pending(node)),
    }
}

impl<'c, 'a: 'c> DecoratedList<'c, 'a> {
    #[inline]
    pub fn wrapped_type(&self) -> Result<DecoratedType<'c, 'a>> {
        wrapped_type(self.context, self.node)
    }
}

impl<'c, 'a: 'c> DecoratedNonNull<'c, 'a> {
    #[inline]
    pub fn wrapped_type(&self) -> Result<DecoratedType<'c, 'a>> {
        wrapped_type(self.context, self.node)
    }
}

impl<'c, 'a: 'c> DecoratedField<'c, 'a> {
    pub fn output_type(&self) -> Result<DecoratedType<'c, 'a>> {
        match self.node.body() {
            Body::Field { output_type, .. } => DecoratedType::of(self.context, *output_type),
            _ => Err(pending(self.node)),
        }
    }

    pub fn arguments(&self) -> Result<Vec<DecoratedArgument<'c, 'a>>> {
        match self.node.body() {
            Body::Field { arguments, .. } => views(self.context, arguments),
            _ => Err(pending(self.node)),
        }
    }

    pub fn argument(&self, name: &str) -> Result<DecoratedArgument<'c, 'a>> {
        find_named(self.arguments(), name, self.reference())
    }

    /// The field's data fetcher, unless it reads the field's property off its parent value.
    pub fn data_fetcher(&self) -> Result<Option<DecoratedDataFetcher<'c, 'a>>> {
        match self.node.body() {
            Body::Field { data_fetcher, .. } => data_fetcher
                .map(|id| DecoratedDataFetcher::cast(self.context, id))
                .transpose(),
            _ => Err(pending(self.node)),
        }
    }

    #[inline]
    pub fn deprecation_reason(&self) -> Option<&'a str> {
        self.node.deprecation_reason()
    }

    #[inline]
    pub fn is_deprecated(&self) -> bool {
        self.node.is_deprecated()
    }
}

impl<'c, 'a: 'c> DecoratedDirective<'c, 'a> {
    pub fn arguments(&self) -> Result<Vec<DecoratedArgument<'c, 'a>>> {
        match self.node.body() {
            Body::Directive { arguments } => views(self.context, arguments),
            _ => Err(pending(self.node)),
        }
    }

    pub fn argument(&self, name: &str) -> Result<DecoratedArgument<'c, 'a>> {
        find_named(self.arguments(), name, self.reference())
    }

    #[inline]
    pub fn is_on_operation(&self) -> bool {
        self.node.is_on_operation()
    }

    #[inline]
    pub fn is_on_fragment(&self) -> bool {
        self.node.is_on_fragment()
    }

    #[inline]
    pub fn is_on_field(&self) -> bool {
        self.node.is_on_field()
    }
}

impl<'c, 'a: 'c> DecoratedDataFetcher<'c, 'a> {
    /// The fetcher's id, which is its key in the `__dataFetchers` bucket.
    #[inline]
    pub fn id(&self) -> &'c str {
        self.node.id().unwrap_or_default()
    }

    #[inline]
    pub fn static_value(&self) -> Option<&'a Value> {
        self.node.static_value()
    }

    /// The name of the Rust type that implemented the fetcher when it was marshaled.
    #[inline]
    pub fn type_name(&self) -> Option<&'a str> {
        self.node.type_name()
    }

    /// Runs the fetcher.
    ///
    /// A reconstructed fetcher runs the behavior attached to its id, if any, and otherwise
    /// returns its static value or `null`.
    pub fn fetch(&self, source: &Value, arguments: &Map<String, Value>) -> Value {
        if let Origin::Live(Live::DataFetcher(fetcher)) = self.node.origin() {
            return fetcher.fetch(source, arguments);
        }
        match self.context.attached_data_fetcher(self.id()) {
            Some(fetcher) => fetcher.fetch(source, arguments),
            None => self.static_value().cloned().unwrap_or(Value::Null),
        }
    }
}

impl<'c, 'a: 'c> DecoratedTypeResolver<'c, 'a> {
    /// The resolver's id, which is its key in the `__typeResolvers` bucket.
    #[inline]
    pub fn id(&self) -> &'c str {
        self.node.id().unwrap_or_default()
    }

    #[inline]
    pub fn type_name(&self) -> Option<&'a str> {
        self.node.type_name()
    }

    /// Runs the resolver. A reconstructed resolver only resolves types when behavior was attached
    /// to its id.
    pub fn resolve_type(&self, value: &Value) -> Option<String> {
        if let Origin::Live(Live::TypeResolver(resolver)) = self.node.origin() {
            return resolver.resolve_type(value);
        }
        self.context
            .attached_type_resolver(self.id())
            .and_then(|resolver| resolver.resolve_type(value))
    }
}

/// A view onto any node that may be used as a type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoratedType<'c, 'a> {
    Scalar(DecoratedScalar<'c, 'a>),
    Object(DecoratedObject<'c, 'a>),
    Interface(DecoratedInterface<'c, 'a>),
    Union(DecoratedUnion<'c, 'a>),
    Enum(DecoratedEnum<'c, 'a>),
    InputObject(DecoratedInputObject<'c, 'a>),
    List(DecoratedList<'c, 'a>),
    NonNull(DecoratedNonNull<'c, 'a>),
    TypeReference(DecoratedTypeReference<'c, 'a>),
}

impl<'c, 'a: 'c> DecoratedType<'c, 'a> {
    /// Creates a view onto a registered type node.
    pub fn of(context: &'c SchemaContext<'a>, id: NodeId) -> Result<Self> {
        let node = context.node(id)?;
        Ok(match node.kind() {
            NodeKind::Scalar => DecoratedType::Scalar(DecoratedScalar::from_parts(context, id, node)),
            NodeKind::Object => DecoratedType::Object(DecoratedObject::from_parts(context, id, node)),
            NodeKind::Interface => {
                DecoratedType::Interface(DecoratedInterface::from_parts(context, id, node))
            }
            NodeKind::Union => DecoratedType::Union(DecoratedUnion::from_parts(context, id, node)),
            NodeKind::Enum => DecoratedType::Enum(DecoratedEnum::from_parts(context, id, node)),
            NodeKind::InputObject => {
                DecoratedType::InputObject(DecoratedInputObject::from_parts(context, id, node))
            }
            NodeKind::List => DecoratedType::List(DecoratedList::from_parts(context, id, node)),
            NodeKind::NonNull => DecoratedType::NonNull(DecoratedNonNull::from_parts(context, id, node)),
            NodeKind::TypeReference => {
                DecoratedType::TypeReference(DecoratedTypeReference::from_parts(context, id, node))
            }
            kind => {
                return Err(Error::format(
                    format!("Expected a type, found {}", kind),
                    node.reference().reference(),
                ))
            }
        })
    }

    pub fn node(&self) -> &'c Node<'a> {
        match self {
            DecoratedType::Scalar(x) => x.node(),
            DecoratedType::Object(x) => x.node(),
            DecoratedType::Interface(x) => x.node(),
            DecoratedType::Union(x) => x.node(),
            DecoratedType::Enum(x) => x.node(),
            DecoratedType::InputObject(x) => x.node(),
            DecoratedType::List(x) => x.node(),
            DecoratedType::NonNull(x) => x.node(),
            DecoratedType::TypeReference(x) => x.node(),
        }
    }

    pub fn node_id(&self) -> NodeId {
        match self {
            DecoratedType::Scalar(x) => x.node_id(),
            DecoratedType::Object(x) => x.node_id(),
            DecoratedType::Interface(x) => x.node_id(),
            DecoratedType::Union(x) => x.node_id(),
            DecoratedType::Enum(x) => x.node_id(),
            DecoratedType::InputObject(x) => x.node_id(),
            DecoratedType::List(x) => x.node_id(),
            DecoratedType::NonNull(x) => x.node_id(),
            DecoratedType::TypeReference(x) => x.node_id(),
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.node().kind()
    }

    /// The type's name. List and non-null modifiers have no name.
    #[inline]
    pub fn name(&self) -> Option<&'a str> {
        self.node().name()
    }

    #[inline]
    pub fn description(&self) -> Option<&'a str> {
        self.node().description()
    }

    #[inline]
    pub fn reference(&self) -> &'c JsonReference {
        self.node().reference()
    }

    /// Returns the innermost named type of list and non-null modifiers.
    pub fn named_type(&self) -> Result<DecoratedType<'c, 'a>> {
        let mut current = *self;
        loop {
            current = match current {
                DecoratedType::List(list) => list.wrapped_type()?,
                DecoratedType::NonNull(non_null) => non_null.wrapped_type()?,
                named => return Ok(named),
            };
        }
    }

    /// Marshals the type. Named types are marshaled in full, not as references.
    pub fn to_json(&self) -> Result<Value> {
        match self {
            DecoratedType::Scalar(x) => x.to_json(),
            DecoratedType::Object(x) => x.to_json(),
            DecoratedType::Interface(x) => x.to_json(),
            DecoratedType::Union(x) => x.to_json(),
            DecoratedType::Enum(x) => x.to_json(),
            DecoratedType::InputObject(x) => x.to_json(),
            DecoratedType::List(x) => x.to_json(),
            DecoratedType::NonNull(x) => x.to_json(),
            DecoratedType::TypeReference(x) => x.to_json(),
        }
    }

    pub fn object(&self) -> Option<DecoratedObject<'c, 'a>> {
        match self {
            DecoratedType::Object(x) => Some(*x),
            _ => None,
        }
    }

    pub fn interface(&self) -> Option<DecoratedInterface<'c, 'a>> {
        match self {
            DecoratedType::Interface(x) => Some(*x),
            _ => None,
        }
    }

    pub fn union_type(&self) -> Option<DecoratedUnion<'c, 'a>> {
        match self {
            DecoratedType::Union(x) => Some(*x),
            _ => None,
        }
    }

    pub fn enum_type(&self) -> Option<DecoratedEnum<'c, 'a>> {
        match self {
            DecoratedType::Enum(x) => Some(*x),
            _ => None,
        }
    }

    pub fn input_object(&self) -> Option<DecoratedInputObject<'c, 'a>> {
        match self {
            DecoratedType::InputObject(x) => Some(*x),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<DecoratedScalar<'c, 'a>> {
        match self {
            DecoratedType::Scalar(x) => Some(*x),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::marshal::{Identity, MarshalOptions};
    use crate::schema::*;
    use serde_json::json;

    #[test]
    fn views_of_a_live_schema() {
        let arena = SchemaArena::new();
        let mut character = SchemaInterface::new(&arena, "Character");
        character.add_field(
            &arena,
            SchemaField::new(&arena, "name", TypeRef::named(&arena, "String")),
        );
        character.type_resolver = Some(arena.alloc(TypenameResolver));
        let character = arena.alloc(character);

        let mut droid = SchemaObject::new(&arena, "Droid");
        droid.add_interface("Character");
        let mut friends = SchemaField::new(
            &arena,
            "friends",
            TypeRef::non_null(&arena, TypeRef::list(&arena, TypeRef::named(&arena, "Character"))),
        );
        friends.add_argument(&arena, SchemaArgument::new("first", TypeRef::named(&arena, "Int")));
        droid.add_field(&arena, friends);
        let droid = arena.alloc(droid);

        let mut query = SchemaObject::new(&arena, "Query");
        query.add_field(&arena, SchemaField::new(&arena, "droid", TypeRef::named(&arena, "Droid")));
        let query = arena.alloc(query);

        let mut schema = Schema::new(&arena, query);
        schema.add_type(character.into());
        schema.add_type(droid.into());
        let schema = arena.alloc(schema);

        let mut context = SchemaContext::new(MarshalOptions::new());
        let id = context.decorator_of(schema, None).unwrap();
        let schema = DecoratedSchema::cast(&context, id).unwrap();

        let droid = schema.get_type("Droid").unwrap().object().unwrap();
        assert_eq!(droid.interfaces().unwrap()[0].name(), Some("Character"));

        let friends = droid.field_definition("friends").unwrap();
        assert_eq!(friends.argument("first").unwrap().name(), "first");
        let output_type = friends.output_type().unwrap();
        assert_eq!(output_type.kind(), NodeKind::NonNull);
        assert_eq!(output_type.name(), None);
        assert_eq!(
            output_type.reference().reference(),
            "#/__types/Droid/fieldDefinitions/friends/wrappedType/"
        );
        let character = output_type.named_type().unwrap().interface().unwrap();
        assert_eq!(character.field_definitions().unwrap().len(), 1);
        assert_eq!(
            character.type_resolver().unwrap().unwrap().resolve_type(&json!({ "__typename": "Droid" })),
            Some("Droid".to_string())
        );

        let error = droid.field_definition("enemies").unwrap_err();
        assert_eq!(error.error_type(), ErrorType::UnknownType);
        assert!(schema.get_type("Starship").is_err());
    }

    #[test]
    fn reconstructed_fetchers_use_attached_behavior() {
        let document = json!({
            "__dataFetchers": {
                "dataFetcher-0": {
                    "__marshaled": "StaticDataFetcher",
                    "id": "dataFetcher-0",
                    "staticValue": "world"
                },
                "dataFetcher-1": {
                    "__marshaled": "DataFetcher",
                    "id": "dataFetcher-1"
                }
            }
        });
        let property = PropertyDataFetcher::new("name");
        let mut context = SchemaContext::for_document(MarshalOptions::new(), &document);
        context.attach_data_fetcher("dataFetcher-1", &property);

        let fetchers = context
            .unmarshall_list(&document, "__dataFetchers", None)
            .unwrap();
        let world = DecoratedDataFetcher::cast(&context, fetchers[0]).unwrap();
        let name = DecoratedDataFetcher::cast(&context, fetchers[1]).unwrap();
        let source = json!({ "name": "R2-D2" });

        assert_eq!(world.id(), "dataFetcher-0");
        assert_eq!(world.fetch(&source, &Map::new()), json!("world"));
        assert_eq!(name.fetch(&source, &Map::new()), json!("R2-D2"));
        assert!(DecoratedObject::cast(&context, fetchers[0]).is_err());
    }

    #[test]
    fn children_of_the_wrong_kind_fail_the_accessor() {
        let query = json!({ "__marshaled": "Object", "name": "Query" });
        let string = json!({ "__marshaled": "Scalar", "name": "String" });
        let mut context = SchemaContext::new(MarshalOptions::new());
        let object = context
            .register(
                Node::new(NodeKind::Object, Origin::Serialized(&query), None),
                Identity::of_json(&query),
            )
            .unwrap();
        let scalar = context
            .register_scalar(
                Node::new(NodeKind::Scalar, Origin::Serialized(&string), None),
                Identity::of_json(&string),
            )
            .unwrap();
        context
            .set_body(
                object,
                Body::Object {
                    fields: vec![scalar],
                    interfaces: vec![scalar],
                },
            )
            .unwrap();

        let object = DecoratedObject::cast(&context, object).unwrap();
        let error = object.field_definitions().unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Format);
        assert_eq!(error.context(), Some("#/__scalarTypes/String"));
        assert_eq!(
            object.field_definition("name").unwrap_err().error_type(),
            ErrorType::Format
        );
        assert_eq!(object.interfaces().unwrap()[0].kind(), NodeKind::Scalar);
    }
}
