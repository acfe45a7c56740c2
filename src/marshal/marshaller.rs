//! Decoration of live schemas, and serialization of decorated nodes.

use super::context::SchemaContext;
use super::node::{Body, Live, Node, NodeId, NodeKind, Origin};
use crate::error::{Error, Result};
use crate::json::{props, JsonObject, JsonReference};
use crate::schema::{SchemaFields, TypeRef};
use serde_json::Value;
use tracing::trace;

/// Decorates a live node and, depth-first, all of its children.
///
/// The node is registered before any of its children are decorated, and its body is filled in
/// once they are.
pub(crate) fn construct<'a>(
    context: &mut SchemaContext<'a>,
    live: Live<'a>,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let identity = live.identity();
    let node = Node::new(live.kind(), Origin::Live(live), parent);
    match live {
        Live::Scalar(_) => context.register_scalar(node, identity),
        Live::DataFetcher(_) => context.register_data_fetcher(node, identity),
        Live::TypeResolver(_) => context.register_type_resolver(node, identity),
        Live::EnumValue(_) | Live::TypeReference(_) => context.register(node, identity),

        Live::Enum(schema_enum) => {
            let id = context.register(node, identity)?;
            let values = schema_enum
                .get_values()
                .iter()
                .map(|value| context.decorator_of(Live::EnumValue(*value), Some(id)))
                .collect::<Result<_>>()?;
            context.set_body(id, Body::Enum { values })?;
            Ok(id)
        }

        Live::Object(object) => {
            let id = context.register(node, identity)?;
            let fields = object
                .get_fields()
                .iter()
                .map(|field| context.decorator_of(Live::FieldDefinition(*field), Some(id)))
                .collect::<Result<_>>()?;
            let interfaces = object
                .get_interfaces()
                .iter()
                .map(|name| {
                    let interface = context.resolve_name(*name)?;
                    context.decorator_of(interface, None)
                })
                .collect::<Result<_>>()?;
            context.set_body(id, Body::Object { fields, interfaces })?;
            Ok(id)
        }

        Live::Interface(interface) => {
            let id = context.register(node, identity)?;
            let fields = interface
                .get_fields()
                .iter()
                .map(|field| context.decorator_of(Live::FieldDefinition(*field), Some(id)))
                .collect::<Result<_>>()?;
            let type_resolver = interface
                .type_resolver
                .map(|resolver| context.decorator_of(Live::TypeResolver(resolver), Some(id)))
                .transpose()?;
            context.set_body(
                id,
                Body::Interface {
                    fields,
                    type_resolver,
                },
            )?;
            Ok(id)
        }

        Live::Union(schema_union) => {
            let id = context.register(node, identity)?;
            let types = schema_union
                .get_possible_types()
                .iter()
                .map(|name| {
                    let possible_type = context.resolve_name(*name)?;
                    context.decorator_of(possible_type, None)
                })
                .collect::<Result<_>>()?;
            let type_resolver = schema_union
                .type_resolver
                .map(|resolver| context.decorator_of(Live::TypeResolver(resolver), Some(id)))
                .transpose()?;
            context.set_body(
                id,
                Body::Union {
                    types,
                    type_resolver,
                },
            )?;
            Ok(id)
        }

        Live::InputObject(input_object) => {
            let id = context.register(node, identity)?;
            let fields = input_object
                .get_fields()
                .iter()
                .map(|field| context.decorator_of(Live::InputField(*field), Some(id)))
                .collect::<Result<_>>()?;
            context.set_body(id, Body::InputObject { fields })?;
            Ok(id)
        }

        Live::InputField(field) => {
            let id = context.register(node, identity)?;
            let input_type = decorate_type_ref(context, field.input_type, id)?;
            context.set_body(id, Body::Input { input_type })?;
            Ok(id)
        }

        Live::Argument(argument) => {
            let id = context.register(node, identity)?;
            let input_type = decorate_type_ref(context, argument.input_type, id)?;
            context.set_body(id, Body::Input { input_type })?;
            Ok(id)
        }

        Live::List(type_ref) | Live::NonNull(type_ref) => {
            let of_type = match type_ref {
                TypeRef::ListType(of_type) | TypeRef::NonNullType(of_type) => *of_type,
                TypeRef::Type(name) => {
                    return Err(Error::format("Named type can't be used as a modifier", *name))
                }
            };
            let id = context.register(node, identity)?;
            let wrapped_type = decorate_type_ref(context, of_type, id)?;
            context.set_body(id, Body::Wrapper { wrapped_type })?;
            Ok(id)
        }

        Live::FieldDefinition(field) => {
            let id = context.register(node, identity)?;
            let output_type = decorate_type_ref(context, field.output_type, id)?;
            let arguments = field
                .get_arguments()
                .iter()
                .map(|argument| context.decorator_of(Live::Argument(*argument), Some(id)))
                .collect::<Result<_>>()?;
            let data_fetcher = field
                .data_fetcher
                .filter(|fetcher| !fetcher.is_trivial())
                .map(|fetcher| context.decorator_of(Live::DataFetcher(fetcher), Some(id)))
                .transpose()?;
            context.set_body(
                id,
                Body::Field {
                    output_type,
                    arguments,
                    data_fetcher,
                },
            )?;
            Ok(id)
        }

        Live::Directive(directive) => {
            let id = context.register(node, identity)?;
            let arguments = directive
                .get_arguments()
                .iter()
                .map(|argument| context.decorator_of(Live::Argument(*argument), Some(id)))
                .collect::<Result<_>>()?;
            context.set_body(id, Body::Directive { arguments })?;
            Ok(id)
        }

        Live::Schema(schema) => {
            context.set_schema(schema);
            let id = context.register(node, identity)?;
            for schema_type in schema.types() {
                if context.options().includes_type(schema_type.name()) {
                    context.decorator_of(*schema_type, None)?;
                }
            }
            let query_type = context.decorator_of(Live::Object(schema.query_type()), None)?;
            let mutation_type = schema
                .mutation_type()
                .map(|mutation_type| context.decorator_of(Live::Object(mutation_type), None))
                .transpose()?;
            let directives = if context.options().includes_directives() {
                schema
                    .directives()
                    .iter()
                    .map(|directive| context.decorator_of(Live::Directive(*directive), Some(id)))
                    .collect::<Result<_>>()?
            } else {
                Vec::new()
            };
            let dictionary = schema
                .dictionary()
                .iter()
                .map(|schema_type| context.decorator_of(*schema_type, None))
                .collect::<Result<_>>()?;
            context.set_body(
                id,
                Body::Schema {
                    query_type,
                    mutation_type,
                    directives,
                    dictionary,
                },
            )?;
            Ok(id)
        }
    }
}

/// Decorates the type of a field, argument or input field. Named types are shared, while list
/// and non-null modifiers belong to `owner`.
fn decorate_type_ref<'a>(
    context: &mut SchemaContext<'a>,
    type_ref: &'a TypeRef<'a>,
    owner: NodeId,
) -> Result<NodeId> {
    let live = context.resolve_type_ref(type_ref)?;
    context.decorator_of(live, Some(owner))
}

/// Serializes a single decorated node.
///
/// Nodes are serialized from their accessors regardless of their origin, so a reconstructed node
/// serializes exactly like the live node it was marshaled from.
pub(crate) fn to_json(context: &SchemaContext<'_>, id: NodeId) -> Result<Value> {
    let node = context.node(id)?;
    trace!(kind = node.kind.tag(), reference = %node.reference, "marshalling schema node");

    let object = match node.body() {
        Body::Pending => {
            return Err(Error::identity(
                "Node was registered but never decorated",
                node.reference.reference(),
            ))
        }

        Body::Leaf => match node.kind {
            NodeKind::DataFetcher | NodeKind::TypeResolver => behavior_object(context, node)?,
            NodeKind::EnumValue => named_object(node)
                .put_if_present(props::VALUE, node.value())
                .put_if_present(props::DEPRECATION_REASON, node.deprecation_reason()),
            NodeKind::TypeReference => JsonObject::new()
                .put(props::MARSHALED_TYPE, node.kind.tag())
                .put_if_present(props::NAME, node.name()),
            _ => named_object(node),
        },

        Body::Enum { values } => {
            named_object(node).put(props::VALUES, marshall_all(context, values)?)
        }

        Body::Object { fields, interfaces } => named_object(node)
            .put(props::FIELD_DEFINITIONS, marshall_all(context, fields)?)
            .put_list_if_present(props::INTERFACES, reference_list(context, interfaces)?),

        Body::Interface {
            fields,
            type_resolver,
        } => named_object(node)
            .put(props::FIELD_DEFINITIONS, marshall_all(context, fields)?)
            .put_if_present(props::TYPE_RESOLVER, reference_optional(context, *type_resolver)?),

        Body::Union {
            types,
            type_resolver,
        } => named_object(node)
            .put(props::TYPES, reference_list(context, types)?)
            .put_if_present(props::TYPE_RESOLVER, reference_optional(context, *type_resolver)?),

        Body::InputObject { fields } => {
            named_object(node).put(props::FIELDS, marshall_all(context, fields)?)
        }

        Body::Input { input_type } => named_object(node)
            .put(props::TYPE, context.reference_to(*input_type)?)
            .put_if_present(props::DEFAULT_VALUE, node.default_value().cloned()),

        Body::Wrapper { wrapped_type } => JsonObject::new()
            .put(props::MARSHALED_TYPE, node.kind.tag())
            .put(props::WRAPPED_TYPE, context.reference_to(*wrapped_type)?),

        Body::Field {
            output_type,
            arguments,
            data_fetcher,
        } => named_object(node)
            .put(props::TYPE, context.reference_to(*output_type)?)
            .put_if_present(props::DATA_FETCHER, reference_optional(context, *data_fetcher)?)
            .put_list_if_present(props::ARGUMENTS, marshall_list(context, arguments)?)
            .put_if_present(props::DEPRECATION_REASON, node.deprecation_reason()),

        Body::Directive { arguments } => named_object(node)
            .put_list_if_present(props::ARGUMENTS, marshall_list(context, arguments)?)
            .put(props::IS_ON_OPERATION, node.is_on_operation())
            .put(props::IS_ON_FRAGMENT, node.is_on_fragment())
            .put(props::IS_ON_FIELD, node.is_on_field()),

        Body::Schema {
            query_type,
            mutation_type,
            directives,
            dictionary,
        } => JsonObject::new()
            .put(props::MARSHALED_TYPE, node.kind.tag())
            .put(props::QUERY_TYPE, context.reference_to(*query_type)?)
            .put_if_present(props::MUTATION_TYPE, reference_optional(context, *mutation_type)?)
            .put_if(
                props::DIRECTIVES,
                marshall_all(context, directives)?,
                context.options().includes_directives(),
            )
            .put_list_if_present(props::DICTIONARY, reference_list(context, dictionary)?),
    };

    Ok(object.into())
}

/// The common head of named nodes: type tag, name and description.
fn named_object(node: &Node<'_>) -> JsonObject {
    JsonObject::new()
        .put(props::MARSHALED_TYPE, node.kind.tag())
        .put_if_present(props::NAME, node.name())
        .put_if_present(props::DESCRIPTION, node.description())
}

fn behavior_object(context: &SchemaContext<'_>, node: &Node<'_>) -> Result<JsonObject> {
    let tag = match node.static_value() {
        Some(_) if node.kind == NodeKind::DataFetcher => "StaticDataFetcher",
        _ => node.kind.tag(),
    };
    let parent = match node.stored_parent() {
        Some(parent) => Some(parent.to_string()),
        None => match node.parent {
            Some(parent) => Some(context.node(parent)?.reference.reference().to_string()),
            None => None,
        },
    };
    Ok(JsonObject::new()
        .put(props::MARSHALED_TYPE, tag)
        .put_if_present(props::MARSHALED_TYPE_CLASS, node.type_name())
        .put_if_present(props::PARENT, parent.map(|parent| JsonReference::new(parent).to_json()))
        .put_if_present(props::ID, node.id())
        .put_if_present(props::STATIC_VALUE, node.static_value().cloned()))
}

fn marshall_list(context: &SchemaContext<'_>, ids: &[NodeId]) -> Result<Vec<Value>> {
    ids.iter().map(|id| context.marshall(*id)).collect()
}

#[inline]
fn marshall_all(context: &SchemaContext<'_>, ids: &[NodeId]) -> Result<Value> {
    marshall_list(context, ids).map(Value::Array)
}

fn reference_list(context: &SchemaContext<'_>, ids: &[NodeId]) -> Result<Vec<Value>> {
    ids.iter().map(|id| context.reference_to(*id)).collect()
}

fn reference_optional(context: &SchemaContext<'_>, id: Option<NodeId>) -> Result<Option<Value>> {
    id.map(|id| context.reference_to(id)).transpose()
}
