//! Reconstruction of decorated nodes from marshaled documents.
//!
//! Every JSON node carries a type tag under `__marshaled`, which selects the constructor that
//! reconstructs it. The set of tags is closed, except for data fetchers and type resolvers, which
//! are recognized by their `id` when their tag is unknown.

use super::context::SchemaContext;
use super::node::{Body, Identity, Node, NodeId, NodeKind, Origin};
use crate::error::{Error, Result};
use crate::json::{props, SCHEMAS_REFERENCE};
use serde_json::Value;
use tracing::trace;

/// Reconstructs a node from its JSON value, which is registered under `parent`.
pub type Constructor =
    for<'a> fn(&mut SchemaContext<'a>, &'a Value, Option<NodeId>) -> Result<NodeId>;

const CONSTRUCTORS: [(NodeKind, Constructor); 17] = [
    (NodeKind::Scalar, scalar),
    (NodeKind::Enum, enum_type),
    (NodeKind::EnumValue, enum_value),
    (NodeKind::Object, object),
    (NodeKind::Interface, interface),
    (NodeKind::Union, union_type),
    (NodeKind::InputObject, input_object),
    (NodeKind::InputField, input_value),
    (NodeKind::List, wrapper),
    (NodeKind::NonNull, wrapper),
    (NodeKind::TypeReference, type_reference),
    (NodeKind::FieldDefinition, field_definition),
    (NodeKind::Argument, input_value),
    (NodeKind::Directive, directive),
    (NodeKind::DataFetcher, data_fetcher),
    (NodeKind::TypeResolver, type_resolver),
    (NodeKind::Schema, schema),
];

const STATIC_DATA_FETCHER_TAG: &str = "StaticDataFetcher";

/// Returns the kind and constructor registered for a type tag.
pub fn constructor_of(tag: &str) -> Option<(NodeKind, Constructor)> {
    CONSTRUCTORS
        .iter()
        .find(|(kind, _)| kind.tag() == tag)
        .copied()
}

/// Reads the type tag of a JSON node.
///
/// Static data fetchers are reconstructed like any other data fetcher, and a document root,
/// recognized by its `__schemas` bucket, is reconstructed as its schema.
pub fn normalized_tag(json: &Value) -> Option<&str> {
    if json.get(props::SCHEMAS).is_some() {
        return Some(NodeKind::Schema.tag());
    }
    match json.get(props::MARSHALED_TYPE).and_then(Value::as_str) {
        Some(STATIC_DATA_FETCHER_TAG) => Some(NodeKind::DataFetcher.tag()),
        tag => tag,
    }
}

/// Picks the constructor for a JSON node and reconstructs it.
pub(crate) fn construct<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let tag = normalized_tag(json).ok_or_else(|| {
        Error::format(
            "Failed to unmarshall, incorrect format or missing marshaling data",
            props::MARSHALED_TYPE,
        )
    })?;
    let constructor = match constructor_of(tag) {
        Some((_, constructor)) => constructor,
        None => behavior_constructor(context, json, parent)?.ok_or_else(|| {
            Error::unknown_type("No constructor registered for type tag", tag)
        })?,
    };
    trace!(tag, "unmarshalling schema node");
    constructor(context, json, parent)
}

/// Recognizes a data fetcher or type resolver with an unknown tag by its `id` and its parent.
fn behavior_constructor(
    context: &SchemaContext<'_>,
    json: &Value,
    parent: Option<NodeId>,
) -> Result<Option<Constructor>> {
    if json.get(props::ID).and_then(Value::as_str).is_none() {
        return Ok(None);
    }
    let parent_kind = match parent {
        Some(parent) => context.node(parent)?.kind(),
        None => return Ok(None),
    };
    Ok(match parent_kind {
        NodeKind::FieldDefinition => Some(data_fetcher),
        NodeKind::Interface | NodeKind::Union => Some(type_resolver),
        _ => None,
    })
}

fn serialized<'a>(kind: NodeKind, json: &'a Value, parent: Option<NodeId>) -> Node<'a> {
    Node::new(kind, Origin::Serialized(json), parent)
}

/// Reconstructs the node under `key` unless it's absent.
fn optional_child<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    key: &str,
    parent: Option<NodeId>,
) -> Result<Option<NodeId>> {
    match json.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(child) => context.unmarshall(child, parent).map(Some),
    }
}

/// Reconstructs the node under `key`, failing if it's absent.
fn required_child<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    key: &str,
    owner: NodeId,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    optional_child(context, json, key, parent)?.ok_or_else(|| {
        let reference = context
            .node(owner)
            .map(|node| node.reference().reference().to_string())
            .unwrap_or_default();
        Error::format(format!("Missing `{}` property", key), reference)
    })
}

/// Reconstructs the type under `key` that's owned by `owner`.
fn child_type<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    key: &str,
    owner: NodeId,
) -> Result<NodeId> {
    let id = required_child(context, json, key, owner, Some(owner))?;
    context.expect_type(id)
}

/// Reconstructs a list of nodes that must all be of the `expected` kind.
fn children<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    key: &str,
    parent: Option<NodeId>,
    expected: NodeKind,
) -> Result<Vec<NodeId>> {
    context
        .unmarshall_list(json, key, parent)?
        .into_iter()
        .map(|id| context.expect(id, expected))
        .collect()
}

/// Reconstructs a list of types.
fn child_types<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    key: &str,
) -> Result<Vec<NodeId>> {
    context
        .unmarshall_list(json, key, None)?
        .into_iter()
        .map(|id| context.expect_type(id))
        .collect()
}

fn type_resolver_of<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    owner: NodeId,
) -> Result<Option<NodeId>> {
    optional_child(context, json, props::TYPE_RESOLVER, Some(owner))?
        .map(|id| context.expect(id, NodeKind::TypeResolver))
        .transpose()
}

fn scalar<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    context.register_scalar(serialized(NodeKind::Scalar, json, parent), Identity::of_json(json))
}

fn type_reference<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    context.register(serialized(NodeKind::TypeReference, json, parent), Identity::of_json(json))
}

fn enum_value<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    context.register(serialized(NodeKind::EnumValue, json, parent), Identity::of_json(json))
}

fn enum_type<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    let id = context.register(serialized(NodeKind::Enum, json, parent), Identity::of_json(json))?;
    let values = children(context, json, props::VALUES, Some(id), NodeKind::EnumValue)?;
    context.set_body(id, Body::Enum { values })?;
    Ok(id)
}

fn object<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    let id = context.register(serialized(NodeKind::Object, json, parent), Identity::of_json(json))?;
    let fields = children(context, json, props::FIELD_DEFINITIONS, Some(id), NodeKind::FieldDefinition)?;
    let interfaces = child_types(context, json, props::INTERFACES)?;
    context.set_body(id, Body::Object { fields, interfaces })?;
    Ok(id)
}

fn interface<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    let id = context.register(serialized(NodeKind::Interface, json, parent), Identity::of_json(json))?;
    let fields = children(context, json, props::FIELD_DEFINITIONS, Some(id), NodeKind::FieldDefinition)?;
    let type_resolver = type_resolver_of(context, json, id)?;
    context.set_body(
        id,
        Body::Interface {
            fields,
            type_resolver,
        },
    )?;
    Ok(id)
}

fn union_type<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    let id = context.register(serialized(NodeKind::Union, json, parent), Identity::of_json(json))?;
    let types = child_types(context, json, props::TYPES)?;
    let type_resolver = type_resolver_of(context, json, id)?;
    context.set_body(
        id,
        Body::Union {
            types,
            type_resolver,
        },
    )?;
    Ok(id)
}

fn input_object<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let id = context.register(serialized(NodeKind::InputObject, json, parent), Identity::of_json(json))?;
    let fields = children(context, json, props::FIELDS, Some(id), NodeKind::InputField)?;
    context.set_body(id, Body::InputObject { fields })?;
    Ok(id)
}

/// Reconstructs an argument or an input field, which share their shape.
fn input_value<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let kind = match normalized_tag(json) {
        Some(tag) if tag == NodeKind::Argument.tag() => NodeKind::Argument,
        _ => NodeKind::InputField,
    };
    let id = context.register(serialized(kind, json, parent), Identity::of_json(json))?;
    let input_type = child_type(context, json, props::TYPE, id)?;
    context.set_body(id, Body::Input { input_type })?;
    Ok(id)
}

/// Reconstructs a list or non-null modifier.
fn wrapper<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    let kind = match normalized_tag(json) {
        Some(tag) if tag == NodeKind::List.tag() => NodeKind::List,
        _ => NodeKind::NonNull,
    };
    let id = context.register(serialized(kind, json, parent), Identity::of_json(json))?;
    let wrapped_type = child_type(context, json, props::WRAPPED_TYPE, id)?;
    context.set_body(id, Body::Wrapper { wrapped_type })?;
    Ok(id)
}

fn field_definition<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let id = context.register(serialized(NodeKind::FieldDefinition, json, parent), Identity::of_json(json))?;
    let output_type = child_type(context, json, props::TYPE, id)?;
    let arguments = children(context, json, props::ARGUMENTS, Some(id), NodeKind::Argument)?;
    let data_fetcher = optional_child(context, json, props::DATA_FETCHER, Some(id))?
        .map(|fetcher| context.expect(fetcher, NodeKind::DataFetcher))
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

fn directive<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    let id = context.register(serialized(NodeKind::Directive, json, parent), Identity::of_json(json))?;
    let arguments = children(context, json, props::ARGUMENTS, Some(id), NodeKind::Argument)?;
    context.set_body(id, Body::Directive { arguments })?;
    Ok(id)
}

fn behavior<'a>(kind: NodeKind, json: &'a Value, parent: Option<NodeId>) -> Result<Node<'a>> {
    let id = json
        .get(props::ID)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::format(format!("{} has no id", kind), kind.tag()))?;
    let mut node = serialized(kind, json, parent);
    node.id = Some(id.to_string());
    Ok(node)
}

fn data_fetcher<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let node = behavior(NodeKind::DataFetcher, json, parent)?;
    context.register_data_fetcher(node, Identity::of_json(json))
}

fn type_resolver<'a>(
    context: &mut SchemaContext<'a>,
    json: &'a Value,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let node = behavior(NodeKind::TypeResolver, json, parent)?;
    context.register_type_resolver(node, Identity::of_json(json))
}

/// Reconstructs a schema from either a whole document or a single schema entry.
///
/// For a whole document, exactly one entry must exist under `__schemas`, and the document's type
/// buckets are reconstructed before the entry itself, so that the entry's references resolve
/// against an already populated context.
fn schema<'a>(context: &mut SchemaContext<'a>, json: &'a Value, parent: Option<NodeId>) -> Result<NodeId> {
    let (document, entry) = match json.get(props::SCHEMAS) {
        Some(Value::Object(schemas)) if schemas.len() == 1 => match schemas.values().next() {
            Some(entry) => (Some(json), entry),
            None => return Err(expected_one_schema(0)),
        },
        Some(Value::Object(schemas)) => return Err(expected_one_schema(schemas.len())),
        Some(_) => return Err(expected_one_schema(0)),
        None => (None, json),
    };

    let node = serialized(NodeKind::Schema, entry, parent);
    let id = context.register(node, Identity::of_json(json))?;

    if let Some(document) = document {
        context.unmarshall_list(document, props::SCHEMA_TYPES, None)?;
        context.unmarshall_list(document, props::SCHEMA_INTERFACES, None)?;
        context.unmarshall_list(document, props::SCALAR_TYPES, None)?;
    }
    let directives = if context.options().includes_directives() {
        children(context, entry, props::DIRECTIVES, Some(id), NodeKind::Directive)?
    } else {
        Vec::new()
    };

    let query_type = required_child(context, entry, props::QUERY_TYPE, id, None)?;
    let query_type = context.expect(query_type, NodeKind::Object)?;
    let mutation_type = optional_child(context, entry, props::MUTATION_TYPE, None)?
        .map(|mutation_type| context.expect(mutation_type, NodeKind::Object))
        .transpose()?;
    let dictionary = child_types(context, entry, props::DICTIONARY)?;

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

fn expected_one_schema(found: usize) -> Error {
    Error::format(
        format!("Failed to unmarshall. Expected 1 schema, found: {}", found),
        SCHEMAS_REFERENCE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::marshal::MarshalOptions;
    use serde_json::json;

    #[test]
    fn tags_are_normalized() {
        assert_eq!(
            normalized_tag(&json!({ "__marshaled": "StaticDataFetcher" })),
            Some("DataFetcher")
        );
        assert_eq!(
            normalized_tag(&json!({ "__marshaled": "Object", "__schemas": {} })),
            Some("Schema")
        );
        assert_eq!(normalized_tag(&json!({ "name": "Query" })), None);
        assert!(constructor_of("Object").is_some());
        assert!(constructor_of("Mystery").is_none());
    }

    #[test]
    fn missing_tag_is_a_format_error() {
        let document = json!({ "name": "Query" });
        let mut context = SchemaContext::for_document(MarshalOptions::new(), &document);
        let error = context.unmarshall(&document, None).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Format);
    }

    #[test]
    fn unknown_tag_is_an_unknown_type_error() {
        let document = json!({ "__marshaled": "Mystery", "name": "Query" });
        let mut context = SchemaContext::for_document(MarshalOptions::new(), &document);
        let error = context.unmarshall(&document, None).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::UnknownType);
        assert_eq!(error.context(), Some("Mystery"));
    }

    #[test]
    fn unknown_behaviors_are_recognized_by_parent() {
        let document = json!({
            "__types": {
                "Query": {
                    "__marshaled": "Object",
                    "name": "Query",
                    "fieldDefinitions": [{
                        "__marshaled": "FieldDefinition",
                        "name": "hello",
                        "type": { "$ref": "#/__scalarTypes/String" },
                        "dataFetcher": { "$ref": "#/__dataFetchers/custom" }
                    }]
                }
            },
            "__scalarTypes": {
                "String": { "__marshaled": "Scalar", "name": "String" }
            },
            "__dataFetchers": {
                "custom": { "__marshaled": "CustomFetcher", "id": "custom" }
            }
        });
        let mut context = SchemaContext::for_document(MarshalOptions::new(), &document);
        let query = context
            .unmarshall(&document["__types"]["Query"], None)
            .unwrap();

        assert_eq!(context.node(query).unwrap().kind(), NodeKind::Object);
        let fetcher = context.data_fetchers()[0];
        let fetcher = context.node(fetcher).unwrap();
        assert_eq!(fetcher.id(), Some("custom"));
        assert_eq!(fetcher.reference().reference(), "#/__dataFetchers/custom");
    }

    #[test]
    fn field_lists_must_hold_fields() {
        let document = json!({
            "__marshaled": "Object",
            "name": "Query",
            "fieldDefinitions": [{ "__marshaled": "Scalar", "name": "String" }]
        });
        let mut context = SchemaContext::for_document(MarshalOptions::new(), &document);
        let error = context.unmarshall(&document, None).unwrap_err();
        assert_eq!(error.error_type(), ErrorType::Format);
        assert_eq!(error.message(), "Expected FieldDefinition, found Scalar");
    }

    #[test]
    fn schema_entry_count_is_validated() {
        for schemas in [json!({}), json!({ "A": {}, "B": {} })] {
            let document = json!({ "__types": {}, "__interfaces": {}, "__schemas": schemas });
            let mut context = SchemaContext::for_document(MarshalOptions::new(), &document);
            let error = context.unmarshall(&document, None).unwrap_err();
            assert_eq!(error.error_type(), ErrorType::Format);
            assert!(error.message().starts_with("Failed to unmarshall. Expected 1 schema"));
        }
    }
}
