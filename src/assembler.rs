//! # Schema Assembler
//!
//! The entry points of the crate. [marshal] turns a live [Schema] into a JSON document,
//! [unmarshal] reconstructs a [SchemaNode] from such a document, and [decorate] wraps a live
//! [Schema] into a [SchemaNode] without serializing it.
//!
//! A document is a JSON object with the following buckets:
//!
//! - `__types` and `__interfaces`, which hold every named type by name and are always present
//! - `__scalarTypes`, `__typeResolvers` and `__dataFetchers`, which are only present when the
//!   schema uses any scalars, resolvers or fetchers
//! - `__schemas`, which holds exactly one schema entry, named after the schema's query type
//!
//! ```
//! use graphql_marshal::{assembler, schema::*};
//!
//! let arena = SchemaArena::new();
//! let mut query = SchemaObject::new(&arena, "Query");
//! query.add_field(&arena, SchemaField::new(&arena, "hello", TypeRef::named(&arena, "String")));
//! let schema = arena.alloc(Schema::new(&arena, arena.alloc(query)));
//!
//! let document = assembler::marshal(schema, None).unwrap();
//! let node = assembler::unmarshal(&document, None).unwrap();
//! assert_eq!(node.to_json().unwrap(), document);
//! ```

use crate::error::{Error, Result};
use crate::json::{props, JsonObject};
use crate::marshal::{Decorated, DecoratedSchema, MarshalOptions, NodeId, NodeKind, SchemaContext};
use crate::schema::Schema;
use serde_json::{Map, Value};
use tracing::debug;

/// A marshaller with fixed [MarshalOptions].
///
/// Every call creates a fresh [SchemaContext], so a single `SchemaMarshaller` may be used for any
/// number of calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SchemaMarshaller {
    options: MarshalOptions,
}

impl SchemaMarshaller {
    #[inline]
    pub fn new(options: MarshalOptions) -> Self {
        SchemaMarshaller { options }
    }

    #[inline]
    pub fn options(&self) -> &MarshalOptions {
        &self.options
    }

    /// Serializes a live schema into a document.
    pub fn marshal<'a>(&self, schema: &'a Schema<'a>) -> Result<Value> {
        self.decorate(schema)?.to_json()
    }

    /// Decorates a live schema without serializing it.
    pub fn decorate<'a>(&self, schema: &'a Schema<'a>) -> Result<SchemaNode<'a>> {
        let mut context = SchemaContext::new(self.options);
        let id = context.decorator_of(schema, None)?;
        debug!(nodes = context.len(), "decorated schema");
        Ok(SchemaNode { context, id })
    }

    /// Reconstructs a schema from a document.
    pub fn unmarshal<'a>(&self, document: &'a Value) -> Result<SchemaNode<'a>> {
        unmarshal_in(SchemaContext::for_document(self.options, document))
    }
}

/// Serializes a live schema into a document, using default options unless `options` are passed.
#[inline]
pub fn marshal<'a>(schema: &'a Schema<'a>, options: Option<MarshalOptions>) -> Result<Value> {
    SchemaMarshaller::new(options.unwrap_or_default()).marshal(schema)
}

/// Decorates a live schema without serializing it.
#[inline]
pub fn decorate<'a>(schema: &'a Schema<'a>, options: Option<MarshalOptions>) -> Result<SchemaNode<'a>> {
    SchemaMarshaller::new(options.unwrap_or_default()).decorate(schema)
}

/// Reconstructs a schema from a document.
///
/// The document must hold exactly one entry under `__schemas`; anything else is an
/// [ErrorType::Format](crate::error::ErrorType::Format) error.
#[inline]
pub fn unmarshal(document: &Value, options: Option<MarshalOptions>) -> Result<SchemaNode<'_>> {
    SchemaMarshaller::new(options.unwrap_or_default()).unmarshal(document)
}

/// Reconstructs a schema from the document of a prepared context.
///
/// This allows behavior to be attached to fetcher and resolver ids before the document is
/// unmarshaled.
pub fn unmarshal_in(mut context: SchemaContext<'_>) -> Result<SchemaNode<'_>> {
    let document = context
        .document()
        .ok_or_else(|| Error::identity("No document to unmarshall", props::SCHEMAS))?;
    let id = context.unmarshall(document, None)?;
    let kind = context.node(id)?.kind();
    if kind != NodeKind::Schema {
        return Err(Error::format(
            format!("Failed to unmarshall. Expected Schema, found {}", kind),
            kind.tag(),
        ));
    }
    debug!(nodes = context.len(), "unmarshalled schema");
    Ok(SchemaNode { context, id })
}

/// A decorated schema together with the context that owns its nodes.
#[derive(Debug)]
pub struct SchemaNode<'a> {
    context: SchemaContext<'a>,
    id: NodeId,
}

impl<'a> SchemaNode<'a> {
    /// Returns the read view onto the schema.
    #[inline]
    pub fn schema(&self) -> Result<DecoratedSchema<'_, 'a>> {
        DecoratedSchema::cast(&self.context, self.id)
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn context(&self) -> &SchemaContext<'a> {
        &self.context
    }

    /// Returns the context mutably, which is used to attach behavior to reconstructed fetchers
    /// and resolvers.
    #[inline]
    pub fn context_mut(&mut self) -> &mut SchemaContext<'a> {
        &mut self.context
    }

    /// Serializes the schema and every node it reaches into a document.
    pub fn to_json(&self) -> Result<Value> {
        let context = &self.context;
        let options = context.options();

        let mut types = Map::new();
        let mut interfaces = Map::new();
        for id in context.named_types() {
            let node = context.node(id)?;
            let name = node.name().unwrap_or_default();
            if !options.includes_type(name) {
                continue;
            }
            let bucket = if node.kind() == NodeKind::Interface {
                &mut interfaces
            } else {
                &mut types
            };
            bucket.insert(name.to_string(), context.marshall(id)?);
        }

        let scalars = context
            .scalar_types()
            .iter()
            .map(|id| {
                let name = context.node(*id)?.name().unwrap_or_default();
                Ok((name.to_string(), context.marshall(*id)?))
            })
            .collect::<Result<Map<String, Value>>>()?;

        let schema = context.node(self.id)?;
        let mut schemas = Map::new();
        schemas.insert(
            schema.name().unwrap_or_default().to_string(),
            context.marshall(self.id)?,
        );

        let document = JsonObject::new()
            .put(props::SCHEMA_TYPES, types)
            .put(props::SCHEMA_INTERFACES, interfaces);
        let document = put_bucket(document, props::TYPE_RESOLVERS, self.behaviors(context.type_resolvers())?);
        let document = put_bucket(document, props::DATA_FETCHERS, self.behaviors(context.data_fetchers())?);
        let document = put_bucket(document, props::SCALAR_TYPES, scalars);
        Ok(document.put(props::SCHEMAS, schemas).into())
    }

    fn behaviors(&self, ids: &[NodeId]) -> Result<Map<String, Value>> {
        ids.iter()
            .map(|id| {
                let node = self.context.node(*id)?;
                let key = node.id().unwrap_or_default().to_string();
                Ok((key, self.context.marshall(*id)?))
            })
            .collect()
    }
}

/// Side-table buckets are only written when they aren't empty.
#[inline]
fn put_bucket(document: JsonObject, key: &str, bucket: Map<String, Value>) -> JsonObject {
    let present = !bucket.is_empty();
    document.put_if(key, bucket, present)
}
