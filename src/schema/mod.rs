//! # Live Schema Definitions
//!
//! The `graphql_marshal::schema` module contains the in-memory GraphQL schema that the marshaller
//! serializes and that reconstructed documents mirror. A schema is built onto a [SchemaArena],
//! and every type, field and argument is referenced as an arena reference. Types reference each
//! other by name through [TypeRef], so the schema may freely be cyclic.
//!
//! ```
//! use graphql_marshal::schema::*;
//!
//! let arena = SchemaArena::new();
//! let mut query = SchemaObject::new(&arena, "Query");
//! query.add_field(&arena, SchemaField::new(&arena, "hello", TypeRef::named(&arena, "String")));
//! let schema = Schema::new(&arena, arena.alloc(query));
//!
//! assert_eq!(schema.query_type().get_fields().len(), 1);
//! assert!(schema.get_type("String").is_some());
//! ```
//!
//! Fields and abstract types may carry behavior in the form of a [DataFetcher] or a
//! [TypeResolver]. These are opaque to the marshaller, which only records their identity.
//!
//! [More information on the Schema struct.](Schema)

mod arena;
mod behavior;
#[allow(clippy::module_inception)]
mod schema;

pub use arena::*;
pub use behavior::*;
pub use schema::*;
