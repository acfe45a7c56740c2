//! `graphql_marshal`
//! =========
//!
//! _Identity-preserving JSON marshalling for cyclic GraphQL schema graphs._
//!
//! The **`graphql_marshal`** library serializes an in-memory GraphQL schema into a JSON document
//! and reconstructs an equivalent schema graph from such a document. A schema graph is cyclic:
//! types reference each other through fields, interfaces and union members, and the same scalar
//! is shared by any number of fields. The document therefore stores every named node exactly once
//! and refers to it by address everywhere else, using `{"$ref": "#/__types/Query"}` style
//! references.
//!
//! The library is split into the following modules:
//!
//! - [schema], the live schema model that is marshaled, built onto a [bumpalo] arena
//! - [json], the addressing scheme and building blocks of marshaled documents
//! - [marshal], the per-call [SchemaContext](marshal::SchemaContext) registry, the marshaller and
//!   unmarshaller, and the typed read views onto decorated nodes
//! - [assembler], the [marshal](assembler::marshal), [unmarshal](assembler::unmarshal) and
//!   [decorate](assembler::decorate) entry points
//!
//! Behavior that is attached to a schema, like a field's data fetcher, can't be serialized. It is
//! recorded by a stable id, and callers may re-attach behavior to these ids after unmarshalling.
//!
//! [A good place to start learning more about this crate is the `assembler` module...](assembler)

pub mod assembler;
pub mod collaborators;
pub mod error;
pub mod json;
pub mod marshal;
pub mod schema;

pub use bumpalo;
pub use serde_json;
