//! # Marshalling and Unmarshalling
//!
//! The `graphql_marshal::marshal` module turns a live [Schema](crate::schema::Schema) into
//! decorated nodes and decorated nodes into JSON, and reconstructs decorated nodes from a JSON
//! document.
//!
//! All decorated nodes live in a [SchemaContext], which is created for a single marshal or
//! unmarshal call. The context guarantees that every live node and every JSON value is decorated
//! at most once, and it assigns each node its [JsonReference](crate::json::JsonReference) address
//! in the document. Nodes are read through typed views such as [DecoratedSchema] or
//! [DecoratedField], which behave the same whether a node was decorated from a live schema or
//! reconstructed from a document.
//!
//! Most users won't use this module directly, but will instead call
//! [marshal](crate::assembler::marshal) and [unmarshal](crate::assembler::unmarshal).

mod context;
mod decorated;
mod marshaller;
mod node;
mod options;
mod unmarshaller;

pub use context::*;
pub use decorated::*;
pub use node::*;
pub use options::*;
pub use unmarshaller::{constructor_of, normalized_tag, Constructor};
