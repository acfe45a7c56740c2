//! # JSON Documents
//!
//! The `graphql_marshal::json` module contains the building blocks of marshaled schema documents.
//!
//! - [JsonReference] addresses any node inside a document and resolves `{"$ref": ...}` objects
//!   against the document root.
//! - [props] lists the property names and type tag key used by marshaled nodes.
//! - [JsonObject] builds node objects while omitting absent values.

mod object;
pub mod props;
mod reference;

pub use object::*;
pub use reference::*;
