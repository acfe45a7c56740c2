//! Property names of marshaled schema documents.

/// Holds the type tag of every marshaled node.
pub const MARSHALED_TYPE: &str = "__marshaled";
/// Holds the name of the Rust type that implements a data fetcher or type resolver.
pub const MARSHALED_TYPE_CLASS: &str = "__marshaledClass";
/// Holds a reference to the node owning a data fetcher or type resolver.
pub const PARENT: &str = "__parent";

pub const SCHEMAS: &str = "__schemas";
pub const SCHEMA_TYPES: &str = "__types";
pub const SCHEMA_INTERFACES: &str = "__interfaces";
pub const TYPE_RESOLVERS: &str = "__typeResolvers";
pub const DATA_FETCHERS: &str = "__dataFetchers";
pub const SCALAR_TYPES: &str = "__scalarTypes";

pub const ARGUMENTS: &str = "arguments";
pub const DATA_FETCHER: &str = "dataFetcher";
pub const DEFAULT_VALUE: &str = "defaultValue";
pub const DEPRECATION_REASON: &str = "deprecationReason";
pub const DESCRIPTION: &str = "description";
pub const DICTIONARY: &str = "dictionary";
pub const DIRECTIVES: &str = "directives";
pub const FIELD_DEFINITIONS: &str = "fieldDefinitions";
pub const FIELDS: &str = "fields";
pub const ID: &str = "id";
pub const INTERFACES: &str = "interfaces";
pub const IS_ON_FIELD: &str = "isOnField";
pub const IS_ON_FRAGMENT: &str = "isOnFragment";
pub const IS_ON_OPERATION: &str = "isOnOperation";
pub const MUTATION_TYPE: &str = "mutationType";
pub const NAME: &str = "name";
pub const QUERY_TYPE: &str = "queryType";
pub const STATIC_VALUE: &str = "staticValue";
pub const TYPE: &str = "type";
pub const TYPES: &str = "types";
pub const TYPE_RESOLVER: &str = "typeResolver";
pub const VALUE: &str = "value";
pub const VALUES: &str = "values";
pub const WRAPPED_TYPE: &str = "wrappedType";
