use super::arena::SchemaArena;
use super::behavior::{DataFetcher, TypeResolver};
use bumpalo::collections::Vec;
use bumpalo::Bump;
use hashbrown::hash_map::DefaultHashBuilder;
use hashbrown::HashMap;
use serde_json::Value;

/// Schema Definition
///
/// A live schema is created from a query root type, an optional mutation root type, the
/// directives it supports and every named type it knows of. Types reference each other by name
/// through [TypeRef]s, so any type may reference any other type, including itself, which makes
/// the live schema a cyclic graph once names are resolved.
/// [Reference](https://spec.graphql.org/October2021/#sec-Schema)
#[derive(Debug, Clone)]
pub struct Schema<'a> {
    pub(crate) query_type: &'a SchemaObject<'a>,
    pub(crate) mutation_type: Option<&'a SchemaObject<'a>>,
    pub(crate) directives: Vec<'a, &'a SchemaDirective<'a>>,
    pub(crate) dictionary: Vec<'a, SchemaType<'a>>,
    pub(crate) types: HashMap<&'a str, SchemaType<'a>, DefaultHashBuilder, &'a Bump>,
    pub(crate) type_list: Vec<'a, SchemaType<'a>>,
}

impl<'a> Schema<'a> {
    /// Create a new schema from its query root type.
    pub fn new(arena: &'a SchemaArena, query_type: &'a SchemaObject<'a>) -> Self {
        let mut schema = Schema {
            query_type,
            mutation_type: None,
            directives: Vec::new_in(&arena.arena),
            dictionary: Vec::new_in(&arena.arena),
            types: HashMap::new_in(&arena.arena),
            type_list: Vec::new_in(&arena.arena),
        };
        schema.add_type(SchemaType::Object(query_type));
        schema
    }

    /// Set the root object type for mutation operations
    pub fn with_mutation_type(mut self, mutation_type: &'a SchemaObject<'a>) -> Self {
        self.mutation_type = Some(mutation_type);
        self.add_type(SchemaType::Object(mutation_type));
        self
    }

    /// Adds the `@include` and `@skip` directives every GraphQL schema supports.
    pub fn with_default_directives(mut self, arena: &'a SchemaArena) -> Self {
        let defaults = [
            (
                "include",
                "Directs the executor to include this field or fragment only when the `if` argument is true",
                "Included when true.",
            ),
            (
                "skip",
                "Directs the executor to skip this field or fragment when the `if` argument is true.",
                "Skipped when true.",
            ),
        ];
        for (name, description, argument_description) in defaults {
            let mut directive = SchemaDirective::new(arena, name);
            directive.description = Some(description);
            directive.on_fragment = true;
            directive.on_field = true;
            let mut argument = SchemaArgument::new(
                "if",
                TypeRef::non_null(arena, TypeRef::named(arena, "Boolean")),
            );
            argument.description = Some(argument_description);
            directive.add_argument(arena, argument);
            self.add_directive(arena.alloc(directive));
        }
        self
    }

    /// Adds a named type to the schema, replacing a previous type of the same name.
    pub fn add_type(&mut self, schema_type: SchemaType<'a>) {
        let name = schema_type.name();
        if self.types.insert(name, schema_type).is_some() {
            if let Some(existing) = self.type_list.iter_mut().find(|t| t.name() == name) {
                *existing = schema_type;
            }
        } else {
            self.type_list.push(schema_type);
        }
    }

    /// Adds a directive definition to the schema.
    pub fn add_directive(&mut self, directive: &'a SchemaDirective<'a>) {
        self.directives.push(directive);
    }

    /// Adds a type that is not reachable from the root types to the schema's dictionary.
    pub fn add_dictionary_type(&mut self, schema_type: SchemaType<'a>) {
        self.dictionary.push(schema_type);
        if !self.types.contains_key(schema_type.name()) {
            self.add_type(schema_type);
        }
    }

    /// Returns the root object type for query operations
    #[inline]
    pub fn query_type(&self) -> &'a SchemaObject<'a> {
        self.query_type
    }

    /// Returns the root object type for mutation operations
    #[inline]
    pub fn mutation_type(&self) -> Option<&'a SchemaObject<'a>> {
        self.mutation_type
    }

    /// Returns whether the schema has a mutation root type.
    #[inline]
    pub fn is_supporting_mutations(&self) -> bool {
        self.mutation_type.is_some()
    }

    #[inline]
    pub fn directives(&self) -> &[&'a SchemaDirective<'a>] {
        &self.directives
    }

    /// Retrieves a directive by name.
    pub fn get_directive(&self, name: &str) -> Option<&'a SchemaDirective<'a>> {
        self.directives
            .iter()
            .find(|directive| directive.name == name)
            .copied()
    }

    /// Returns the types that were added to the schema without being reachable from its roots.
    #[inline]
    pub fn dictionary(&self) -> &[SchemaType<'a>] {
        &self.dictionary
    }

    /// Retrieves a type by name from known schema types.
    ///
    /// The built-in scalars are always known, even when they weren't added explicitly.
    #[inline]
    pub fn get_type(&self, name: &str) -> Option<SchemaType<'a>> {
        self.types
            .get(name)
            .copied()
            .or_else(|| builtin_scalar(name).map(SchemaType::Scalar))
    }

    /// Returns all explicitly added types in the order they were added.
    #[inline]
    pub fn types(&self) -> &[SchemaType<'a>] {
        &self.type_list
    }
}

/// Generic trait for any schema type that implements fields
pub trait SchemaFields<'a>: Sized {
    /// Add a new [SchemaField] to the list of fields
    fn add_field(&mut self, arena: &'a SchemaArena, field: SchemaField<'a>);

    /// Get all fields in declaration order
    fn get_fields(&self) -> &[&'a SchemaField<'a>];

    /// Get a known field by name
    fn get_field(&self, name: &str) -> Option<&'a SchemaField<'a>> {
        self.get_fields()
            .iter()
            .find(|field| field.name == name)
            .copied()
    }
}

/// An Object type definition.
///
/// Most types in GraphQL are objects and define a set of fields and the interfaces they implement.
/// [Reference](https://spec.graphql.org/October2021/#sec-Objects)
#[derive(Debug, Clone)]
pub struct SchemaObject<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub(crate) fields: Vec<'a, &'a SchemaField<'a>>,
    pub(crate) interfaces: Vec<'a, &'a str>,
}

impl<'a> SchemaObject<'a> {
    #[inline]
    pub fn new(arena: &'a SchemaArena, name: &'a str) -> Self {
        SchemaObject {
            name,
            description: None,
            fields: Vec::new_in(&arena.arena),
            interfaces: Vec::new_in(&arena.arena),
        }
    }

    /// Add the name of an implemented [SchemaInterface]
    pub fn add_interface(&mut self, interface: &'a str) {
        self.interfaces.push(interface);
    }

    /// Get the names of all implemented interfaces
    #[inline]
    pub fn get_interfaces(&self) -> &[&'a str] {
        &self.interfaces
    }
}

impl<'a> SchemaFields<'a> for SchemaObject<'a> {
    fn add_field(&mut self, arena: &'a SchemaArena, field: SchemaField<'a>) {
        self.fields.push(arena.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &[&'a SchemaField<'a>] {
        &self.fields
    }
}

/// An Interface type definition.
///
/// Any object may implement one or more interfaces and must then adhere to the definition of this
/// interface. A field that returns an interface as its return type may return any object that
/// implements this interface, which the interface's [TypeResolver] picks at runtime.
/// [Reference](https://spec.graphql.org/October2021/#sec-Interfaces)
#[derive(Debug, Clone)]
pub struct SchemaInterface<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub type_resolver: Option<&'a dyn TypeResolver>,
    pub(crate) fields: Vec<'a, &'a SchemaField<'a>>,
}

impl<'a> SchemaInterface<'a> {
    #[inline]
    pub fn new(arena: &'a SchemaArena, name: &'a str) -> Self {
        SchemaInterface {
            name,
            description: None,
            type_resolver: None,
            fields: Vec::new_in(&arena.arena),
        }
    }
}

impl<'a> SchemaFields<'a> for SchemaInterface<'a> {
    fn add_field(&mut self, arena: &'a SchemaArena, field: SchemaField<'a>) {
        self.fields.push(arena.alloc(field));
    }

    #[inline]
    fn get_fields(&self) -> &[&'a SchemaField<'a>] {
        &self.fields
    }
}

/// An object Field type definition.
///
/// A field is like a function that given its arguments as input values produces an output value.
/// The value is produced by the field's [DataFetcher]; a field without one reads the property of
/// the same name off its parent value.
/// [Reference](https://spec.graphql.org/October2021/#FieldsDefinition)
#[derive(Debug, Clone)]
pub struct SchemaField<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub output_type: &'a TypeRef<'a>,
    pub data_fetcher: Option<&'a dyn DataFetcher>,
    pub deprecation_reason: Option<&'a str>,
    pub(crate) arguments: Vec<'a, &'a SchemaArgument<'a>>,
}

impl<'a> SchemaField<'a> {
    #[inline]
    pub fn new(arena: &'a SchemaArena, name: &'a str, output_type: &'a TypeRef<'a>) -> Self {
        SchemaField {
            name,
            description: None,
            output_type,
            data_fetcher: None,
            deprecation_reason: None,
            arguments: Vec::new_in(&arena.arena),
        }
    }

    pub fn add_argument(&mut self, arena: &'a SchemaArena, argument: SchemaArgument<'a>) {
        self.arguments.push(arena.alloc(argument));
    }

    #[inline]
    pub fn get_arguments(&self) -> &[&'a SchemaArgument<'a>] {
        &self.arguments
    }

    #[inline]
    pub fn get_argument(&self, name: &str) -> Option<&'a SchemaArgument<'a>> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .copied()
    }

    /// A field is deprecated when it carries a non-empty deprecation reason.
    #[inline]
    pub fn is_deprecated(&self) -> bool {
        is_deprecated(self.deprecation_reason)
    }
}

/// An argument definition of a field or directive.
///
/// [Reference](https://spec.graphql.org/October2021/#ArgumentsDefinition)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaArgument<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub input_type: &'a TypeRef<'a>,
    pub default_value: Option<Value>,
}

impl<'a> SchemaArgument<'a> {
    #[inline]
    pub fn new(name: &'a str, input_type: &'a TypeRef<'a>) -> Self {
        SchemaArgument {
            name,
            description: None,
            input_type,
            default_value: None,
        }
    }
}

/// A Union type definition.
///
/// A union contains a list of possible types that can be returned in its stead when its defined as
/// an output type.
/// [Reference](https://spec.graphql.org/October2021/#sec-Unions)
#[derive(Debug, Clone)]
pub struct SchemaUnion<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub type_resolver: Option<&'a dyn TypeResolver>,
    pub(crate) possible_types: Vec<'a, &'a str>,
}

impl<'a> SchemaUnion<'a> {
    #[inline]
    pub fn new(arena: &'a SchemaArena, name: &'a str) -> Self {
        SchemaUnion {
            name,
            description: None,
            type_resolver: None,
            possible_types: Vec::new_in(&arena.arena),
        }
    }

    /// Add the name of a [SchemaObject] to the list of possible types
    pub fn add_possible_type(&mut self, object: &'a str) {
        self.possible_types.push(object);
    }

    #[inline]
    pub fn get_possible_types(&self) -> &[&'a str] {
        &self.possible_types
    }
}

/// A Scalar type definition.
///
/// Scalars represent primitive leaf values in GraphQL. They are shared by name across a whole
/// schema rather than owned by the types that use them.
/// [Reference](https://spec.graphql.org/October2021/#sec-Scalars)
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaScalar<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> SchemaScalar<'a> {
    #[inline]
    pub fn new(name: &'a str) -> Self {
        SchemaScalar {
            name,
            description: None,
        }
    }
}

pub static STRING_SCALAR: SchemaScalar<'static> = SchemaScalar {
    name: "String",
    description: Some("Built-in String"),
};

pub static INT_SCALAR: SchemaScalar<'static> = SchemaScalar {
    name: "Int",
    description: Some("Built-in Int"),
};

pub static FLOAT_SCALAR: SchemaScalar<'static> = SchemaScalar {
    name: "Float",
    description: Some("Built-in Float"),
};

pub static BOOLEAN_SCALAR: SchemaScalar<'static> = SchemaScalar {
    name: "Boolean",
    description: Some("Built-in Boolean"),
};

pub static ID_SCALAR: SchemaScalar<'static> = SchemaScalar {
    name: "ID",
    description: Some("Built-in ID"),
};

/// Returns the built-in scalar of the given name.
pub fn builtin_scalar(name: &str) -> Option<&'static SchemaScalar<'static>> {
    match name {
        "String" => Some(&STRING_SCALAR),
        "Int" => Some(&INT_SCALAR),
        "Float" => Some(&FLOAT_SCALAR),
        "Boolean" => Some(&BOOLEAN_SCALAR),
        "ID" => Some(&ID_SCALAR),
        _ => None,
    }
}

/// An Enum type definition.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Enums)
#[derive(Debug, Clone)]
pub struct SchemaEnum<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub(crate) values: Vec<'a, &'a SchemaEnumValue<'a>>,
}

impl<'a> SchemaEnum<'a> {
    #[inline]
    pub fn new(arena: &'a SchemaArena, name: &'a str) -> Self {
        SchemaEnum {
            name,
            description: None,
            values: Vec::new_in(&arena.arena),
        }
    }

    pub fn add_value(&mut self, arena: &'a SchemaArena, value: SchemaEnumValue<'a>) {
        self.values.push(arena.alloc(value));
    }

    #[inline]
    pub fn get_values(&self) -> &[&'a SchemaEnumValue<'a>] {
        &self.values
    }

    #[inline]
    pub fn get_value(&self, name: &str) -> Option<&'a SchemaEnumValue<'a>> {
        self.values.iter().find(|value| value.name == name).copied()
    }
}

/// The runtime value an enum value stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValueData<'a> {
    /// A plain value that is captured verbatim.
    Literal(Value),
    /// A value that is itself a variant of a Rust enum, captured by its variant name.
    Variant(&'a str),
}

impl<'a> EnumValueData<'a> {
    /// The JSON representation of the runtime value.
    pub fn to_json(&self) -> Value {
        match self {
            EnumValueData::Literal(value) => value.clone(),
            EnumValueData::Variant(name) => Value::String((*name).to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEnumValue<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub value: EnumValueData<'a>,
    pub deprecation_reason: Option<&'a str>,
}

impl<'a> SchemaEnumValue<'a> {
    /// Create an enum value whose runtime value is its own name.
    #[inline]
    pub fn new(name: &'a str) -> Self {
        SchemaEnumValue {
            name,
            description: None,
            value: EnumValueData::Literal(Value::String(name.to_owned())),
            deprecation_reason: None,
        }
    }

    #[inline]
    pub fn is_deprecated(&self) -> bool {
        is_deprecated(self.deprecation_reason)
    }
}

/// An Input Object type definition.
///
/// Inputs, such as arguments, may sometimes be nested and accept objects that must adhere to the
/// shape of an Input Object definition. This is often used to represent more complex inputs.
/// [Reference](https://spec.graphql.org/October2021/#sec-Input-Objects)
#[derive(Debug, Clone)]
pub struct SchemaInputObject<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub(crate) fields: Vec<'a, &'a SchemaInputField<'a>>,
}

impl<'a> SchemaInputObject<'a> {
    #[inline]
    pub fn new(arena: &'a SchemaArena, name: &'a str) -> Self {
        SchemaInputObject {
            name,
            description: None,
            fields: Vec::new_in(&arena.arena),
        }
    }

    pub fn add_field(&mut self, arena: &'a SchemaArena, field: SchemaInputField<'a>) {
        self.fields.push(arena.alloc(field));
    }

    #[inline]
    pub fn get_fields(&self) -> &[&'a SchemaInputField<'a>] {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaInputField<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub input_type: &'a TypeRef<'a>,
    pub default_value: Option<Value>,
}

impl<'a> SchemaInputField<'a> {
    #[inline]
    pub fn new(name: &'a str, input_type: &'a TypeRef<'a>) -> Self {
        SchemaInputField {
            name,
            description: None,
            input_type,
            default_value: None,
        }
    }
}

/// A directive definition.
///
/// Only the coarse locations of the directive are tracked: whether it may be placed on
/// operations, on fragments, or on fields.
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-System.Directives)
#[derive(Debug, Clone)]
pub struct SchemaDirective<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub on_operation: bool,
    pub on_fragment: bool,
    pub on_field: bool,
    pub(crate) arguments: Vec<'a, &'a SchemaArgument<'a>>,
}

impl<'a> SchemaDirective<'a> {
    #[inline]
    pub fn new(arena: &'a SchemaArena, name: &'a str) -> Self {
        SchemaDirective {
            name,
            description: None,
            on_operation: false,
            on_fragment: false,
            on_field: false,
            arguments: Vec::new_in(&arena.arena),
        }
    }

    pub fn add_argument(&mut self, arena: &'a SchemaArena, argument: SchemaArgument<'a>) {
        self.arguments.push(arena.alloc(argument));
    }

    #[inline]
    pub fn get_arguments(&self) -> &[&'a SchemaArgument<'a>] {
        &self.arguments
    }
}

/// A named type enum that represents all possible GraphQL definition types.
///
/// [Reference](https://spec.graphql.org/October2021/#sec-Types)
#[derive(Debug, Clone, Copy)]
pub enum SchemaType<'a> {
    InputObject(&'a SchemaInputObject<'a>),
    Object(&'a SchemaObject<'a>),
    Union(&'a SchemaUnion<'a>),
    Interface(&'a SchemaInterface<'a>),
    Scalar(&'a SchemaScalar<'a>),
    Enum(&'a SchemaEnum<'a>),
}

impl<'a> SchemaType<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            SchemaType::InputObject(x) => x.name,
            SchemaType::Object(x) => x.name,
            SchemaType::Union(x) => x.name,
            SchemaType::Interface(x) => x.name,
            SchemaType::Scalar(x) => x.name,
            SchemaType::Enum(x) => x.name,
        }
    }

    #[inline]
    pub fn description(&self) -> Option<&'a str> {
        match self {
            SchemaType::InputObject(x) => x.description,
            SchemaType::Object(x) => x.description,
            SchemaType::Union(x) => x.description,
            SchemaType::Interface(x) => x.description,
            SchemaType::Scalar(x) => x.description,
            SchemaType::Enum(x) => x.description,
        }
    }

    pub fn object(&self) -> Option<&'a SchemaObject<'a>> {
        match self {
            SchemaType::Object(x) => Some(x),
            _ => None,
        }
    }

    pub fn input_object(&self) -> Option<&'a SchemaInputObject<'a>> {
        match self {
            SchemaType::InputObject(x) => Some(x),
            _ => None,
        }
    }

    pub fn interface(&self) -> Option<&'a SchemaInterface<'a>> {
        match self {
            SchemaType::Interface(x) => Some(x),
            _ => None,
        }
    }

    pub fn union_type(&self) -> Option<&'a SchemaUnion<'a>> {
        match self {
            SchemaType::Union(x) => Some(x),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<&'a SchemaScalar<'a>> {
        match self {
            SchemaType::Scalar(x) => Some(x),
            _ => None,
        }
    }

    pub fn enum_type(&self) -> Option<&'a SchemaEnum<'a>> {
        match self {
            SchemaType::Enum(x) => Some(x),
            _ => None,
        }
    }
}

impl<'a> From<&'a SchemaObject<'a>> for SchemaType<'a> {
    #[inline]
    fn from(schema_object: &'a SchemaObject<'a>) -> Self {
        SchemaType::Object(schema_object)
    }
}

impl<'a> From<&'a SchemaInterface<'a>> for SchemaType<'a> {
    #[inline]
    fn from(schema_interface: &'a SchemaInterface<'a>) -> Self {
        SchemaType::Interface(schema_interface)
    }
}

impl<'a> From<&'a SchemaUnion<'a>> for SchemaType<'a> {
    #[inline]
    fn from(schema_union: &'a SchemaUnion<'a>) -> Self {
        SchemaType::Union(schema_union)
    }
}

impl<'a> From<&'a SchemaEnum<'a>> for SchemaType<'a> {
    #[inline]
    fn from(schema_enum: &'a SchemaEnum<'a>) -> Self {
        SchemaType::Enum(schema_enum)
    }
}

impl<'a> From<&'a SchemaInputObject<'a>> for SchemaType<'a> {
    #[inline]
    fn from(input_object: &'a SchemaInputObject<'a>) -> Self {
        SchemaType::InputObject(input_object)
    }
}

impl<'a> From<&'a SchemaScalar<'a>> for SchemaType<'a> {
    #[inline]
    fn from(scalar: &'a SchemaScalar<'a>) -> Self {
        SchemaType::Scalar(scalar)
    }
}

/// A reference to a type from a field, argument or input field.
///
/// Named types are referenced by name and resolved against the [Schema]; lists and non-null
/// modifiers wrap another reference.
#[derive(Clone, Copy)]
pub enum TypeRef<'a> {
    Type(&'a str),
    ListType(&'a TypeRef<'a>),
    NonNullType(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    #[inline]
    pub fn named(arena: &'a SchemaArena, name: &'a str) -> &'a TypeRef<'a> {
        arena.alloc(TypeRef::Type(name))
    }

    #[inline]
    pub fn list(arena: &'a SchemaArena, of_type: &'a TypeRef<'a>) -> &'a TypeRef<'a> {
        arena.alloc(TypeRef::ListType(of_type))
    }

    #[inline]
    pub fn non_null(arena: &'a SchemaArena, of_type: &'a TypeRef<'a>) -> &'a TypeRef<'a> {
        arena.alloc(TypeRef::NonNullType(of_type))
    }

    /// Returns the name of the innermost named type.
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeRef::Type(name) => name,
            TypeRef::ListType(of_type) | TypeRef::NonNullType(of_type) => of_type.named_type(),
        }
    }

    /// Resolves the innermost named type against a schema.
    #[inline]
    pub fn of_type(&self, schema: &Schema<'a>) -> Option<SchemaType<'a>> {
        schema.get_type(self.named_type())
    }
}

/// Circuit breaks printing of recursive type references by printing named types by name only.
impl<'a> std::fmt::Debug for TypeRef<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(name) => f.debug_tuple("Type").field(name).finish(),
            Self::ListType(of_type) => f.debug_tuple("ListType").field(of_type).finish(),
            Self::NonNullType(of_type) => f.debug_tuple("NonNullType").field(of_type).finish(),
        }
    }
}

/// Type references only ever compare type names, which is all that's needed to compare two
/// references without following them into the types they point at.
impl<'a> PartialEq for TypeRef<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(left), Self::Type(right)) => left == right,
            (Self::ListType(left), Self::ListType(right)) => left == right,
            (Self::NonNullType(left), Self::NonNullType(right)) => left == right,
            _ => false,
        }
    }
}

#[inline]
pub(crate) fn is_deprecated(reason: Option<&str>) -> bool {
    matches!(reason, Some(reason) if !reason.is_empty())
}
