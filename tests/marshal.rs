use graphql_marshal::assembler::{self, unmarshal_in};
use graphql_marshal::error::ErrorType;
use graphql_marshal::marshal::*;
use graphql_marshal::schema::*;
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

#[derive(Debug)]
struct HeroFetcher;

impl DataFetcher for HeroFetcher {
    fn fetch(&self, _source: &Value, _arguments: &Map<String, Value>) -> Value {
        json!({ "__typename": "Droid", "name": "R2-D2" })
    }
}

#[derive(Debug)]
struct ShoutingFetcher;

impl DataFetcher for ShoutingFetcher {
    fn fetch(&self, source: &Value, _arguments: &Map<String, Value>) -> Value {
        match source.get("name").and_then(Value::as_str) {
            Some(name) => Value::String(name.to_uppercase()),
            None => Value::Null,
        }
    }
}

fn star_wars(arena: &SchemaArena) -> &Schema<'_> {
    let mut episode = SchemaEnum::new(arena, "Episode");
    episode.add_value(arena, SchemaEnumValue::new("NEWHOPE"));
    let mut empire = SchemaEnumValue::new("EMPIRE");
    empire.value = EnumValueData::Variant("Empire");
    episode.add_value(arena, empire);
    let mut jedi = SchemaEnumValue::new("JEDI");
    jedi.deprecation_reason = Some("Not a real episode.");
    episode.add_value(arena, jedi);
    let episode = arena.alloc(episode);

    let mut character = SchemaInterface::new(arena, "Character");
    character.description = Some("A character in the Star Wars Trilogy");
    character.add_field(arena, SchemaField::new(arena, "id", TypeRef::non_null(arena, TypeRef::named(arena, "ID"))));
    character.add_field(arena, SchemaField::new(arena, "name", TypeRef::named(arena, "String")));
    character.add_field(
        arena,
        SchemaField::new(arena, "friends", TypeRef::list(arena, TypeRef::named(arena, "Character"))),
    );
    character.type_resolver = Some(arena.alloc(TypenameResolver));
    let character = arena.alloc(character);

    let mut droid = SchemaObject::new(arena, "Droid");
    droid.add_interface("Character");
    droid.add_field(arena, SchemaField::new(arena, "id", TypeRef::non_null(arena, TypeRef::named(arena, "ID"))));
    let mut name = SchemaField::new(arena, "name", TypeRef::named(arena, "String"));
    name.data_fetcher = Some(arena.alloc(PropertyDataFetcher::new("name")));
    droid.add_field(arena, name);
    droid.add_field(
        arena,
        SchemaField::new(arena, "friends", TypeRef::list(arena, TypeRef::named(arena, "Character"))),
    );
    let mut primary_function = SchemaField::new(arena, "primaryFunction", TypeRef::named(arena, "String"));
    primary_function.deprecation_reason = Some("Droids have many functions.");
    droid.add_field(arena, primary_function);
    let droid = arena.alloc(droid);

    let mut search_result = SchemaUnion::new(arena, "SearchResult");
    search_result.add_possible_type("Droid");
    search_result.add_possible_type("Starship");
    let search_result = arena.alloc(search_result);

    let mut review_input = SchemaInputObject::new(arena, "ReviewInput");
    let mut stars = SchemaInputField::new("stars", TypeRef::non_null(arena, TypeRef::named(arena, "Int")));
    stars.default_value = Some(json!(5));
    review_input.add_field(arena, stars);
    review_input.add_field(arena, SchemaInputField::new("commentary", TypeRef::named(arena, "String")));
    let review_input = arena.alloc(review_input);

    let mut query = SchemaObject::new(arena, "Query");
    let mut hero = SchemaField::new(arena, "hero", TypeRef::named(arena, "Character"));
    let mut episode_argument = SchemaArgument::new("episode", TypeRef::named(arena, "Episode"));
    episode_argument.default_value = Some(json!("NEWHOPE"));
    hero.add_argument(arena, episode_argument);
    hero.data_fetcher = Some(arena.alloc(HeroFetcher));
    query.add_field(arena, hero);
    let mut search = SchemaField::new(
        arena,
        "search",
        TypeRef::non_null(arena, TypeRef::list(arena, TypeRef::named(arena, "SearchResult"))),
    );
    search.add_argument(arena, SchemaArgument::new("text", TypeRef::named(arena, "String")));
    query.add_field(arena, search);
    let mut greeting = SchemaField::new(arena, "greeting", TypeRef::named(arena, "String"));
    greeting.data_fetcher = Some(arena.alloc(StaticDataFetcher::new(json!("Hello there"))));
    query.add_field(arena, greeting);
    let query = arena.alloc(query);

    let mut mutation = SchemaObject::new(arena, "Mutation");
    let mut create_review = SchemaField::new(arena, "createReview", TypeRef::named(arena, "Boolean"));
    create_review.add_argument(
        arena,
        SchemaArgument::new("review", TypeRef::non_null(arena, TypeRef::named(arena, "ReviewInput"))),
    );
    mutation.add_field(arena, create_review);
    let mutation = arena.alloc(mutation);

    let mut date = SchemaScalar::new("Date");
    date.description = Some("A calendar date");
    let date = arena.alloc(date);

    let mut schema = Schema::new(arena, query)
        .with_mutation_type(mutation)
        .with_default_directives(arena);
    schema.add_type(episode.into());
    schema.add_type(character.into());
    schema.add_type(droid.into());
    schema.add_type(search_result.into());
    schema.add_type(review_input.into());
    schema.add_dictionary_type(date.into());
    arena.alloc(schema)
}

fn references_to(json: &Value, reference: &str) -> usize {
    match json {
        Value::Object(map) => {
            let own = usize::from(map.get("$ref").and_then(Value::as_str) == Some(reference));
            own + map.values().map(|value| references_to(value, reference)).sum::<usize>()
        }
        Value::Array(list) => list.iter().map(|value| references_to(value, reference)).sum(),
        _ => 0,
    }
}

#[test]
fn round_trips_are_stable() {
    init_tracing();
    let arena = SchemaArena::new();
    let schema = star_wars(&arena);

    for options in [
        MarshalOptions::new(),
        MarshalOptions::new().include_directives(true),
    ] {
        let document = assembler::marshal(schema, Some(options)).unwrap();
        let node = assembler::unmarshal(&document, Some(options)).unwrap();
        assert_eq!(node.to_json().unwrap(), document);

        let again = node.to_json().unwrap();
        let node = assembler::unmarshal(&again, Some(options)).unwrap();
        assert_eq!(node.to_json().unwrap(), document);
    }
}

#[test]
fn reconstructed_schemas_read_like_live_schemas() {
    let arena = SchemaArena::new();
    let document = assembler::marshal(star_wars(&arena), None).unwrap();
    let node = assembler::unmarshal(&document, None).unwrap();
    let schema = node.schema().unwrap();

    assert!(schema.is_supporting_mutations());
    assert_eq!(schema.mutation_type().unwrap().unwrap().name(), "Mutation");
    assert_eq!(schema.dictionary().unwrap()[0].name(), Some("Date"));
    assert_eq!(schema.dictionary().unwrap()[0].description(), Some("A calendar date"));

    let query = schema.query_type().unwrap();
    let hero = query.field_definition("hero").unwrap();
    let episode = hero.argument("episode").unwrap();
    assert_eq!(episode.default_value(), Some(&json!("NEWHOPE")));
    let episode = episode.input_type().unwrap().enum_type().unwrap();
    assert_eq!(episode.value("EMPIRE").unwrap().value(), Some(json!("Empire")));
    assert!(episode.value("JEDI").unwrap().is_deprecated());
    assert!(!episode.value("NEWHOPE").unwrap().is_deprecated());
    assert_eq!(hero.argument("season").unwrap_err().error_type(), ErrorType::UnknownType);

    let character = hero.output_type().unwrap().interface().unwrap();
    assert_eq!(character.description(), Some("A character in the Star Wars Trilogy"));
    assert_eq!(character.type_resolver().unwrap().unwrap().id(), "typeResolver-0");

    let search = query.field_definition("search").unwrap();
    let result = search.output_type().unwrap().named_type().unwrap().union_type().unwrap();
    let members: Vec<_> = result.types().unwrap().iter().map(|member| member.kind()).collect();
    assert_eq!(members, [NodeKind::Object, NodeKind::TypeReference]);

    let droid = schema.get_type("Droid").unwrap().object().unwrap();
    assert!(droid.field_definition("primaryFunction").unwrap().is_deprecated());
    assert!(droid.field_definition("name").unwrap().data_fetcher().unwrap().is_none());
    assert_eq!(droid.interfaces().unwrap()[0].object(), None);

    let review = schema.get_type("ReviewInput").unwrap().input_object().unwrap();
    assert_eq!(review.field("stars").unwrap().default_value(), Some(&json!(5)));
    assert!(schema.get_type("Starship").unwrap().kind() == NodeKind::TypeReference);
}

#[test]
fn shared_types_are_marshaled_once() {
    let arena = SchemaArena::new();
    let droid = arena.alloc(SchemaObject::new(&arena, "Droid"));
    let mut query = SchemaObject::new(&arena, "Query");
    for name in ["hero", "villain", "sidekick"] {
        query.add_field(&arena, SchemaField::new(&arena, name, TypeRef::named(&arena, "Droid")));
    }
    let mut schema = Schema::new(&arena, arena.alloc(query));
    schema.add_type(droid.into());
    let schema = arena.alloc(schema);

    let mut context = SchemaContext::new(MarshalOptions::new());
    let first = context.decorator_of(Live::Object(droid), None).unwrap();
    let second = context.decorator_of(Live::Object(droid), None).unwrap();
    assert_eq!(first, second);

    let document = assembler::marshal(schema, None).unwrap();
    assert_eq!(document["__types"].as_object().unwrap().len(), 2);
    assert_eq!(references_to(&document, "#/__types/Droid"), 3);
}

#[test]
fn cycles_resolve_to_the_same_node() {
    let arena = SchemaArena::new();
    let mut a = SchemaObject::new(&arena, "A");
    a.add_field(&arena, SchemaField::new(&arena, "b", TypeRef::named(&arena, "B")));
    let mut b = SchemaObject::new(&arena, "B");
    b.add_field(&arena, SchemaField::new(&arena, "a", TypeRef::named(&arena, "A")));
    let b = arena.alloc(b);
    let mut schema = Schema::new(&arena, arena.alloc(a));
    schema.add_type(b.into());
    let schema = arena.alloc(schema);

    let document = assembler::marshal(schema, None).unwrap();
    assert_eq!(
        document["__types"]["B"]["fieldDefinitions"][0]["type"],
        json!({ "$ref": "#/__types/A" })
    );

    let node = assembler::unmarshal(&document, None).unwrap();
    let a = node.schema().unwrap().query_type().unwrap();
    let b = a.field_definition("b").unwrap().output_type().unwrap().object().unwrap();
    let back = b.field_definition("a").unwrap().output_type().unwrap().object().unwrap();
    assert_eq!(back, a);
    assert_eq!(back.node_id(), a.node_id());
}

#[test]
fn options_filter_introspection_types_and_directives() {
    let arena = SchemaArena::new();
    let query = arena.alloc(SchemaObject::new(&arena, "Query"));
    let mut schema = Schema::new(&arena, query).with_default_directives(&arena);
    for name in INTROSPECTION_TYPES {
        schema.add_type(arena.alloc(SchemaObject::new(&arena, name)).into());
    }
    let schema = arena.alloc(schema);

    let document = assembler::marshal(schema, None).unwrap();
    let types = document["__types"].as_object().unwrap();
    assert_eq!(types.keys().collect::<Vec<_>>(), ["Query"]);
    assert!(INTROSPECTION_TYPES
        .iter()
        .all(|name| references_to(&document, &format!("#/__types/{}", name)) == 0));
    assert!(document["__schemas"]["Query"].get("directives").is_none());

    let options = MarshalOptions::new()
        .include_introspection_types(true)
        .include_directives(true);
    let document = assembler::marshal(schema, Some(options)).unwrap();
    assert_eq!(document["__types"].as_object().unwrap().len(), 8);
    let directives = document["__schemas"]["Query"]["directives"].as_array().unwrap();
    assert_eq!(directives.len(), 2);
    assert_eq!(directives[0]["name"], json!("include"));
    assert_eq!(directives[1]["isOnField"], json!(true));
    assert_eq!(
        directives[1]["arguments"][0]["type"],
        json!({
            "__marshaled": "NonNull",
            "wrappedType": { "$ref": "#/__scalarTypes/Boolean" }
        })
    );

    let node = assembler::unmarshal(&document, Some(options)).unwrap();
    let skip = node.schema().unwrap().directive("skip").unwrap();
    assert!(skip.is_on_fragment());
    assert!(!skip.is_on_operation());
    assert_eq!(skip.argument("if").unwrap().input_type().unwrap().kind(), NodeKind::NonNull);

    let node = assembler::unmarshal(&document, None).unwrap();
    assert!(node.schema().unwrap().directives().unwrap().is_empty());
}

#[test]
fn scalars_are_shared() {
    let arena = SchemaArena::new();
    let mut query = SchemaObject::new(&arena, "Query");
    query.add_field(&arena, SchemaField::new(&arena, "hello", TypeRef::named(&arena, "String")));
    query.add_field(
        &arena,
        SchemaField::new(&arena, "world", TypeRef::non_null(&arena, TypeRef::named(&arena, "String"))),
    );
    let schema = arena.alloc(Schema::new(&arena, arena.alloc(query)));

    let document = assembler::marshal(schema, None).unwrap();
    assert_eq!(document["__scalarTypes"].as_object().unwrap().len(), 1);
    assert_eq!(references_to(&document, "#/__scalarTypes/String"), 2);
}

#[test]
fn hello_world_document() {
    let arena = SchemaArena::new();
    let mut query = SchemaObject::new(&arena, "Query");
    query.add_field(&arena, SchemaField::new(&arena, "hello", TypeRef::named(&arena, "String")));
    let schema = arena.alloc(Schema::new(&arena, arena.alloc(query)));

    let expected: Value = serde_json::from_str(indoc! {r##"
        {
          "__types": {
            "Query": {
              "__marshaled": "Object",
              "name": "Query",
              "fieldDefinitions": [
                {
                  "__marshaled": "FieldDefinition",
                  "name": "hello",
                  "type": { "$ref": "#/__scalarTypes/String" }
                }
              ]
            }
          },
          "__interfaces": {},
          "__scalarTypes": {
            "String": {
              "__marshaled": "Scalar",
              "name": "String",
              "description": "Built-in String"
            }
          },
          "__schemas": {
            "Query": {
              "__marshaled": "Schema",
              "queryType": { "$ref": "#/__types/Query" }
            }
          }
        }
    "##})
    .unwrap();

    let document = assembler::marshal(schema, None).unwrap();
    assert_eq!(document, expected);
    assert!(document["__schemas"]["Query"].get("mutationType").is_none());

    let node = assembler::unmarshal(&document, None).unwrap();
    let schema = node.schema().unwrap();
    assert!(!schema.is_supporting_mutations());
    assert_eq!(schema.query_type().unwrap().field_definitions().unwrap().len(), 1);
}

#[test]
fn field_lists_may_be_keyed_by_name() {
    let document: Value = serde_json::from_str(indoc! {r##"
        {
          "__types": {
            "Query": {
              "__marshaled": "Object",
              "name": "Query",
              "fieldDefinitions": {
                "hello": {
                  "__marshaled": "FieldDefinition",
                  "name": "hello",
                  "type": { "$ref": "#/__scalarTypes/String" }
                },
                "echo": {
                  "__marshaled": "FieldDefinition",
                  "name": "echo",
                  "type": { "$ref": "#/__scalarTypes/String" },
                  "arguments": {
                    "text": {
                      "__marshaled": "Argument",
                      "name": "text",
                      "type": { "$ref": "#/__scalarTypes/String" }
                    }
                  }
                }
              }
            }
          },
          "__scalarTypes": {
            "String": { "__marshaled": "Scalar", "name": "String" }
          },
          "__schemas": {
            "Query": {
              "__marshaled": "Schema",
              "queryType": { "$ref": "#/__types/Query" }
            }
          }
        }
    "##})
    .unwrap();

    let node = assembler::unmarshal(&document, None).unwrap();
    let query = node.schema().unwrap().query_type().unwrap();
    assert_eq!(query.field_definitions().unwrap().len(), 2);
    let text = query.field_definition("echo").unwrap().argument("text").unwrap();
    assert_eq!(text.reference().reference(), "#/__types/Query/fieldDefinitions/echo/arguments/text");
    assert_eq!(text.input_type().unwrap().name(), Some("String"));
}

#[test]
fn references_must_not_chain() {
    let document = json!({
        "__types": {
            "Query": {
                "__marshaled": "Object",
                "name": "Query",
                "fieldDefinitions": [
                    {
                        "__marshaled": "FieldDefinition",
                        "name": "hello",
                        "type": { "$ref": "#/__types/Query/fieldDefinitions/echo/type" }
                    },
                    {
                        "__marshaled": "FieldDefinition",
                        "name": "echo",
                        "type": { "$ref": "#/__scalarTypes/String" }
                    }
                ]
            }
        },
        "__scalarTypes": {
            "String": { "__marshaled": "Scalar", "name": "String" }
        },
        "__schemas": {
            "Query": { "__marshaled": "Schema", "queryType": { "$ref": "#/__types/Query" } }
        }
    });

    let error = assembler::unmarshal(&document, None).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Format);
    assert_eq!(error.context(), Some("#/__types/Query/fieldDefinitions/echo/type"));
}

#[test]
fn malformed_documents_fail() {
    let missing_tag = json!({
        "__types": { "Query": { "name": "Query" } },
        "__schemas": {
            "Query": { "__marshaled": "Schema", "queryType": { "$ref": "#/__types/Query" } }
        }
    });
    let error = assembler::unmarshal(&missing_tag, None).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Format);

    let unknown_tag = json!({
        "__types": { "Query": { "__marshaled": "Mystery", "name": "Query" } },
        "__schemas": {
            "Query": { "__marshaled": "Schema", "queryType": { "$ref": "#/__types/Query" } }
        }
    });
    let error = assembler::unmarshal(&unknown_tag, None).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::UnknownType);

    let not_an_object = json!({
        "__types": { "Query": { "__marshaled": "Scalar", "name": "Query" } },
        "__schemas": {
            "Query": { "__marshaled": "Schema", "queryType": { "$ref": "#/__types/Query" } }
        }
    });
    let error = assembler::unmarshal(&not_an_object, None).unwrap_err();
    assert_eq!(error.message(), "Expected Object, found Scalar");

    let error = assembler::unmarshal(&json!({ "name": "Query" }), None).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Format);
}

#[test]
fn static_fetchers_are_shared() {
    let arena = SchemaArena::new();
    let mut query = SchemaObject::new(&arena, "Query");
    for name in ["hello", "greeting"] {
        let mut field = SchemaField::new(&arena, name, TypeRef::named(&arena, "String"));
        field.data_fetcher = Some(arena.alloc(StaticDataFetcher::new(json!("world"))));
        query.add_field(&arena, field);
    }
    let schema = arena.alloc(Schema::new(&arena, arena.alloc(query)));

    let document = assembler::marshal(schema, None).unwrap();
    let fetchers = document["__dataFetchers"].as_object().unwrap();
    assert_eq!(fetchers.len(), 1);
    assert_eq!(fetchers["dataFetcher-0"]["__marshaled"], json!("StaticDataFetcher"));
    assert_eq!(fetchers["dataFetcher-0"]["staticValue"], json!("world"));
    assert_eq!(
        fetchers["dataFetcher-0"]["__parent"],
        json!({ "$ref": "#/__types/Query/fieldDefinitions/hello" })
    );
    assert_eq!(references_to(&document, "#/__dataFetchers/dataFetcher-0"), 2);
}

#[test]
fn behavior_is_reattached_by_id() {
    let arena = SchemaArena::new();
    let document = assembler::marshal(star_wars(&arena), None).unwrap();
    assert_eq!(document["__dataFetchers"].as_object().unwrap().len(), 2);

    let shouting = ShoutingFetcher;
    let mut context = SchemaContext::for_document(MarshalOptions::new(), &document);
    context.attach_data_fetcher("dataFetcher-0", &shouting);
    let node = unmarshal_in(context).unwrap();
    let query = node.schema().unwrap().query_type().unwrap();

    let hero = query.field_definition("hero").unwrap().data_fetcher().unwrap().unwrap();
    assert_eq!(hero.id(), "dataFetcher-0");
    assert!(hero.type_name().unwrap().ends_with("HeroFetcher"));
    assert_eq!(hero.fetch(&json!({ "name": "Luke" }), &Map::new()), json!("LUKE"));

    let greeting = query.field_definition("greeting").unwrap().data_fetcher().unwrap().unwrap();
    assert_eq!(greeting.static_value(), Some(&json!("Hello there")));
    assert_eq!(greeting.fetch(&Value::Null, &Map::new()), json!("Hello there"));

    let resolver = TypenameResolver;
    let mut node = assembler::unmarshal(&document, None).unwrap();
    node.context_mut().attach_type_resolver("typeResolver-0", &resolver);
    let character = node.schema().unwrap().get_type("Character").unwrap().interface().unwrap();
    assert_eq!(
        character.type_resolver().unwrap().unwrap().resolve_type(&json!({ "__typename": "Droid" })),
        Some("Droid".to_string())
    );
    let hero = node
        .schema()
        .unwrap()
        .query_type()
        .unwrap()
        .field_definition("hero")
        .unwrap()
        .data_fetcher()
        .unwrap()
        .unwrap();
    assert_eq!(hero.fetch(&json!({}), &Map::new()), Value::Null);
}

#[test]
fn zero_sized_fetchers_keep_their_own_behavior() {
    let arena = SchemaArena::new();
    let mut query = SchemaObject::new(&arena, "Query");
    let mut hero = SchemaField::new(&arena, "hero", TypeRef::named(&arena, "String"));
    hero.data_fetcher = Some(arena.alloc(HeroFetcher));
    query.add_field(&arena, hero);
    let mut shout = SchemaField::new(&arena, "shout", TypeRef::named(&arena, "String"));
    shout.data_fetcher = Some(arena.alloc(ShoutingFetcher));
    query.add_field(&arena, shout);
    let schema = arena.alloc(Schema::new(&arena, arena.alloc(query)));

    let document = assembler::marshal(schema, None).unwrap();
    let fetchers = document["__dataFetchers"].as_object().unwrap();
    assert_eq!(fetchers.len(), 2);
    let fields = &document["__types"]["Query"]["fieldDefinitions"];
    assert_eq!(fields[0]["dataFetcher"], json!({ "$ref": "#/__dataFetchers/dataFetcher-0" }));
    assert_eq!(fields[1]["dataFetcher"], json!({ "$ref": "#/__dataFetchers/dataFetcher-1" }));
    let class_of = |id: &str| fetchers[id]["__marshaledClass"].as_str().unwrap().to_string();
    assert!(class_of("dataFetcher-0").ends_with("HeroFetcher"));
    assert!(class_of("dataFetcher-1").ends_with("ShoutingFetcher"));
    assert_eq!(
        fetchers["dataFetcher-1"]["__parent"],
        json!({ "$ref": "#/__types/Query/fieldDefinitions/shout" })
    );

    let node = assembler::decorate(schema, None).unwrap();
    let query = node.schema().unwrap().query_type().unwrap();
    let source = json!({ "name": "Luke" });
    let hero = query.field_definition("hero").unwrap().data_fetcher().unwrap().unwrap();
    let shout = query.field_definition("shout").unwrap().data_fetcher().unwrap().unwrap();
    assert_eq!(hero.fetch(&source, &Map::new())["name"], json!("R2-D2"));
    assert_eq!(shout.fetch(&source, &Map::new()), json!("LUKE"));
}

#[test]
fn excluded_introspection_types_fail_to_marshal() {
    let arena = SchemaArena::new();
    let mut query = SchemaObject::new(&arena, "Query");
    query.add_field(&arena, SchemaField::new(&arena, "__type", TypeRef::named(&arena, "__Type")));
    let mut schema = Schema::new(&arena, arena.alloc(query));
    schema.add_type(arena.alloc(SchemaObject::new(&arena, "__Type")).into());
    let schema = arena.alloc(schema);

    let error = assembler::marshal(schema, None).unwrap_err();
    assert_eq!(error.error_type(), ErrorType::Format);
    assert_eq!(error.context(), Some("__Type"));

    let options = MarshalOptions::new().include_introspection_types(true);
    let document = assembler::marshal(schema, Some(options)).unwrap();
    assert_eq!(
        document["__types"]["Query"]["fieldDefinitions"][0]["type"],
        json!({ "$ref": "#/__types/__Type" })
    );
    let node = assembler::unmarshal(&document, Some(options)).unwrap();
    let field = node.schema().unwrap().query_type().unwrap().field_definition("__type").unwrap();
    assert_eq!(field.output_type().unwrap().name(), Some("__Type"));
}
