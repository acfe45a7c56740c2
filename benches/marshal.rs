#[macro_use]
extern crate bencher;

use bencher::Bencher;
use graphql_marshal::assembler;
use graphql_marshal::schema::*;

/// Builds a schema of `size` object types that all reference each other.
fn cyclic_schema(arena: &SchemaArena, size: usize) -> &Schema<'_> {
    let names: Vec<&str> = (0..size)
        .map(|index| arena.alloc_string(format!("Type{}", index)))
        .collect();

    let mut query = SchemaObject::new(arena, "Query");
    for &name in &names {
        let field = arena.alloc_string(name.to_lowercase());
        query.add_field(arena, SchemaField::new(arena, field, TypeRef::named(arena, name)));
    }
    let mut schema = Schema::new(arena, arena.alloc(query));

    for &name in &names {
        let mut object = SchemaObject::new(arena, name);
        object.add_field(
            arena,
            SchemaField::new(arena, "id", TypeRef::non_null(arena, TypeRef::named(arena, "ID"))),
        );
        for &other in &names {
            let field = arena.alloc_string(other.to_lowercase());
            let output_type = TypeRef::list(arena, TypeRef::named(arena, other));
            let mut field = SchemaField::new(arena, field, output_type);
            field.add_argument(arena, SchemaArgument::new("first", TypeRef::named(arena, "Int")));
            object.add_field(arena, field);
        }
        schema.add_type(arena.alloc(object).into());
    }
    arena.alloc(schema)
}

fn marshal_cyclic_schema(bench: &mut Bencher) {
    let arena = SchemaArena::new();
    let schema = cyclic_schema(&arena, 20);
    bench.iter(|| assembler::marshal(schema, None).unwrap());
}

fn unmarshal_cyclic_schema(bench: &mut Bencher) {
    let arena = SchemaArena::new();
    let document = assembler::marshal(cyclic_schema(&arena, 20), None).unwrap();
    bench.iter(|| assembler::unmarshal(&document, None).unwrap().schema().is_ok());
}

fn round_trip_cyclic_schema(bench: &mut Bencher) {
    let arena = SchemaArena::new();
    let document = assembler::marshal(cyclic_schema(&arena, 20), None).unwrap();
    bench.iter(|| {
        assembler::unmarshal(&document, None)
            .and_then(|node| node.to_json())
            .unwrap()
    });
}

benchmark_group!(
    marshal,
    marshal_cyclic_schema,
    unmarshal_cyclic_schema,
    round_trip_cyclic_schema
);

benchmark_main!(marshal);
