//! Benchmarks for documentation-comment ID generation and resolution.
//!
//! Covers:
//! - Declaration IDs for simple, generic and overloaded members
//! - Reference IDs for constructed, array and pointer types
//! - Resolving declaration and reference IDs back to symbols
//! - Batch encoding of a whole graph

extern crate docscope;

use criterion::{criterion_group, criterion_main, Criterion};
use docscope::prelude::*;
use std::hint::black_box;

struct Graph {
    registry: SymbolRegistry,
    add: SymbolRc,
    convert: SymbolRc,
    lookup: SymbolRc,
}

/// `System.Collections.Generic` with a handful of types, plus 200 filler classes
fn build_graph() -> Graph {
    let registry = SymbolRegistry::new(Language::CSharp);
    let int32 = registry.primitive(PrimitiveKind::Int32).unwrap();
    let string = registry.primitive(PrimitiveKind::String).unwrap();
    let generic = registry.namespace_path("System.Collections.Generic").unwrap();

    let mut list_builder = registry.named_type(&generic, "List");
    let t = list_builder.type_parameter("T");
    let list = list_builder.build().unwrap();
    let add = registry.method(&list, "Add").parameter("item", &t).build().unwrap();
    registry
        .method(&list, "Add")
        .parameter("item", &t)
        .parameter("index", &int32)
        .build()
        .unwrap();

    let mut convert_builder = registry.method(&list, "ConvertAll");
    let output = convert_builder.type_parameter("TOutput");
    let list_of_output = registry.construct(&list, &[output.clone()]).unwrap();
    let convert = convert_builder
        .parameter("converter", &output)
        .returns(&list_of_output)
        .build()
        .unwrap();

    let dictionary = registry
        .named_type(&generic, "Dictionary")
        .type_parameters(&["TKey", "TValue"])
        .build()
        .unwrap();
    let list_of_int = registry.construct(&list, &[int32.clone()]).unwrap();
    let jagged = registry
        .create_array_type(&registry.create_array_type(&list_of_int, 1).unwrap(), 2)
        .unwrap();
    let lookup = registry.construct(&dictionary, &[string, jagged]).unwrap();

    let filler = registry.namespace_path("Filler").unwrap();
    for i in 0..200 {
        let class = registry.named_type(&filler, &format!("Type{i}")).build().unwrap();
        registry.field(&class, "value", Some(&int32)).unwrap();
        registry.method(&class, "Run").parameter("n", &int32).build().unwrap();
    }

    Graph {
        registry,
        add,
        convert,
        lookup,
    }
}

/// Benchmark generating the ID of a method with a type parameter.
/// ID: M:System.Collections.Generic.List`1.Add(`0)
fn bench_declaration_id_simple(c: &mut Criterion) {
    let graph = build_graph();

    c.bench_function("docid_declaration_simple", |b| {
        b.iter(|| {
            let id = docid::create_declaration_id(&graph.registry, black_box(&graph.add)).unwrap();
            black_box(id)
        });
    });
}

/// Benchmark generating the ID of a generic method returning a constructed type.
fn bench_declaration_id_generic_method(c: &mut Criterion) {
    let graph = build_graph();

    c.bench_function("docid_declaration_generic_method", |b| {
        b.iter(|| {
            let id =
                docid::create_declaration_id(&graph.registry, black_box(&graph.convert)).unwrap();
            black_box(id)
        });
    });
}

/// Benchmark generating the reference ID of a nested constructed type.
/// ID: System.Collections.Generic.Dictionary{System.String,System.Collections.Generic.List{System.Int32}[][,]}
fn bench_reference_id_constructed(c: &mut Criterion) {
    let graph = build_graph();

    c.bench_function("docid_reference_constructed", |b| {
        b.iter(|| {
            let id = docid::create_reference_id(&graph.registry, black_box(&graph.lookup)).unwrap();
            black_box(id)
        });
    });
}

/// Benchmark resolving an overloaded method, both overloads are candidates.
fn bench_resolve_overload(c: &mut Criterion) {
    let graph = build_graph();
    let id = docid::create_declaration_id(&graph.registry, &graph.add).unwrap();

    c.bench_function("docid_resolve_overload", |b| {
        b.iter(|| {
            let symbols = docid::get_symbols_for_declaration_id(black_box(&id), &graph.registry);
            black_box(symbols)
        });
    });
}

/// Benchmark resolving a reference ID that constructs generic and array types.
fn bench_resolve_constructed(c: &mut Criterion) {
    let graph = build_graph();
    let id = docid::create_reference_id(&graph.registry, &graph.lookup).unwrap();

    c.bench_function("docid_resolve_constructed", |b| {
        b.iter(|| {
            let symbols = docid::get_symbols_for_reference_id(black_box(&id), &graph.registry);
            black_box(symbols)
        });
    });
}

/// Benchmark resolving an ID whose first path segment does not exist.
fn bench_resolve_miss(c: &mut Criterion) {
    let graph = build_graph();

    c.bench_function("docid_resolve_miss", |b| {
        b.iter(|| {
            let symbols = docid::get_symbols_for_declaration_id(
                black_box("M:NoSuchType.NoSuchMethod(System.Int32)"),
                &graph.registry,
            );
            black_box(symbols)
        });
    });
}

/// Benchmark encoding every declaration of the graph in parallel.
fn bench_batch_declaration_ids(c: &mut Criterion) {
    let graph = build_graph();
    let symbols = graph.registry.declarations();
    let codec = DocIdCodec::default();

    c.bench_function("docid_batch_declarations", |b| {
        b.iter(|| {
            let ids = codec.create_declaration_ids(&graph.registry, black_box(&symbols));
            black_box(ids)
        });
    });
}

criterion_group!(
    benches,
    bench_declaration_id_simple,
    bench_declaration_id_generic_method,
    bench_reference_id_constructed,
    bench_resolve_overload,
    bench_resolve_constructed,
    bench_resolve_miss,
    bench_batch_declaration_ids,
);
criterion_main!(benches);
