use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jdl_core::ast::{
    JdlEntity, JdlField, JdlObject, JdlOption, JdlRelationship, JdlValidation, RelationshipType,
};
use jdl_core::{convert, validate, ConvertArgs, ValidationMode};

// ============================================================================
// Test Data: Generated Graphs
// ============================================================================

const SHOP_JSON: &str = include_str!("../tests/fixtures/shop.json");

/// A graph of `size` entities chained by one-to-many relationships, each with
/// a handful of validated fields, plus wildcard options.
fn generate_graph(size: usize) -> JdlObject {
    let mut jdl_object = JdlObject::new();
    for i in 0..size {
        let mut entity = JdlEntity::new(format!("Entity{i}")).with_comment("Generated entity");
        for j in 0..5 {
            let mut field = JdlField::new(format!("field{j}"), "String");
            field.add_validation(JdlValidation::new("required"));
            field.add_validation(JdlValidation::with_value("maxlength", 255));
            entity.add_field(field);
        }
        jdl_object.add_entity(entity);
        if i > 0 {
            jdl_object.add_relationship(
                JdlRelationship::new(
                    format!("Entity{}", i - 1),
                    format!("Entity{i}"),
                    RelationshipType::OneToMany,
                )
                .with_injected_fields(Some("children"), Some("parent(field0)")),
            );
        }
    }
    jdl_object.add_option(JdlOption::new("dto", ["*"]).with_value("mapstruct"));
    jdl_object.add_option(JdlOption::new("filter", ["*"]));
    jdl_object.add_option(
        JdlOption::new("search", ["*"])
            .with_value("elasticsearch")
            .excluding(["Entity0"]),
    );
    jdl_object
}

// ============================================================================
// Validation Benchmarks
// ============================================================================

fn bench_validation_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation_entity_scaling");
    for size in [10, 50, 100, 500] {
        let jdl_object = generate_graph(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &jdl_object, |b, graph| {
            b.iter(|| validate(black_box(graph), ValidationMode::Aggregate))
        });
    }
    group.finish();
}

// ============================================================================
// Conversion Benchmarks
// ============================================================================

fn bench_convert_shop(c: &mut Criterion) {
    let jdl_object: JdlObject = serde_json::from_str(SHOP_JSON).unwrap();
    c.bench_function("convert_shop", |b| {
        b.iter(|| convert(ConvertArgs::new(black_box(&jdl_object), "shop", "sql")))
    });
}

fn bench_convert_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_entity_scaling");
    for size in [10, 50, 100, 500] {
        let jdl_object = generate_graph(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &jdl_object, |b, graph| {
            b.iter(|| convert(ConvertArgs::new(black_box(graph), "app", "sql")))
        });
    }
    group.finish();
}

fn bench_convert_with_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_with_json_serialization");
    for size in [10, 100] {
        let jdl_object = generate_graph(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &jdl_object, |b, graph| {
            b.iter(|| {
                let result = convert(ConvertArgs::new(black_box(graph), "app", "sql")).unwrap();
                result.to_json()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_validation_scaling,
    bench_convert_shop,
    bench_convert_scaling,
    bench_convert_with_serialization,
);
criterion_main!(benches);
