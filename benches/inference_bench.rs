//! Benchmarks for schema inference and SQL rendering
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use json2sql::inference::{infer_type, is_timestamp};
use json2sql::{Dialect, SQLExporter, infer_schema};
use serde_json::{Value, json};

/// Generate an API-style response with nested arrays and objects
fn generate_document(count: usize) -> Value {
    let users: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": i,
                "email": format!("user{}@example.com", i),
                "name": format!("User {}", i),
                "balance": 1000.0 + (i as f64 * 10.5),
                "is_active": i % 2 == 0,
                "created_at": "2024-01-15T10:30:00Z",
                "address": {"city": "Berlin", "zip": format!("{:05}", i % 100000)},
                "tags": ["a", "b", "c"],
                "orders": [{"sku": format!("SKU-{}", i), "qty": i % 7}]
            })
        })
        .collect();
    json!({"page": 1, "total": count, "users": users})
}

fn bench_type_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("type_inference");

    let test_cases = vec![
        ("integer", json!(42)),
        ("decimal", json!(3.25)),
        ("short_string", json!("hello world")),
        ("email", json!("user@example.com")),
        ("datetime", json!("2024-01-15T10:30:00Z")),
        ("long_string", json!("x".repeat(400))),
    ];

    for (name, value) in &test_cases {
        group.bench_with_input(BenchmarkId::new("infer_type", name), value, |b, value| {
            b.iter(|| black_box(infer_type(value)));
        });
    }

    group.bench_function("is_timestamp_miss", |b| {
        b.iter(|| black_box(is_timestamp("not a date at all")));
    });

    group.finish();
}

fn bench_schema_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_inference");

    for count in [10, 100, 1000].iter() {
        let document = generate_document(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(
            BenchmarkId::new("infer_schema", count),
            &document,
            |b, document| {
                b.iter(|| black_box(infer_schema(document)));
            },
        );
    }

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let schema = infer_schema(&generate_document(1000));

    for dialect in Dialect::ALL {
        let exporter = SQLExporter::new(dialect);
        group.bench_function(BenchmarkId::new("render", dialect), |b| {
            b.iter(|| black_box(exporter.render(&schema)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_type_inference,
    bench_schema_inference,
    bench_rendering
);
criterion_main!(benches);
