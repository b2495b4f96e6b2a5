//! Pipeline benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quill_codegen::{CodegenEngine, CustomCode, Dialect, GenerationOptions, MarkupDialect, StyleDialect};
use quill_core::SceneDocument;

const LANDING_PAGE: &str = include_str!("../tests/fixtures/landing_page.json");

fn generate_card(c: &mut Criterion) {
    let document = SceneDocument::from_json(LANDING_PAGE).unwrap();
    let engine = CodegenEngine::with_defaults().unwrap();
    let custom = CustomCode::default();

    let mut group = c.benchmark_group("generate_card");
    for dialect in Dialect::all() {
        let options = GenerationOptions::new(dialect.markup, dialect.style);
        let id = format!("{}/{}", dialect.markup, dialect.style);
        group.bench_with_input(BenchmarkId::from_parameter(id), &options, |b, options| {
            b.iter(|| {
                engine.cache().clear();
                engine.generate(black_box(&document), "2:2", options, &custom)
            })
        });
    }
    group.finish();
}

fn cache_hit(c: &mut Criterion) {
    let document = SceneDocument::from_json(LANDING_PAGE).unwrap();
    let engine = CodegenEngine::with_defaults().unwrap();
    let custom = CustomCode::default();
    let options = GenerationOptions::new(MarkupDialect::Componentized, StyleDialect::Utility);

    c.bench_function("cache_hit", |b| {
        b.iter(|| engine.generate(black_box(&document), "2:2", &options, &custom))
    });
}

criterion_group!(benches, generate_card, cache_hit);
criterion_main!(benches);
