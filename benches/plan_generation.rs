use std::hint::black_box;

use autocrud::generator::{GenerationOptions, Generator};
use autocrud::model::{ModelName, ModelSpec};
use criterion::{criterion_group, criterion_main, Criterion};

fn columns() -> Vec<String> {
    [
        "id",
        "title",
        "slug",
        "summary",
        "price",
        "cover_img",
        "gallery_img",
        "promo_vid",
        "jingle_aud",
        "manual_doc",
        "created_at",
        "updated_at",
        "deleted_at",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn bench_classify(c: &mut Criterion) {
    let generator = Generator::default();
    let columns = columns();
    c.bench_function("classify_columns", |b| {
        b.iter(|| generator.classifier().classify_all(black_box(&columns)))
    });
}

fn bench_plan(c: &mut Criterion) {
    let generator = Generator::default();
    let name = ModelName::parse("Product").unwrap_or_else(|e| panic!("{e}"));
    let spec = ModelSpec::detect(name, columns(), generator.classifier());
    let classified = generator.classify(&spec);

    let mut group = c.benchmark_group("plan");
    for (label, use_service_layer) in [("direct", false), ("service", true)] {
        let options = GenerationOptions {
            use_service_layer,
            with_support_traits: true,
        };
        group.bench_function(label, |b| {
            b.iter(|| generator.plan(black_box(&classified), options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_plan);
criterion_main!(benches);
