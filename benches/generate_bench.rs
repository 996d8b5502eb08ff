//! Benchmarks for dataset generation and statement rendering.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use twitter_data_gen::{GenConfig, Generator, RenderConfig, Renderer, Scale};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for scale in [Scale::Tiny, Scale::Small] {
        let config = GenConfig::for_scale(scale);
        group.bench_with_input(
            BenchmarkId::new("scale", scale.to_string()),
            &config,
            |b, config| {
                b.iter(|| {
                    let data = Generator::new(42, config.clone()).generate().unwrap();
                    black_box(data.total_rows())
                })
            },
        );
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let data = Generator::new(42, GenConfig::for_scale(Scale::Small))
        .generate()
        .unwrap();
    let tables = data.tables();
    group.throughput(Throughput::Elements(data.total_rows() as u64));

    let renderer = Renderer::new(RenderConfig::mysql());
    group.bench_function("mysql_small", |b| {
        b.iter(|| black_box(renderer.render_to_string(black_box(&tables)).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_render);
criterion_main!(benches);
