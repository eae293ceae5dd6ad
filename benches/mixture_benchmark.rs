//! Benchmarks for normalization and identifier assembly.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mixfile_tools::{MInChIBuilder, MixfileComponent, Mixture, MixtureNormalizer};
use std::hint::black_box;

const INCHIS: &[&str] = &[
    "InChI=1S/H2O/h1H2",
    "InChI=1S/C2H6O/c1-2-3/h3H,2H2,1H3",
    "InChI=1S/CH4O/c1-2/h2H,1H3",
    "InChI=1S/ClH.Na/h1H;/q;+1/p-1",
];

/// A tree `depth` levels deep with `width` children per branch. Leaves carry
/// masses so the normalizer has work to do at every level.
fn synthetic(depth: usize, width: usize, seed: usize) -> MixfileComponent {
    if depth == 0 {
        return MixfileComponent::named(format!("leaf {seed}"))
            .with_inchi(INCHIS[seed % INCHIS.len()], None)
            .with_quantity((seed % 13 + 1) as f64, "g");
    }
    let mut comp = MixfileComponent::named(format!("branch {seed}"));
    for i in 0..width {
        comp = comp.with_child(synthetic(depth - 1, width, seed * width + i));
    }
    comp
}

fn benchmark_formulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("formulate");
    for depth in [2, 3, 4] {
        let mixture = Mixture::from_root(synthetic(depth, 4, 1));
        let builder = MInChIBuilder::new();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &mixture, |b, m| {
            b.iter(|| black_box(builder.formulate(black_box(m))));
        });
    }
    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for depth in [2, 3, 4] {
        let mixture = Mixture::from_root(synthetic(depth, 4, 1));
        let normalizer = MixtureNormalizer::new();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &mixture, |b, m| {
            b.iter(|| black_box(normalizer.analyse(black_box(m))));
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let json = Mixture::from_root(synthetic(4, 4, 1))
        .to_json()
        .expect("synthetic tree serializes");
    c.bench_function("parse_mixfile", |b| {
        b.iter(|| black_box(Mixture::from_json(black_box(&json))));
    });
}

criterion_group!(
    benches,
    benchmark_formulate,
    benchmark_normalize,
    benchmark_parse
);
criterion_main!(benches);
