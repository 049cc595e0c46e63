//! Criterion benchmarks for dtwarp-batch: pairwise matrix and warped mean.

use criterion::{Criterion, criterion_group, criterion_main};

use dtwarp_batch::{WarpedMeanConfig, dtw_distance, pairwise};
use dtwarp_core::Sequence;

fn make_sine_sequence(n: usize, phase: f32) -> Sequence {
    let values: Vec<f32> = (0..n).map(|i| (i as f32 * 0.1 + phase).sin()).collect();
    Sequence::new(values).unwrap()
}

fn bench_pairwise(c: &mut Criterion) {
    let data: Vec<Sequence> = (0..50)
        .map(|i| make_sine_sequence(128 + i, i as f32 * 0.2))
        .collect();
    let views: Vec<_> = data.iter().map(Sequence::as_view).collect();

    c.bench_function("pairwise_50x128", |b| {
        b.iter(|| pairwise(&views, dtw_distance));
    });
}

fn bench_warped_mean(c: &mut Criterion) {
    let data: Vec<Sequence> = (0..20)
        .map(|i| make_sine_sequence(128, i as f32 * 0.1))
        .collect();
    let views: Vec<_> = data.iter().map(Sequence::as_view).collect();
    let config = WarpedMeanConfig::new();

    c.bench_function("warped_mean_20x128", |b| {
        b.iter(|| config.compute(&views).unwrap());
    });
}

criterion_group!(benches, bench_pairwise, bench_warped_mean);
criterion_main!(benches);
