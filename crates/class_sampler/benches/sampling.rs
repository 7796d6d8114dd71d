mod common;

use std::hint::black_box;

use class_sampler::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

const GRID_SIZES: [usize; 3] = [128, 512, 1024];
const TARGET_COUNT: usize = 1_000;

fn sampling_strategy_benches(c: &mut Criterion) {
    for strategy in [
        StrategyKind::StratifiedRandom,
        StrategyKind::EqualStratifiedRandom,
        StrategyKind::Random,
    ] {
        let mut group = c.benchmark_group(format!("sampling/{strategy}"));

        for &size in &GRID_SIZES {
            let grid = common::banded_grid(size, 8);
            let config = SamplingConfig::new(TARGET_COUNT, strategy);
            group.throughput(common::elements_throughput(grid.len()));

            let mut rng = StdRng::seed_from_u64(0xC1A55_u64 ^ size as u64);
            group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
                b.iter(|| {
                    let table = sample(&grid, &config, &mut rng).expect("sampling succeeds");
                    black_box(table.len());
                });
            });
        }

        group.finish();
    }
}

fn universe_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling/universe");

    for &size in &GRID_SIZES {
        let grid = common::banded_grid(size, 8);
        group.throughput(common::elements_throughput(grid.len()));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let universe = Universe::build(&grid, 0);
                black_box(universe.class_ratios().len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_strategy_benches, universe_benches
}
criterion_main!(benches);
