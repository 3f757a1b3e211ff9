//! Uniform generator benchmarks.
//!
//! Each iteration draws a batch of partitions from a session whose count
//! cache was warmed by an initial draw, isolating per-sample decoding cost
//! from the one-off oracle work.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use partir_benches::params::{GeneratorBenchParams, SAMPLING_SHAPES};
use partir_core::{Algorithm, Method, PartitionError, Sampler};

/// Seed used for every sampling session in this benchmark.
const SEED: u64 = 42;

/// Partitions drawn per iteration.
const BATCH: usize = 16;

fn generators_impl(c: &mut Criterion) -> Result<(), PartitionError> {
    let mut group = c.benchmark_group("generators");
    group.sample_size(20);

    for &shape in SAMPLING_SHAPES {
        for algorithm in Algorithm::ALL {
            let mut sampler = Sampler::from_rng(
                SmallRng::seed_from_u64(SEED),
                Method::Fixed(algorithm),
                false,
            );
            sampler.sample(shape.total, shape.parts, BATCH)?;

            let params = GeneratorBenchParams { shape, algorithm };
            group.bench_with_input(BenchmarkId::from_parameter(params), &params, |b, input| {
                b.iter(|| sampler.sample(input.shape.total, input.shape.parts, BATCH));
            });
        }
    }

    group.finish();
    Ok(())
}

fn generators(c: &mut Criterion) {
    if let Err(err) = generators_impl(c) {
        panic!("generator benchmark setup failed: {err}");
    }
}

criterion_group!(benches, generators);
criterion_main!(benches);
