#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use std::collections::HashMap;

use partir_core::{Algorithm, Method, Partition, Sampler};
use partir_test_support::ci::run_profile::TestRunProfile;
use rand::{SeedableRng, rngs::SmallRng};

const DEFAULT_DRAWS: usize = 10_000;

/// Draws per generator for the distribution suites, scaled by
/// `PARTIR_STAT_DRAWS`.
#[must_use]
pub fn draws() -> usize {
    TestRunProfile::new(1, false, DEFAULT_DRAWS).from_env().draws()
}

/// Builds a seeded session pinned to `algorithm`.
#[must_use]
pub fn seeded_sampler(algorithm: Algorithm, seed: u64, zero_padding: bool) -> Sampler<SmallRng> {
    Sampler::from_rng(
        SmallRng::seed_from_u64(seed),
        Method::Fixed(algorithm),
        zero_padding,
    )
}

/// Counts how often each member of `feasible` appears in `sample`.
///
/// # Panics
/// Panics when the sample contains a partition outside `feasible`.
#[must_use]
pub fn tally(feasible: &[Partition], sample: &[Partition]) -> Vec<u64> {
    let index: HashMap<&Partition, usize> = feasible
        .iter()
        .enumerate()
        .map(|(position, partition)| (partition, position))
        .collect();
    let mut counts = vec![0_u64; feasible.len()];
    for partition in sample {
        let position = index
            .get(partition)
            .copied()
            .unwrap_or_else(|| panic!("{partition} is outside the feasible set"));
        counts[position] += 1;
    }
    counts
}
