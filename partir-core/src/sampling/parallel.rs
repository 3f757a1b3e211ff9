//! Embarrassingly parallel replication of sampling sessions.
//!
//! The sample is split into fixed-size chunks. Each chunk runs in its own
//! [`Sampler`] with a private count cache and an RNG derived from the caller's
//! seed and the chunk index, so output depends only on the seed and never on
//! the Rayon thread count or scheduling.

use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use tracing::instrument;

use crate::{error::Result, partition::Partition};

use super::sampler::{SampleRequest, Sampler};

/// Number of partitions drawn by one worker session.
pub const PARALLEL_CHUNK_SIZE: usize = 64;

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Draws the sample described by `request` across the Rayon thread pool.
///
/// # Errors
/// Returns the first error reported by any worker session.
///
/// # Examples
/// ```
/// use partir_core::{Method, SampleRequest, sample_parallel};
///
/// let request = SampleRequest::new(60, 6, 200, Method::Best, false)?;
/// let first = sample_parallel(&request, 11)?;
/// let second = sample_parallel(&request, 11)?;
/// assert_eq!(first.len(), 200);
/// assert_eq!(first, second);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
#[instrument(
    name = "core.sample_parallel",
    err,
    skip(request),
    fields(
        total = request.total(),
        parts = request.parts(),
        sample_size = request.sample_size().get(),
        method = %request.method(),
    ),
)]
pub fn sample_parallel(request: &SampleRequest, seed: u64) -> Result<Vec<Partition>> {
    let chunks = chunk_sizes(request.sample_size());
    let drawn = chunks
        .into_par_iter()
        .enumerate()
        .map(|(index, size)| {
            let rng = SmallRng::seed_from_u64(chunk_seed(seed, index));
            let mut sampler = Sampler::from_rng(rng, request.method(), request.zero_padding());
            sampler.sample_request(&request.with_sample_size(size))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(drawn.into_iter().flatten().collect())
}

fn chunk_sizes(sample_size: NonZeroUsize) -> Vec<NonZeroUsize> {
    let total = sample_size.get();
    (0..total)
        .step_by(PARALLEL_CHUNK_SIZE)
        .filter_map(|start| NonZeroUsize::new(PARALLEL_CHUNK_SIZE.min(total - start)))
        .collect()
}

fn chunk_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_add(1).wrapping_mul(SEED_STRIDE)
}
