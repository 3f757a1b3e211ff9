//! Exact partition counting with a session-owned memoisation cache.
//!
//! [`PartitionCountCache`] answers `Count(total, bound)`: the number of
//! partitions of `total` whose parts are all at most `bound` (equivalently,
//! by conjugation, partitions into at most `bound` parts). Counts are
//! arbitrary-precision because they leave the 64-bit range for totals in the
//! low hundreds.
//!
//! When the `metrics` feature is enabled the cache emits:
//!
//! - `partition_count_cache_hits` (counter)
//! - `partition_count_cache_misses` (counter)
//! - `partition_count_compute_seconds` (histogram)

use std::{
    collections::{HashMap, hash_map::Entry},
    time::{Duration, Instant},
};

use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::trace;

use crate::{error::Result, partition::validate_shape};

/// Normalised cache key. Bounds above the total are clamped because they
/// admit no additional partitions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct CountKey {
    total: usize,
    bound: usize,
}

impl CountKey {
    fn new(total: usize, bound: usize) -> Self {
        Self {
            total,
            bound: bound.min(total),
        }
    }
}

/// Memoised oracle for `Count(total, bound)`.
///
/// The cache only ever grows. It is derived data and may be dropped and
/// rebuilt at any time. It is not shared between threads; each sampling
/// session owns its own instance.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
/// use partir_core::PartitionCountCache;
///
/// let mut cache = PartitionCountCache::new();
/// assert_eq!(*cache.get_or_compute(5, 2), BigUint::from(3_u32));
/// assert_eq!(*cache.get_or_compute(0, 0), BigUint::from(1_u32));
/// assert_eq!(*cache.get_or_compute(4, 0), BigUint::from(0_u32));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PartitionCountCache {
    entries: HashMap<CountKey, BigUint>,
    hits: u64,
    misses: u64,
}

impl PartitionCountCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of partitions of `total` with every part at most
    /// `bound`, computing and memoising it on first use.
    ///
    /// `Count(0, k) == 1` for every `k`, `Count(q, 0) == 0` for `q > 0` and
    /// `Count(q, k) == Count(q, q)` whenever `k >= q`.
    pub fn get_or_compute(&mut self, total: usize, bound: usize) -> &BigUint {
        let key = CountKey::new(total, bound);
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                record_hit();
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                let started = Instant::now();
                let value = compute_count(key.total, key.bound);
                let elapsed = started.elapsed();
                record_miss(elapsed);
                trace!(
                    total = key.total,
                    bound = key.bound,
                    elapsed = ?elapsed,
                    "computed partition count"
                );
                entry.insert(value)
            }
        }
    }

    /// Owned variant of [`Self::get_or_compute`].
    pub fn count(&mut self, total: usize, bound: usize) -> BigUint {
        self.get_or_compute(total, bound).clone()
    }

    /// Number of partitions of `total` into exactly `parts` positive parts.
    ///
    /// Returns zero when `parts > total`.
    ///
    /// # Errors
    /// Returns [`crate::PartitionError::ZeroParts`] when `parts == 0`.
    pub fn num_partitions(&mut self, total: usize, parts: usize) -> Result<BigUint> {
        validate_shape(total, parts, true)?;
        Ok(total
            .checked_sub(parts)
            .map_or_else(BigUint::zero, |rest| self.count(rest, parts)))
    }

    /// Number of partitions of `total` into at most `parts` positive parts,
    /// i.e. the size of the zero-padded feasible set.
    ///
    /// # Errors
    /// Returns [`crate::PartitionError::ZeroParts`] when `parts == 0`.
    pub fn num_partitions_padded(&mut self, total: usize, parts: usize) -> Result<BigUint> {
        validate_shape(total, parts, true)?;
        Ok(self.count(total, parts))
    }

    /// Size of the feasible set for the given shape and padding convention.
    pub(crate) fn feasible_set_size(
        &mut self,
        total: usize,
        parts: usize,
        zero_padding: bool,
    ) -> Result<BigUint> {
        if zero_padding {
            self.num_partitions_padded(total, parts)
        } else {
            validate_shape(total, parts, false)?;
            self.num_partitions(total, parts)
        }
    }

    /// Number of memoised `(total, bound)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been memoised yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups served from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that required computation.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Classic partition DP: start from the single all-ones partition of every
/// prefix and fold in each permitted part size `2..=bound` with
/// `p[m] += p[m - size]`.
fn compute_count(total: usize, bound: usize) -> BigUint {
    if total == 0 {
        return BigUint::one();
    }
    if bound == 0 {
        return BigUint::zero();
    }

    let mut table = vec![BigUint::one(); total + 1];
    for size in 2..=bound {
        // Process the table in blocks of `size` so every source slot of the
        // current block has already absorbed this part size.
        let mut start = size;
        while start <= total {
            let (done, rest) = table.split_at_mut(start);
            let sources = done.iter().skip(start - size);
            for (slot, source) in rest.iter_mut().take(size).zip(sources) {
                *slot += source;
            }
            start += size;
        }
    }
    table.pop().unwrap_or_else(BigUint::zero)
}

/// Counts partitions of `total` with every part at most `bound` without
/// retaining a cache.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
///
/// assert_eq!(partir_core::count(10, 3), BigUint::from(14_u32));
/// ```
#[must_use]
pub fn count(total: usize, bound: usize) -> BigUint {
    compute_count(total, bound.min(total))
}

/// Number of partitions of `total` into exactly `parts` positive parts.
///
/// # Errors
/// Returns [`crate::PartitionError::ZeroParts`] when `parts == 0`.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
///
/// assert_eq!(partir_core::num_partitions(5, 2)?, BigUint::from(2_u32));
/// assert_eq!(partir_core::num_partitions(10, 3)?, BigUint::from(8_u32));
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn num_partitions(total: usize, parts: usize) -> Result<BigUint> {
    PartitionCountCache::new().num_partitions(total, parts)
}

/// Number of unrestricted partitions of `total`, `p(total)`.
///
/// # Examples
/// ```
/// use num_bigint::BigUint;
///
/// assert_eq!(partir_core::unrestricted_partitions(5), BigUint::from(7_u32));
/// ```
#[must_use]
pub fn unrestricted_partitions(total: usize) -> BigUint {
    compute_count(total, total)
}

#[cfg(feature = "metrics")]
fn record_hit() {
    metrics::counter!("partition_count_cache_hits").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_hit() {}

#[cfg(feature = "metrics")]
fn record_miss(elapsed: Duration) {
    metrics::counter!("partition_count_cache_misses").increment(1);
    metrics::histogram!("partition_count_compute_seconds").record(elapsed.as_secs_f64());
}

#[cfg(not(feature = "metrics"))]
fn record_miss(_elapsed: Duration) {}
