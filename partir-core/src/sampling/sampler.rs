//! The sampling dispatcher and its configuration surface.

use std::num::NonZeroUsize;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{
    count::PartitionCountCache,
    error::{PartitionError, Result},
    partition::{Partition, validate_shape},
};

use super::{
    bottom_up,
    construction::Construction,
    divide_and_conquer,
    method::{Algorithm, Method},
    multiplicity, top_down,
};

/// A validated sampling request.
///
/// # Examples
/// ```
/// use partir_core::{Method, SampleRequest};
///
/// let request = SampleRequest::new(100, 20, 50, Method::Best, true)?;
/// assert_eq!(request.sample_size().get(), 50);
/// assert!(SampleRequest::new(3, 5, 1, Method::Best, false).is_err());
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SampleRequest {
    total: usize,
    parts: usize,
    sample_size: NonZeroUsize,
    method: Method,
    zero_padding: bool,
}

impl SampleRequest {
    /// Validates and builds a request.
    ///
    /// # Errors
    /// Returns [`PartitionError::ZeroParts`] when `parts == 0`,
    /// [`PartitionError::PartsExceedTotal`] when `parts > total` without zero
    /// padding, and [`PartitionError::EmptySample`] when `sample_size == 0`.
    pub fn new(
        total: usize,
        parts: usize,
        sample_size: usize,
        method: Method,
        zero_padding: bool,
    ) -> Result<Self> {
        validate_shape(total, parts, zero_padding)?;
        let sample_size = NonZeroUsize::new(sample_size).ok_or(PartitionError::EmptySample)?;
        Ok(Self {
            total,
            parts,
            sample_size,
            method,
            zero_padding,
        })
    }

    /// Total every sampled partition sums to.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Length of every sampled partition.
    #[must_use]
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Number of partitions to draw.
    #[must_use]
    pub fn sample_size(&self) -> NonZeroUsize {
        self.sample_size
    }

    /// Requested sampling method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Whether trailing zero parts are permitted.
    #[must_use]
    pub fn zero_padding(&self) -> bool {
        self.zero_padding
    }

    /// Concrete algorithm this request runs with.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.method.resolve(self.total, self.parts)
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn with_sample_size(mut self, sample_size: NonZeroUsize) -> Self {
        self.sample_size = sample_size;
        self
    }
}

/// Configures and constructs [`Sampler`] instances.
///
/// # Examples
/// ```
/// use partir_core::{Algorithm, Method, SamplerBuilder};
///
/// let mut sampler = SamplerBuilder::new()
///     .with_method(Method::Fixed(Algorithm::TopDown))
///     .with_zero_padding(true)
///     .with_seed(7)
///     .build();
/// let sample = sampler.sample(10, 4, 3)?;
/// assert_eq!(sample.len(), 3);
/// assert!(sample.iter().all(|p| p.len() == 4 && p.total() == 10));
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SamplerBuilder {
    method: Method,
    zero_padding: bool,
    seed: Option<u64>,
}

impl SamplerBuilder {
    /// Creates a builder using [`Method::Best`], no zero padding and an
    /// entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the sampling method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Permits trailing zero parts.
    #[must_use]
    pub fn with_zero_padding(mut self, zero_padding: bool) -> Self {
        self.zero_padding = zero_padding;
        self
    }

    /// Seeds the RNG for reproducible samples.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns whether zero padding is enabled.
    #[must_use]
    pub fn zero_padding(&self) -> bool {
        self.zero_padding
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Builds a sampler with a fresh count cache.
    #[must_use]
    pub fn build(self) -> Sampler<SmallRng> {
        let rng = self
            .seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        Sampler::from_rng(rng, self.method, self.zero_padding)
    }
}

/// A sampling session: an RNG, a method and the count cache they share.
///
/// The cache lives exactly as long as the session. Run independent sessions
/// on separate threads rather than sharing one.
#[derive(Debug)]
pub struct Sampler<R = SmallRng> {
    cache: PartitionCountCache,
    rng: R,
    method: Method,
    zero_padding: bool,
}

impl<R: Rng> Sampler<R> {
    /// Wraps an existing RNG.
    pub fn from_rng(rng: R, method: Method, zero_padding: bool) -> Self {
        Self {
            cache: PartitionCountCache::new(),
            rng,
            method,
            zero_padding,
        }
    }

    /// Sampling method used by [`Self::sample`].
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Whether samples may contain trailing zeros.
    #[must_use]
    pub fn zero_padding(&self) -> bool {
        self.zero_padding
    }

    /// The session's count cache.
    #[must_use]
    pub fn cache(&self) -> &PartitionCountCache {
        &self.cache
    }

    /// Draws `sample_size` independent uniform partitions of `total` into
    /// `parts` parts.
    ///
    /// # Errors
    /// Returns the validation errors of [`SampleRequest::new`].
    pub fn sample(
        &mut self,
        total: usize,
        parts: usize,
        sample_size: usize,
    ) -> Result<Vec<Partition>> {
        let request = SampleRequest::new(total, parts, sample_size, self.method, self.zero_padding)?;
        self.sample_request(&request)
    }

    /// Draws the sample described by `request`, ignoring the session's own
    /// method and padding settings.
    ///
    /// # Errors
    /// Returns [`PartitionError::InvariantViolation`] only if rank decoding
    /// goes out of range, which indicates a bug.
    #[instrument(
        name = "core.sample",
        err,
        skip(self, request),
        fields(
            total = request.total,
            parts = request.parts,
            sample_size = request.sample_size.get(),
            method = %request.method,
            zero_padding = request.zero_padding,
        ),
    )]
    pub fn sample_request(&mut self, request: &SampleRequest) -> Result<Vec<Partition>> {
        let algorithm = request.algorithm();
        if request.method == Method::Best {
            debug!(%algorithm, "best method resolved");
        }
        let available =
            self.cache
                .feasible_set_size(request.total, request.parts, request.zero_padding)?;
        let upper = &available + 1_u32;
        let lower = BigUint::one();

        let mut sample = Vec::with_capacity(request.sample_size.get());
        for _ in 0..request.sample_size.get() {
            let rank = self.rng.gen_biguint_range(&lower, &upper);
            sample.push(decode_rank(
                &mut self.cache,
                request.total,
                request.parts,
                request.zero_padding,
                rank,
                algorithm,
            )?);
        }
        Ok(sample)
    }

    /// Draws a single partition using the session's settings.
    ///
    /// # Errors
    /// Returns the validation errors of [`SampleRequest::new`].
    pub fn draw(&mut self, total: usize, parts: usize) -> Result<Partition> {
        let mut sample = self.sample(total, parts, 1)?;
        sample.pop().ok_or(PartitionError::InvariantViolation {
            invariant: "single draw produced no partition",
        })
    }

    /// Decodes `rank` (1-based) with `algorithm`, using the session's padding
    /// convention and cache.
    ///
    /// Every algorithm maps `1..=NumPartitions` bijectively onto the feasible
    /// set, which makes exhaustive validation possible for small inputs.
    ///
    /// # Errors
    /// Returns shape validation errors and [`PartitionError::RankOutOfRange`]
    /// when `rank` is zero or exceeds the feasible set size.
    pub fn decode(
        &mut self,
        total: usize,
        parts: usize,
        rank: &BigUint,
        algorithm: Algorithm,
    ) -> Result<Partition> {
        let available = self
            .cache
            .feasible_set_size(total, parts, self.zero_padding)?;
        if rank.is_zero() || *rank > available {
            return Err(PartitionError::RankOutOfRange {
                rank: rank.clone(),
                available,
            });
        }
        decode_rank(
            &mut self.cache,
            total,
            parts,
            self.zero_padding,
            rank.clone(),
            algorithm,
        )
    }
}

fn decode_rank(
    cache: &mut PartitionCountCache,
    total: usize,
    parts: usize,
    zero_padding: bool,
    rank: BigUint,
    algorithm: Algorithm,
) -> Result<Partition> {
    let mut state = Construction::new(total, parts, zero_padding, rank);
    match algorithm {
        Algorithm::BottomUp => bottom_up::decode(cache, &mut state)?,
        Algorithm::TopDown => top_down::decode(cache, &mut state)?,
        Algorithm::DivideAndConquer => divide_and_conquer::decode(cache, &mut state)?,
        Algorithm::Multiplicity => multiplicity::decode(cache, &mut state)?,
    }
    state.finish(parts)
}

/// Draws `sample_size` uniform partitions of `total` into `parts` parts with
/// an entropy-seeded RNG and a fresh cache.
///
/// # Errors
/// Returns the validation errors of [`SampleRequest::new`].
///
/// # Examples
/// ```
/// use partir_core::Method;
///
/// let sample = partir_core::sample(100, 20, 50, Method::Best, true)?;
/// assert_eq!(sample.len(), 50);
/// assert!(sample.iter().all(|p| p.len() == 20 && p.total() == 100));
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
pub fn sample(
    total: usize,
    parts: usize,
    sample_size: usize,
    method: Method,
    zero_padding: bool,
) -> Result<Vec<Partition>> {
    let request = SampleRequest::new(total, parts, sample_size, method, zero_padding)?;
    SamplerBuilder::new()
        .with_method(method)
        .with_zero_padding(zero_padding)
        .build()
        .sample_request(&request)
}
