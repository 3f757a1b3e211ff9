//! Uniform random partition generators and the sampling dispatcher.
//!
//! Sampling draws a rank uniformly from `1..=NumPartitions` and decodes it
//! into exactly one partition, so there is no rejection step. Decoding works
//! in conjugate space: the generators emit non-increasing column heights
//! bounded by `parts`, and a single conjugation at the end yields the
//! canonical partition with `parts` rows.

mod bottom_up;
mod construction;
mod divide_and_conquer;
mod method;
mod multiplicity;
#[cfg(feature = "parallel")]
mod parallel;
mod sampler;
mod top_down;


pub use self::method::{Algorithm, BEST_SMALL_TOTAL, Method};
#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub use self::parallel::{PARALLEL_CHUNK_SIZE, sample_parallel};
pub use self::sampler::{SampleRequest, Sampler, SamplerBuilder, sample};
