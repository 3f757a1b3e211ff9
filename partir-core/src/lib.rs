//! Exact counting, uniform sampling and lexical enumeration of integer
//! partitions.
//!
//! The crate answers three questions about the partitions of a total `Q`
//! into exactly `N` positive parts (or at most `N` parts, zero padded):
//!
//! - how many there are ([`num_partitions`], [`PartitionCountCache`]);
//! - what a uniformly random one looks like ([`Sampler`], [`sample`]);
//! - what they all are, in lexical order ([`feasible_set`], [`LexicalCursor`]).
//!
//! Sampling never rejects. Each draw picks a rank uniformly from the
//! feasible set and decodes it with one of four [`Algorithm`]s, all of which
//! share a single arbitrary-precision count cache per session.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod count;
mod error;
mod lexical;
mod partition;
mod sampling;
#[cfg(test)]
mod test_utils;

pub use num_bigint::BigUint;

pub use crate::{
    count::{PartitionCountCache, count, num_partitions, unrestricted_partitions},
    error::{ErrorKind, PartitionError, PartitionErrorCode, Result},
    lexical::{
        LexicalCursor, LexicalPartitions, distinct_partitions, feasible_set, first,
        first_with_largest, last, last_with_largest, min_max, next_partition, partitions,
    },
    partition::{Partition, conjugate},
    sampling::{Algorithm, BEST_SMALL_TOTAL, Method, SampleRequest, Sampler, SamplerBuilder, sample},
};

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub use crate::sampling::{PARALLEL_CHUNK_SIZE, sample_parallel};
