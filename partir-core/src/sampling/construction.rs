//! Shared state for rank decoding in conjugate space.
//!
//! Every generator builds the conjugate of the target partition: a list of
//! non-increasing "columns" each at most `parts`. When zero padding is
//! disabled the first column is `parts` itself, which forces the conjugate
//! back to exactly `parts` positive rows.

use num_bigint::BigUint;
use num_traits::CheckedSub;

use crate::{
    count::PartitionCountCache,
    error::{PartitionError, Result},
    partition::{Partition, conjugate_parts},
};

#[derive(Debug)]
pub(crate) struct Construction {
    remaining: usize,
    bound: usize,
    rank: BigUint,
    columns: Vec<usize>,
}

impl Construction {
    /// Starts decoding `rank` into a partition of `total` with `parts` rows.
    ///
    /// The caller guarantees `1 <= rank <= feasible set size` and that the
    /// shape has been validated.
    pub(crate) fn new(total: usize, parts: usize, zero_padding: bool, rank: BigUint) -> Self {
        let (remaining, columns) = if zero_padding {
            (total, Vec::new())
        } else {
            (total - parts, vec![parts])
        };
        Self {
            remaining,
            bound: parts.min(remaining),
            rank,
            columns,
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.remaining
    }

    pub(crate) fn bound(&self) -> usize {
        self.bound
    }

    pub(crate) fn rank(&self) -> &BigUint {
        &self.rank
    }

    pub(crate) fn rank_mut(&mut self) -> &mut BigUint {
        &mut self.rank
    }

    /// Skips the partitions whose next column is smaller than `value`, i.e.
    /// `Count(remaining, value - 1)` of them.
    pub(crate) fn skip_smaller_columns(
        &mut self,
        cache: &mut PartitionCountCache,
        value: usize,
    ) -> Result<()> {
        let skipped = cache.get_or_compute(self.remaining, value - 1);
        self.rank = subtract(&self.rank, skipped, "rank offset exceeds remaining rank")?;
        Ok(())
    }

    /// Appends `copies` columns of height `value`.
    ///
    /// The next column may not exceed `value` nor the new remaining total.
    pub(crate) fn take(&mut self, value: usize, copies: usize) -> Result<()> {
        let consumed = value
            .checked_mul(copies)
            .ok_or(PartitionError::InvariantViolation {
                invariant: "column total overflowed",
            })?;
        self.remaining =
            self.remaining
                .checked_sub(consumed)
                .ok_or(PartitionError::InvariantViolation {
                    invariant: "columns exceed the remaining total",
                })?;
        self.columns.extend(std::iter::repeat_n(value, copies));
        self.bound = value.min(self.remaining);
        Ok(())
    }

    /// Tightens the bound on the next column.
    pub(crate) fn restrict_bound(&mut self, bound: usize) {
        self.bound = self.bound.min(bound);
    }

    /// Conjugates the columns and pads the result to `parts` rows.
    pub(crate) fn finish(self, parts: usize) -> Result<Partition> {
        if self.remaining != 0 {
            return Err(PartitionError::InvariantViolation {
                invariant: "decoding stopped before consuming the total",
            });
        }
        let rows = conjugate_parts(&self.columns);
        if rows.len() > parts {
            return Err(PartitionError::InvariantViolation {
                invariant: "decoded partition has too many parts",
            });
        }
        Ok(Partition::from_canonical(rows).pad_zeros(parts))
    }
}

pub(crate) fn subtract(
    minuend: &BigUint,
    subtrahend: &BigUint,
    invariant: &'static str,
) -> Result<BigUint> {
    minuend
        .checked_sub(subtrahend)
        .ok_or(PartitionError::InvariantViolation { invariant })
}
