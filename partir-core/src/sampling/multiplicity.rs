//! Multiplicity rank decoding.
//!
//! Finds the next column height like Top-Down, then decides in one nested
//! search how many times that height repeats. Partitions with largest column
//! `k` are ordered by the multiplicity `f` of `k`; each multiplicity owns
//! `Count(remaining - k * f, k - 1)` ranks. Pays off when few distinct heights
//! carry large multiplicities.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    count::PartitionCountCache,
    error::{PartitionError, Result},
};

use super::construction::{Construction, subtract};

pub(super) fn decode(cache: &mut PartitionCountCache, state: &mut Construction) -> Result<()> {
    while state.remaining() > 0 {
        let remaining = state.remaining();
        let mut value = state.bound();
        while value > 1 && cache.get_or_compute(remaining, value - 1) >= state.rank() {
            value -= 1;
        }
        state.skip_smaller_columns(cache, value)?;
        if value == 1 {
            state.take(1, remaining)?;
            break;
        }
        let copies = multiplicity_of(cache, remaining, value, state.rank_mut())?;
        state.take(value, copies)?;
        state.restrict_bound(value - 1);
    }
    Ok(())
}

/// Selects how many columns of height `value` open the remaining partition
/// and reduces `rank` to a rank among partitions of what is left.
fn multiplicity_of(
    cache: &mut PartitionCountCache,
    remaining: usize,
    value: usize,
    rank: &mut BigUint,
) -> Result<usize> {
    let mut skipped = BigUint::zero();
    let mut copies = 1;
    loop {
        let rest = value
            .checked_mul(copies)
            .and_then(|consumed| remaining.checked_sub(consumed))
            .ok_or(PartitionError::InvariantViolation {
                invariant: "multiplicity search exceeded the remaining total",
            })?;
        let owned = cache.get_or_compute(rest, value - 1);
        if *rank <= &skipped + owned {
            break;
        }
        skipped += owned;
        copies += 1;
    }
    *rank = subtract(rank, &skipped, "multiplicity offset exceeds remaining rank")?;
    Ok(copies)
}
