//! Top-Down rank decoding.
//!
//! Each step scans candidate column heights downward from the current bound
//! and stops at the smallest height whose cumulative count still covers the
//! remaining rank. Efficient when `total` is much larger than `parts`, where
//! the first candidates tried are usually the right ones.
//!
//! A remaining total of exactly 1 is appended directly: `Count(1, k) == 1`
//! for every `k`, so there is nothing to decide. Likewise once the scan
//! bottoms out at height 1 the rest of the total can only be unit columns.

use crate::{count::PartitionCountCache, error::Result};

use super::construction::Construction;

pub(super) fn decode(cache: &mut PartitionCountCache, state: &mut Construction) -> Result<()> {
    while state.remaining() > 0 {
        let remaining = state.remaining();
        if remaining == 1 {
            state.take(1, 1)?;
            break;
        }
        let mut value = state.bound();
        while value > 1 && cache.get_or_compute(remaining, value - 1) >= state.rank() {
            value -= 1;
        }
        if value == 1 {
            state.take(1, remaining)?;
            break;
        }
        state.skip_smaller_columns(cache, value)?;
        state.take(value, 1)?;
    }
    Ok(())
}
