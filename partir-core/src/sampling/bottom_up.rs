//! Bottom-Up rank decoding.
//!
//! Each step scans candidate column heights upward from 1 until the
//! cumulative count of partitions whose next column is at most the candidate
//! covers the remaining rank. Cheap when the conjugate columns are short,
//! i.e. when `parts` is a large fraction of `total`.

use crate::{
    count::PartitionCountCache,
    error::{PartitionError, Result},
};

use super::construction::Construction;

pub(super) fn decode(cache: &mut PartitionCountCache, state: &mut Construction) -> Result<()> {
    while state.remaining() > 0 {
        let remaining = state.remaining();
        let mut value = 1;
        while cache.get_or_compute(remaining, value) < state.rank() {
            value += 1;
            if value > state.bound() {
                return Err(PartitionError::InvariantViolation {
                    invariant: "bottom-up scan passed the column bound",
                });
            }
        }
        state.skip_smaller_columns(cache, value)?;
        state.take(value, 1)?;
    }
    Ok(())
}
