//! Divide-and-Conquer rank decoding.
//!
//! Bisects the column height within `[1, bound]` on the monotone cumulative
//! count instead of scanning, so each column costs `O(log bound)` oracle
//! queries. The intended regime is large `total` with moderate `parts`.

use crate::{count::PartitionCountCache, error::Result};

use super::construction::Construction;

pub(super) fn decode(cache: &mut PartitionCountCache, state: &mut Construction) -> Result<()> {
    while state.remaining() > 0 {
        let remaining = state.remaining();
        let mut low = 1;
        let mut high = state.bound();
        while low < high {
            let mid = low.midpoint(high);
            if cache.get_or_compute(remaining, mid) >= state.rank() {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        state.skip_smaller_columns(cache, low)?;
        state.take(low, 1)?;
    }
    Ok(())
}
