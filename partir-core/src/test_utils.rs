//! Shared test utilities for `partir-core`.

use partir_test_support::ci::run_profile::TestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};

use crate::partition::Partition;

/// Proptest configuration with `default_cases` unless the environment
/// overrides it.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = TestRunProfile::new(default_cases, false, 0).from_env();
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Generates canonical partitions with up to `max_len` parts no larger than
/// `max_part`, optionally followed by zero padding.
pub(crate) fn partition_strategy(
    max_len: usize,
    max_part: usize,
) -> impl Strategy<Value = Partition> {
    (
        prop::collection::vec(1..=max_part, 0..=max_len),
        0..=3_usize,
    )
        .prop_map(|(mut parts, padding)| {
            parts.sort_unstable_by(|left, right| right.cmp(left));
            let len = parts.len() + padding;
            Partition::from_canonical(parts).pad_zeros(len)
        })
}

/// Generates a `(total, parts)` shape admitting at least one partition into
/// positive parts.
pub(crate) fn shape_strategy(max_total: usize) -> impl Strategy<Value = (usize, usize)> {
    (1..=max_total).prop_flat_map(|total| (Just(total), 1..=total))
}
