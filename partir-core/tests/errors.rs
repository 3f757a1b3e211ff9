use partir_core::{
    BigUint, ErrorKind, PartitionError, PartitionErrorCode, distinct_partitions,
    first_with_largest, num_partitions,
};
use rstest::rstest;

#[rstest]
#[case(PartitionError::ZeroParts, PartitionErrorCode::ZeroParts, ErrorKind::InvalidArgument)]
#[case(
    PartitionError::PartsExceedTotal { total: 2, parts: 3 },
    PartitionErrorCode::PartsExceedTotal,
    ErrorKind::InvalidArgument,
)]
#[case(PartitionError::EmptySample, PartitionErrorCode::EmptySample, ErrorKind::InvalidArgument)]
#[case(
    PartitionError::UnknownMethod { name: "rejection".to_owned() },
    PartitionErrorCode::UnknownMethod,
    ErrorKind::InvalidArgument,
)]
#[case(
    PartitionError::NotCanonical { reason: "parts must be non-increasing" },
    PartitionErrorCode::NotCanonical,
    ErrorKind::InvalidArgument,
)]
#[case(
    PartitionError::LargestPartOutOfRange { total: 16, parts: 6, largest: 2 },
    PartitionErrorCode::LargestPartOutOfRange,
    ErrorKind::Infeasible,
)]
#[case(
    PartitionError::InsufficientPartitions {
        total: 5,
        parts: 2,
        requested: 3,
        available: BigUint::from(2_u32),
    },
    PartitionErrorCode::InsufficientPartitions,
    ErrorKind::Infeasible,
)]
#[case(
    PartitionError::Exhausted { total: 5, parts: 2 },
    PartitionErrorCode::Exhausted,
    ErrorKind::Infeasible,
)]
#[case(
    PartitionError::RankOutOfRange {
        rank: BigUint::from(0_u32),
        available: BigUint::from(2_u32),
    },
    PartitionErrorCode::RankOutOfRange,
    ErrorKind::InvalidArgument,
)]
#[case(
    PartitionError::InvariantViolation { invariant: "test" },
    PartitionErrorCode::InvariantViolation,
    ErrorKind::Internal,
)]
fn returns_expected_code_and_kind(
    #[case] error: PartitionError,
    #[case] expected: PartitionErrorCode,
    #[case] kind: ErrorKind,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.kind(), kind);
    assert_eq!(expected.kind(), kind);
    assert!(expected.as_str().starts_with("PARTITION_"));
    assert_eq!(expected.to_string(), expected.as_str());
}

#[rstest]
#[case(PartitionErrorCode::ZeroParts, "PARTITION_ZERO_PARTS")]
#[case(PartitionErrorCode::Exhausted, "PARTITION_EXHAUSTED")]
#[case(PartitionErrorCode::RankOutOfRange, "PARTITION_RANK_OUT_OF_RANGE")]
fn codes_are_stable(#[case] code: PartitionErrorCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
}

#[rstest]
fn messages_name_the_offending_values() {
    let err = PartitionError::PartsExceedTotal { total: 2, parts: 3 };
    assert_eq!(err.to_string(), "cannot split 2 into 3 positive parts");

    let err = distinct_partitions(5, 2, 3).expect_err("only two partitions exist");
    assert_eq!(
        err.to_string(),
        "requested 3 distinct partitions of 5 into 2 parts but only 2 exist"
    );
    assert_eq!(err.kind(), ErrorKind::Infeasible);
}

#[rstest]
fn infeasible_requests_are_distinguished_from_invalid_ones() {
    let infeasible = first_with_largest(10, 3, 9).expect_err("largest part is too big");
    assert_eq!(infeasible.kind(), ErrorKind::Infeasible);

    let invalid = num_partitions(10, 0).expect_err("zero parts");
    assert_eq!(invalid.kind(), ErrorKind::InvalidArgument);
}
