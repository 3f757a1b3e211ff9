//! Public sampling API behaviour.

mod common;

use common::seeded_sampler;
use partir_core::{
    Algorithm, BigUint, Method, PartitionError, SampleRequest, SamplerBuilder, count, sample,
};
use rstest::rstest;

#[rstest]
fn best_method_samples_padded_partitions() {
    let drawn = sample(100, 20, 50, Method::Best, true).expect("request is valid");
    assert_eq!(drawn.len(), 50);
    for partition in &drawn {
        assert_eq!(partition.len(), 20);
        assert_eq!(partition.total(), 100);
        assert!(partition.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}

#[rstest]
#[case::bottom_up(Algorithm::BottomUp)]
#[case::top_down(Algorithm::TopDown)]
#[case::divide_and_conquer(Algorithm::DivideAndConquer)]
#[case::multiplicity(Algorithm::Multiplicity)]
fn strict_samples_have_positive_parts(#[case] algorithm: Algorithm) {
    let drawn = seeded_sampler(algorithm, 17, false)
        .sample(300, 25, 40)
        .expect("request is valid");
    for partition in drawn {
        assert_eq!(partition.len(), 25);
        assert_eq!(partition.total(), 300);
        assert!(partition.iter().all(|&part| part >= 1));
    }
}

#[rstest]
fn large_totals_sample_with_arbitrary_precision() {
    assert!(count(560, 40) > BigUint::from(u64::MAX));
    let drawn = seeded_sampler(Algorithm::DivideAndConquer, 3, false)
        .sample(600, 40, 3)
        .expect("request is valid");
    assert!(drawn.iter().all(|p| p.total() == 600 && p.len() == 40));
}

#[rstest]
fn single_partition_shapes_always_return_it() {
    let mut sampler = SamplerBuilder::new().with_seed(1).build();
    for partition in sampler.sample(7, 7, 5).expect("request is valid") {
        assert_eq!(partition.as_slice(), &[1; 7]);
    }
    for partition in sampler.sample(7, 1, 5).expect("request is valid") {
        assert_eq!(partition.as_slice(), &[7]);
    }
}

#[rstest]
fn builder_records_configuration() {
    let builder = SamplerBuilder::new()
        .with_method(Method::Fixed(Algorithm::Multiplicity))
        .with_zero_padding(true)
        .with_seed(99);
    assert_eq!(builder.method(), Method::Fixed(Algorithm::Multiplicity));
    assert!(builder.zero_padding());
    assert_eq!(builder.seed(), Some(99));

    let sampler = builder.build();
    assert_eq!(sampler.method(), Method::Fixed(Algorithm::Multiplicity));
    assert!(sampler.zero_padding());
    assert!(sampler.cache().is_empty());
}

#[rstest]
fn seeded_builders_reproduce_samples() {
    let draw = || {
        SamplerBuilder::new()
            .with_seed(42)
            .build()
            .sample(50, 6, 25)
            .expect("request is valid")
    };
    assert_eq!(draw(), draw());
}

#[rstest]
fn draw_returns_one_member() {
    let partition = SamplerBuilder::new()
        .with_seed(5)
        .build()
        .draw(10, 3)
        .expect("request is valid");
    assert_eq!(partition.total(), 10);
    assert_eq!(partition.len(), 3);
}

#[rstest]
#[case::zero_parts(5, 0, 1, false, PartitionError::ZeroParts)]
#[case::too_many_parts(3, 5, 1, false, PartitionError::PartsExceedTotal { total: 3, parts: 5 })]
#[case::empty_sample(10, 3, 0, false, PartitionError::EmptySample)]
#[case::zero_parts_padded(5, 0, 1, true, PartitionError::ZeroParts)]
fn invalid_requests_are_rejected(
    #[case] total: usize,
    #[case] parts: usize,
    #[case] sample_size: usize,
    #[case] zero_padding: bool,
    #[case] expected: PartitionError,
) {
    assert_eq!(
        SampleRequest::new(total, parts, sample_size, Method::Best, zero_padding),
        Err(expected.clone())
    );
    assert_eq!(
        sample(total, parts, sample_size, Method::Best, zero_padding),
        Err(expected)
    );
}

#[rstest]
fn padding_admits_more_parts_than_the_total() {
    let drawn = sample(3, 5, 10, Method::Best, true).expect("request is valid");
    for partition in drawn {
        assert_eq!(partition.len(), 5);
        assert_eq!(partition.total(), 3);
        assert_eq!(partition.as_slice()[3..], [0, 0]);
    }
}

#[rstest]
fn request_resolves_best_by_shape() {
    let small = SampleRequest::new(100, 10, 1, Method::Best, false).expect("valid");
    assert_eq!(small.algorithm(), Algorithm::BottomUp);
    let large = SampleRequest::new(1_000, 10, 1, Method::Best, false).expect("valid");
    assert_eq!(large.algorithm(), Algorithm::DivideAndConquer);
}
