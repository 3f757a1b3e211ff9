use clap::Parser;
use partir_core::{Algorithm, BigUint, Method, Partition, PartitionError};
use rstest::rstest;

use super::*;
use crate::logging::LogFormat;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("partir").chain(args.iter().copied()))
        .unwrap_or_else(|err| panic!("arguments must parse: {err}"))
}

fn partitions(output: CommandOutput) -> Vec<Partition> {
    match output {
        CommandOutput::Partitions(partitions) => partitions,
        CommandOutput::Count(count) => panic!("expected partitions, got count {count}"),
    }
}

fn rendered(output: &CommandOutput) -> String {
    let mut buffer = Vec::new();
    render_output(output, &mut buffer).unwrap_or_else(|err| panic!("render failed: {err}"));
    String::from_utf8(buffer).unwrap_or_else(|err| panic!("output is not UTF-8: {err}"))
}

#[rstest]
#[case::exact(&["count", "10", "3"], 8_u64)]
#[case::padded(&["count", "100", "20", "--zeros"], 97_132_873)]
#[case::more_parts_than_total(&["count", "3", "5"], 0)]
fn count_prints_exact_values(#[case] args: &[&str], #[case] expected: u64) -> TestResult {
    let output = run_cli(parse(args))?;
    assert_eq!(output, CommandOutput::Count(BigUint::from(expected)));
    assert_eq!(rendered(&output), format!("{expected}\n"));
    Ok(())
}

#[rstest]
fn sample_parses_every_option() {
    let cli = parse(&[
        "sample",
        "100",
        "20",
        "--size",
        "5",
        "--method",
        "divide-and-conquer",
        "--zeros",
        "--seed",
        "9",
        "--parallel",
    ]);
    let Command::Sample(args) = cli.command else {
        panic!("expected the sample command");
    };
    assert_eq!(args.method, Method::Fixed(Algorithm::DivideAndConquer));
    assert!(args.zeros);
    assert_eq!(args.seed, Some(9));
    assert!(args.parallel);
}

#[rstest]
#[case::absent(&["count", "4", "2"], None)]
#[case::before_command(&["--log-format", "json", "count", "4", "2"], Some(LogFormat::Json))]
#[case::after_command(&["count", "4", "2", "--log-format", "human"], Some(LogFormat::Human))]
fn log_format_is_a_global_flag(#[case] args: &[&str], #[case] expected: Option<LogFormat>) {
    assert_eq!(parse(args).log_format, expected);
}

#[rstest]
#[case::sequential(&["sample", "30", "4", "--size", "12", "--seed", "3"])]
#[case::parallel(&["sample", "30", "4", "--size", "12", "--seed", "3", "--parallel"])]
fn seeded_samples_are_reproducible(#[case] args: &[&str]) -> TestResult {
    let first = partitions(run_cli(parse(args))?);
    let second = partitions(run_cli(parse(args))?);
    assert_eq!(first, second);
    assert_eq!(first.len(), 12);
    assert!(first.iter().all(|p| p.total() == 30 && p.len() == 4));
    Ok(())
}

#[rstest]
fn unseeded_sample_uses_the_requested_shape() -> TestResult {
    let drawn = partitions(run_cli(parse(&["sample", "12", "12", "-s", "3"]))?);
    assert_eq!(drawn, vec![Partition::try_from(vec![1; 12])?; 3]);
    Ok(())
}

#[rstest]
fn enumerate_lists_the_feasible_set() -> TestResult {
    let output = run_cli(parse(&["enumerate", "6", "3"]))?;
    assert_eq!(rendered(&output), "4 1 1\n3 2 1\n2 2 2\n");
    let limited = run_cli(parse(&["enumerate", "6", "3", "--limit", "2"]))?;
    assert_eq!(rendered(&limited), "4 1 1\n3 2 1\n");
    Ok(())
}

#[rstest]
fn conjugate_prints_the_transpose() -> TestResult {
    let output = run_cli(parse(&["conjugate", "5", "3", "1"]))?;
    assert_eq!(rendered(&output), "3 2 2 1 1\n");
    Ok(())
}

#[rstest]
#[case::zero_parts(&["count", "4", "0"], PartitionError::ZeroParts)]
#[case::empty_sample(&["sample", "4", "2", "--size", "0"], PartitionError::EmptySample)]
#[case::too_many_parts(
    &["sample", "2", "3", "--size", "1"],
    PartitionError::PartsExceedTotal { total: 2, parts: 3 },
)]
#[case::limit_too_large(
    &["enumerate", "5", "2", "--limit", "3"],
    PartitionError::InsufficientPartitions {
        total: 5,
        parts: 2,
        requested: 3,
        available: BigUint::from(2_u32),
    },
)]
#[case::not_canonical(
    &["conjugate", "1", "3"],
    PartitionError::NotCanonical { reason: "parts must be non-increasing" },
)]
fn core_errors_are_surfaced(#[case] args: &[&str], #[case] expected: PartitionError) {
    let Err(CliError::Core(err)) = run_cli(parse(args)) else {
        panic!("command must fail");
    };
    assert_eq!(err, expected);
}

#[rstest]
#[case::unknown_method(&["sample", "10", "2", "--size", "1", "--method", "rejection"])]
#[case::parallel_without_seed(&["sample", "10", "2", "--size", "1", "--parallel"])]
#[case::conjugate_without_parts(&["conjugate"])]
#[case::negative_total(&["count", "-1", "2"])]
fn clap_rejects_malformed_arguments(#[case] args: &[&str]) {
    let result = Cli::try_parse_from(std::iter::once("partir").chain(args.iter().copied()));
    assert!(result.is_err());
}
