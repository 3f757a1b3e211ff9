use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use partir_core::{
    BigUint, Method, Partition, PartitionCountCache, PartitionError, SampleRequest,
    SamplerBuilder, conjugate, distinct_partitions, feasible_set,
};
use thiserror::Error;
use tracing::info;

use crate::logging::LogFormat;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "partir",
    about = "Count, sample and enumerate integer partitions."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
    /// Log rendering; overrides `PARTIR_LOG_FORMAT`.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the number of partitions of a total into a number of parts.
    Count(CountArgs),
    /// Draw partitions uniformly at random.
    Sample(SampleArgs),
    /// List partitions in lexical order.
    Enumerate(EnumerateArgs),
    /// Print the conjugate of a partition.
    Conjugate(ConjugateArgs),
}

/// Options accepted by the `count` command.
#[derive(Debug, Args, Clone)]
pub struct CountArgs {
    /// Total the parts sum to.
    pub total: usize,
    /// Number of parts.
    pub parts: usize,
    /// Count partitions into at most `parts` parts instead of exactly.
    #[arg(long)]
    pub zeros: bool,
}

/// Options accepted by the `sample` command.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Total the parts sum to.
    pub total: usize,
    /// Number of parts.
    pub parts: usize,
    /// Number of partitions to draw.
    #[arg(long, short = 's')]
    pub size: usize,
    /// Generator: bottom_up, top_down, divide_and_conquer, multiplicity or best.
    #[arg(long, default_value_t = Method::Best)]
    pub method: Method,
    /// Pad partitions with trailing zeros.
    #[arg(long)]
    pub zeros: bool,
    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Draw chunks of the sample on all cores.
    #[arg(long, requires = "seed")]
    pub parallel: bool,
}

/// Options accepted by the `enumerate` command.
#[derive(Debug, Args, Clone)]
pub struct EnumerateArgs {
    /// Total the parts sum to.
    pub total: usize,
    /// Number of parts.
    pub parts: usize,
    /// Stop after this many partitions.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Options accepted by the `conjugate` command.
#[derive(Debug, Args, Clone)]
pub struct ConjugateArgs {
    /// Parts in non-increasing order.
    #[arg(required = true, num_args = 1..)]
    pub parts: Vec<usize>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The partition library rejected the request.
    #[error(transparent)]
    Core(#[from] PartitionError),
}

/// Result of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// A single exact count.
    Count(BigUint),
    /// A list of partitions, one per output line.
    Partitions(Vec<Partition>),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the partition library rejects the request.
///
/// # Examples
/// ```
/// use partir_cli::cli::{Cli, Command, CommandOutput, CountArgs, run_cli};
/// use partir_core::BigUint;
///
/// let cli = Cli {
///     command: Command::Count(CountArgs { total: 10, parts: 3, zeros: false }),
///     log_format: None,
/// };
/// assert_eq!(run_cli(cli)?, CommandOutput::Count(BigUint::from(8_u32)));
/// # Ok::<(), partir_cli::cli::CliError>(())
/// ```
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    match cli.command {
        Command::Count(args) => run_count(&args),
        Command::Sample(args) => run_sample(&args),
        Command::Enumerate(args) => run_enumerate(&args),
        Command::Conjugate(args) => Ok(CommandOutput::Partitions(vec![conjugate(&args.parts)?])),
    }
}

fn run_count(args: &CountArgs) -> Result<CommandOutput, CliError> {
    let mut cache = PartitionCountCache::new();
    let count = if args.zeros {
        cache.num_partitions_padded(args.total, args.parts)?
    } else {
        cache.num_partitions(args.total, args.parts)?
    };
    Ok(CommandOutput::Count(count))
}

fn run_sample(args: &SampleArgs) -> Result<CommandOutput, CliError> {
    let request = SampleRequest::new(args.total, args.parts, args.size, args.method, args.zeros)?;
    info!(
        total = args.total,
        parts = args.parts,
        size = args.size,
        algorithm = %request.algorithm(),
        parallel = args.parallel,
        "sampling partitions"
    );
    let sample = match args.seed {
        Some(seed) if args.parallel => partir_core::sample_parallel(&request, seed)?,
        seed => {
            let builder = SamplerBuilder::new()
                .with_method(args.method)
                .with_zero_padding(args.zeros);
            let builder = match seed {
                Some(seed) => builder.with_seed(seed),
                None => builder,
            };
            builder.build().sample_request(&request)?
        }
    };
    Ok(CommandOutput::Partitions(sample))
}

fn run_enumerate(args: &EnumerateArgs) -> Result<CommandOutput, CliError> {
    let members = match args.limit {
        Some(limit) => distinct_partitions(args.total, args.parts, limit)?,
        None => feasible_set(args.total, args.parts)?,
    };
    Ok(CommandOutput::Partitions(members))
}

/// Renders `output` to `writer`: the count on one line, or one partition
/// per line with space-separated parts.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use partir_cli::cli::{CommandOutput, render_output};
/// use partir_core::Partition;
///
/// let output = CommandOutput::Partitions(vec![Partition::try_from(vec![3, 1])?]);
/// let mut buffer = Vec::new();
/// render_output(&output, &mut buffer)?;
/// assert_eq!(buffer, b"3 1\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Count(count) => writeln!(writer, "{count}"),
        CommandOutput::Partitions(partitions) => {
            for partition in partitions {
                writeln!(writer, "{partition}")?;
            }
            Ok(())
        }
    }
}
